//! Chat messages in the wire shape of OpenAI-compatible APIs.

use crate::Role;
use serde::{Deserialize, Serialize};

/// An image reference inside a content fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Remote URL or `data:` URI
    pub url: String,
}

/// One piece of structured message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFragment {
    /// Fragment type, e.g. `"text"` or `"image_url"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Text, for text fragments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image reference, for image fragments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageUrl>,
}

impl ContentFragment {
    /// A text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            image_url: None,
        }
    }

    /// An image fragment.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: "image_url".to_string(),
            text: None,
            image_url: Some(ImageUrl { url: url.into() }),
        }
    }
}

/// Message content: plain text or a sequence of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// Mixed text and image fragments
    Fragments(Vec<ContentFragment>),
}

impl MessageContent {
    /// The text, when this is plain text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Fragments(_) => None,
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

/// A message in a chat request.
///
/// # Examples
///
/// ```
/// use sparkcaption_core::{ChatMessage, MessageContent, Role};
///
/// let message = ChatMessage::user("Say hello");
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(*message.content(), MessageContent::Text("Say hello".to_string()));
///
/// let json = serde_json::to_string(&message).unwrap();
/// assert_eq!(json, r#"{"role":"user","content":"Say hello"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ChatMessage {
    /// The role of the message sender
    role: Role,
    /// The content of the message
    content: MessageContent,
}

impl ChatMessage {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A system message.
    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }

    /// A user message.
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
