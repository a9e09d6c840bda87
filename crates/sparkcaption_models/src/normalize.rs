//! Response normalization: raw provider JSON in, [`GeneratedContent`] out.
//!
//! Text is extracted in a fixed priority order:
//!
//! 1. `choices[0].message.content` when it is a string
//! 2. `choices[0].message.content` when it is a fragment list (texts joined)
//! 3. a top-level `text` string
//! 4. the whole response serialized as JSON
//!
//! The text is then read as `{caption, hashtags, emojis}` JSON. When that
//! fails the text becomes the caption and the lists stay empty.

use crate::RawResponse;
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;
use sparkcaption_core::GeneratedContent;
use sparkcaption_error::{EmptyResponseError, SparkResult};
use tracing::{debug, instrument};

/// Where the response text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseText {
    /// `choices[0].message.content` as a string
    MessageContent(String),
    /// `choices[0].message.content` fragments, joined
    Fragments(String),
    /// Top-level `text`
    TopLevel(String),
    /// The response serialized as JSON
    Serialized(String),
}

impl ResponseText {
    /// Extracts text from a response, following the priority order.
    ///
    /// Returns `None` only for a `null` response.
    pub fn from_response(raw: &Value) -> Option<Self> {
        if raw.is_null() {
            return None;
        }

        let shape: ResponseShape = serde_json::from_value(raw.clone()).unwrap_or_default();
        let content = shape
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        match content {
            Some(ContentShape::Text(text)) => Some(ResponseText::MessageContent(text)),
            Some(ContentShape::Fragments(fragments)) => Some(ResponseText::Fragments(
                fragments.iter().map(fragment_text).collect(),
            )),
            _ => match shape.text {
                Some(Value::String(text)) if !text.is_empty() => Some(ResponseText::TopLevel(text)),
                _ => Some(ResponseText::Serialized(raw.to_string())),
            },
        }
    }

    /// The extracted text.
    pub fn as_str(&self) -> &str {
        match self {
            ResponseText::MessageContent(text)
            | ResponseText::Fragments(text)
            | ResponseText::TopLevel(text)
            | ResponseText::Serialized(text) => text,
        }
    }

    /// Short label for logging.
    fn source(&self) -> &'static str {
        match self {
            ResponseText::MessageContent(_) => "message_content",
            ResponseText::Fragments(_) => "fragments",
            ResponseText::TopLevel(_) => "top_level_text",
            ResponseText::Serialized(_) => "serialized",
        }
    }
}

/// Normalizes a provider response into generated content.
///
/// # Errors
///
/// Returns [`EmptyResponseError`] when no text can be extracted.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sparkcaption_models::{RawResponse, normalize_response};
///
/// let raw = RawResponse::new(json!({
///     "choices": [{"message": {"content": "{\"caption\":\"Hi\",\"hashtags\":[\"#a\"],\"emojis\":[\"🎉\"]}"}}]
/// }));
/// let content = normalize_response(&raw).unwrap();
/// assert_eq!(content.caption(), "Hi");
/// assert_eq!(content.hashtags(), &vec!["#a".to_string()]);
/// ```
#[instrument(skip_all)]
pub fn normalize_response(response: &RawResponse) -> SparkResult<GeneratedContent> {
    let text = ResponseText::from_response(response.value()).ok_or_else(EmptyResponseError::new)?;
    debug!(source = text.source(), len = text.as_str().len(), "Extracted response text");

    if text.as_str().is_empty() {
        return Err(EmptyResponseError::new().into());
    }

    Ok(parse_structured(text.as_str()))
}

/// Reads `{caption, hashtags, emojis}` from text, falling back to a plain caption.
///
/// A Markdown code fence around the JSON is ignored. Missing lists, and
/// values that are not lists of strings, become empty; a missing caption
/// means the text is not structured.
///
/// # Examples
///
/// ```
/// use sparkcaption_models::parse_structured;
///
/// let content = parse_structured("Just some text");
/// assert_eq!(content.caption(), "Just some text");
/// assert!(content.hashtags().is_empty());
/// assert!(content.emojis().is_empty());
/// ```
pub fn parse_structured(text: &str) -> GeneratedContent {
    match serde_json::from_str::<StructuredCaption>(strip_code_fence(text)) {
        Ok(parsed) => GeneratedContent::new(parsed.caption, parsed.hashtags, parsed.emojis),
        Err(e) => {
            debug!(error = %e, "Response is not structured JSON, using it as the caption");
            GeneratedContent::caption_only(text.trim())
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner,
        None => body,
    }
}

fn fragment_text(fragment: &Value) -> String {
    match fragment.get("text") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Accepts anything; falls back to the default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
struct ResponseShape {
    #[serde(default, deserialize_with = "lenient")]
    choices: Vec<ChoiceShape>,
    #[serde(default)]
    text: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceShape {
    #[serde(default, deserialize_with = "lenient")]
    message: Option<MessageShape>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageShape {
    #[serde(default, deserialize_with = "lenient")]
    content: Option<ContentShape>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentShape {
    Text(String),
    Fragments(Vec<Value>),
}

#[derive(Debug, Deserialize)]
struct StructuredCaption {
    caption: String,
    #[serde(default, deserialize_with = "lenient")]
    hashtags: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    emojis: Vec<String>,
}
