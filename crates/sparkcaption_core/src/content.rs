//! The content record handed back to the presentation layer.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Generated caption, hashtags, emojis and optional visual links.
///
/// Hashtags and emojis are always present, possibly empty.
///
/// # Examples
///
/// ```
/// use sparkcaption_core::GeneratedContent;
///
/// let content = GeneratedContent::new(
///     "Morning fuel",
///     vec!["#coffee".to_string(), "#paris".to_string()],
///     vec!["☕".to_string()],
/// );
/// assert_eq!(content.copy_text(), "Morning fuel\n\n#coffee #paris");
/// assert!(content.image_url().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    caption: String,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    emojis: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video_url: Option<String>,
}

impl GeneratedContent {
    /// Creates content with no visual attachments.
    pub fn new(caption: impl Into<String>, hashtags: Vec<String>, emojis: Vec<String>) -> Self {
        Self {
            caption: caption.into(),
            hashtags,
            emojis,
            image_url: None,
            video_url: None,
        }
    }

    /// Creates caption-only content with empty hashtag and emoji lists.
    pub fn caption_only(caption: impl Into<String>) -> Self {
        Self::new(caption, Vec::new(), Vec::new())
    }

    /// Attaches a generated image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attaches a generated video.
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// The text a user would paste: caption, a blank line, then hashtags.
    pub fn copy_text(&self) -> String {
        format!("{}\n\n{}", self.caption, self.hashtags.join(" "))
    }
}
