//! The user-facing choices that shape a generation request.
//!
//! Each enum displays as the label shown to users and parses from it
//! case-insensitively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Target social platform.
///
/// # Examples
///
/// ```
/// use sparkcaption_core::Platform;
///
/// assert_eq!(Platform::Twitter.to_string(), "Twitter/X");
/// assert_eq!("x".parse::<Platform>().unwrap(), Platform::Twitter);
/// assert_eq!("linkedin".parse::<Platform>().unwrap(), Platform::LinkedIn);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    #[default]
    Instagram,
    #[serde(rename = "Twitter/X")]
    #[strum(to_string = "Twitter/X", serialize = "twitter", serialize = "x")]
    Twitter,
    LinkedIn,
    TikTok,
    General,
}

/// Voice of the generated copy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Casual,
    Professional,
    Funny,
    Inspirational,
    Persuasive,
}

/// Desired caption length.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

/// What the caption accompanies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ContentFormat {
    /// Caption for an image the user already has
    #[default]
    Caption,
    /// Image plus text
    Post,
    /// Video plus text
    Video,
}
