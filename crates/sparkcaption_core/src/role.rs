//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instructions for the model
    #[display("system")]
    System,
    /// The person asking
    #[display("user")]
    User,
    /// The model
    #[display("assistant")]
    Assistant,
}
