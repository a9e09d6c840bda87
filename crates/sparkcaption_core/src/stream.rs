//! Incremental output of a streaming chat request.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Token accounting reported on (usually) the last chunk of a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamUsage {
    /// Tokens in the prompt
    pub prompt_tokens: Option<u64>,
    /// Tokens in the completion
    pub completion_tokens: Option<u64>,
    /// Total tokens
    pub total_tokens: Option<u64>,
    /// Tokens the model spent reasoning before answering
    pub reasoning_tokens: Option<u64>,
}

/// One event of a streaming response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Newly generated text, if this chunk carries any
    pub delta_content: Option<String>,
    /// Usage statistics, if this chunk carries them
    pub usage: Option<StreamUsage>,
}

impl StreamChunk {
    /// A chunk carrying only text.
    pub fn delta(text: impl Into<String>) -> Self {
        Self {
            delta_content: Some(text.into()),
            usage: None,
        }
    }

    /// A chunk carrying only usage.
    pub fn usage(usage: StreamUsage) -> Self {
        Self {
            delta_content: None,
            usage: Some(usage),
        }
    }
}

/// Consumer-side state for a stream: the text so far and the latest usage.
///
/// # Examples
///
/// ```
/// use sparkcaption_core::{StreamAccumulator, StreamChunk, StreamUsage};
///
/// let mut acc = StreamAccumulator::default();
/// acc.push(&StreamChunk::delta("Hel"));
/// acc.push(&StreamChunk::delta("lo"));
/// acc.push(&StreamChunk::usage(StreamUsage {
///     reasoning_tokens: Some(12),
///     ..Default::default()
/// }));
///
/// assert_eq!(acc.output(), "Hello");
/// assert_eq!(acc.reasoning_tokens(), Some(12));
/// ```
#[derive(Debug, Clone, Default, Getters)]
pub struct StreamAccumulator {
    /// Concatenated delta text
    output: String,
    /// Most recent usage record seen
    usage: Option<StreamUsage>,
    /// Number of chunks consumed
    chunks: usize,
}

impl StreamAccumulator {
    /// Folds one chunk in, returning the text it added (if any).
    pub fn push<'a>(&mut self, chunk: &'a StreamChunk) -> Option<&'a str> {
        self.chunks += 1;
        if let Some(usage) = chunk.usage {
            self.usage = Some(usage);
        }
        match chunk.delta_content.as_deref() {
            Some(text) if !text.is_empty() => {
                self.output.push_str(text);
                Some(text)
            }
            _ => None,
        }
    }

    /// Reasoning tokens from the latest usage record.
    pub fn reasoning_tokens(&self) -> Option<u64> {
        self.usage.and_then(|u| u.reasoning_tokens)
    }

    /// Consumes the accumulator, returning the full text.
    pub fn into_output(self) -> String {
        self.output
    }
}
