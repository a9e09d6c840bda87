//! SparkCaption: platform-aware captions from hosted LLM APIs.
//!
//! [`Generator`] turns a [`GenerationRequest`] into [`GeneratedContent`],
//! retrying rate-limited calls and reporting progress along the way.
//!
//! ```no_run
//! use sparkcaption::{ContentFormat, GenerationRequest, Generator, Platform, ProviderConfig};
//!
//! # async fn run() -> sparkcaption::SparkResult<()> {
//! let generator = Generator::from_provider_config(ProviderConfig::from_env()?)?;
//! let request = GenerationRequest::builder()
//!     .prompt("coffee in Paris")
//!     .platform(Platform::Instagram)
//!     .format(ContentFormat::Caption)
//!     .build()
//!     .expect("valid request");
//!
//! let progress: &sparkcaption::ProgressFn = &|status: &str| eprintln!("{status}");
//! let content = generator.generate(&request, Some(progress)).await?;
//! println!("{}", content.copy_text());
//! # Ok(())
//! # }
//! ```

mod generator;
#[cfg(feature = "metrics")]
mod metrics;
mod prompt;

pub use generator::{Generator, GeneratorConfig, ProgressFn};
#[cfg(feature = "metrics")]
pub use metrics::GenerationMetrics;
pub use prompt::{
    CAPTION_SYSTEM_PROMPT, STREAM_SYSTEM_PROMPT, caption_instruction, caption_messages,
    image_prompt, stream_messages,
};

pub use sparkcaption_core::{
    ChatMessage, ContentFormat, GeneratedContent, GenerationRequest, Length, Platform, Role,
    StreamAccumulator, StreamChunk, StreamUsage, Tone,
};
pub use sparkcaption_error::{SparkError, SparkErrorKind, SparkResult};
pub use sparkcaption_models::{
    ChatStream, ContentProvider, OpenRouterClient, ProviderConfig, RawResponse, RetryConfig,
    StreamOptions,
};
