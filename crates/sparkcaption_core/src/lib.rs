//! Core data types for the SparkCaption content generation library.
//!
//! This crate provides the request, content, chat and streaming types shared
//! by the provider client and the generation orchestrator.

mod content;
mod message;
mod observability;
mod options;
mod request;
mod role;
mod stream;

pub use content::GeneratedContent;
pub use message::{ChatMessage, ContentFragment, ImageUrl, MessageContent};
pub use observability::{init_observability, init_tracing, shutdown_observability};
pub use options::{ContentFormat, Length, Platform, Tone};
pub use request::{GenerationRequest, GenerationRequestBuilder, GenerationRequestBuilderError};
pub use role::Role;
pub use stream::{StreamAccumulator, StreamChunk, StreamUsage};
