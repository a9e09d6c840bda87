//! Command-line interface module.
//!
//! Argument definitions and one handler per subcommand.

mod commands;
mod generate;
mod stream;

pub use commands::{Cli, Commands, GenerateArgs, StreamArgs};
pub use generate::handle_generate_command;
pub use stream::handle_stream_command;

use sparkcaption::ProviderConfig;
use std::path::Path;

const KEY_ISSUE_MARKER: &str = "Requested entity was not found";

/// A user-facing hint for errors that usually mean a bad API key.
pub fn key_issue_hint(message: &str) -> Option<&'static str> {
    message
        .contains(KEY_ISSUE_MARKER)
        .then_some("API Key issue detected. Please check your key.")
}

/// Loads provider settings from `path`, or from the environment.
fn load_config(path: Option<&Path>) -> sparkcaption::SparkResult<ProviderConfig> {
    match path {
        Some(path) => {
            tracing::info!(config = %path.display(), "Loading configuration file");
            ProviderConfig::from_file(path)
        }
        None => ProviderConfig::from_env(),
    }
}
