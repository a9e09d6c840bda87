//! SparkCaption command-line interface.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, handle_generate_command, handle_stream_command, key_issue_hint};
use sparkcaption_core::init_tracing;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("info");

    #[cfg(feature = "metrics")]
    if let Err(e) = sparkcaption_core::init_observability("sparkcaption", 10) {
        tracing::warn!(error = %e, "Metrics disabled");
    }

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    let result = match cli.command {
        Commands::Generate(args) => handle_generate_command(args).await,
        Commands::Stream(args) => handle_stream_command(args).await,
    };

    #[cfg(feature = "metrics")]
    sparkcaption_core::shutdown_observability();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            eprintln!("Error: {}", message);
            if let Some(hint) = key_issue_hint(&message) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
