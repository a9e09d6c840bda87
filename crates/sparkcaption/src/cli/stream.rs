//! Stream command handler.

use super::{StreamArgs, load_config};
use futures_util::StreamExt;
use sparkcaption::{Generator, StreamAccumulator, StreamOptions};
use std::io::Write;

/// Handles the stream command.
///
/// Deltas go to stdout as they arrive; the reasoning-token count goes to
/// stderr at the end, when the provider reported one.
#[tracing::instrument(skip_all, fields(model = ?args.model))]
pub async fn handle_stream_command(args: StreamArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let generator = Generator::from_provider_config(config)?;

    let options = if args.no_usage {
        StreamOptions::default()
    } else {
        StreamOptions::with_usage()
    };
    let mut stream = generator
        .stream_generate(&args.prompt, args.model.as_deref(), options)
        .await?;

    let mut accumulator = StreamAccumulator::default();
    let mut stdout = std::io::stdout();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                writeln!(stdout)?;
                return Err(e.into());
            }
        };
        if let Some(delta) = accumulator.push(&chunk) {
            write!(stdout, "{}", delta)?;
            stdout.flush()?;
        }
    }
    writeln!(stdout)?;

    tracing::debug!(chunks = accumulator.chunks(), "Stream finished");
    if let Some(tokens) = accumulator.reasoning_tokens() {
        eprintln!("Reasoning tokens: {}", tokens);
    }
    Ok(())
}
