//! Live tests against OpenRouter.
//!
//! Require `OPENROUTER_API_KEY` (or a `.env` file).
//!
//! Run with: cargo test --package sparkcaption_models --features api -- --ignored

#![cfg(feature = "api")]

use futures_util::StreamExt;
use sparkcaption_core::{ChatMessage, StreamAccumulator};
use sparkcaption_models::{
    ContentProvider, OpenRouterClient, StreamOptions, normalize_response, retry_on_rate_limit,
};

#[tokio::test]
#[ignore] // Requires OPENROUTER_API_KEY
async fn test_openrouter_chat() -> anyhow::Result<()> {
    let client = OpenRouterClient::from_env()?;
    let model = client.config().text_model().clone();
    let messages = vec![ChatMessage::user("Reply with the single word: hello")];

    let raw = retry_on_rate_limit(client.config().retry(), || {
        client.send_chat(&model, &messages)
    })
    .await?;
    let content = normalize_response(&raw)?;

    assert!(!content.caption().is_empty());
    Ok(())
}

#[tokio::test]
#[ignore] // Requires OPENROUTER_API_KEY
async fn test_openrouter_stream() -> anyhow::Result<()> {
    let client = OpenRouterClient::from_env()?;
    let model = client.config().text_model().clone();

    let mut stream = client
        .stream_chat(
            &model,
            &[ChatMessage::user("Count from one to five.")],
            StreamOptions::with_usage(),
        )
        .await?;

    let mut acc = StreamAccumulator::default();
    while let Some(chunk) = stream.next().await {
        acc.push(&chunk?);
    }

    assert!(!acc.output().is_empty());
    Ok(())
}
