//! Generator behavior against a scripted provider.

mod test_utils;

use futures::StreamExt;
use serde_json::json;
use sparkcaption::{
    CAPTION_SYSTEM_PROMPT, ContentFormat, GeneratedContent, Generator, GeneratorConfig,
    ProgressFn, Role, STREAM_SYSTEM_PROMPT, SparkErrorKind, StreamAccumulator,
    StreamChunk, StreamOptions, StreamUsage,
};
use sparkcaption_error::RetryableError;
use std::sync::Mutex;
use std::time::Duration;
use test_utils::{MockProvider, api_error, chat_response, create_test_request, rate_limited};

const CAPTION_JSON: &str =
    r##"{"caption":"Golden hour at the café ☕","hashtags":["#paris","#coffee"],"emojis":["☕","🥐"]}"##;

fn generator(provider: MockProvider) -> Generator<MockProvider> {
    Generator::new(provider, GeneratorConfig::default())
}

fn expected_caption() -> GeneratedContent {
    GeneratedContent::new(
        "Golden hour at the café ☕",
        vec!["#paris".to_string(), "#coffee".to_string()],
        vec!["☕".to_string(), "🥐".to_string()],
    )
}

#[tokio::test]
async fn test_caption_end_to_end() {
    let provider = MockProvider::new().with_chat_json(chat_response(CAPTION_JSON));
    let generator = generator(provider);
    let request = create_test_request("coffee in Paris", ContentFormat::Caption);

    let content = generator.generate(&request, None).await.unwrap();

    assert_eq!(content, expected_caption());
    assert!(content.image_url().is_none());
    assert!(content.video_url().is_none());
    assert_eq!(generator.provider().chat_calls(), 1);
    assert_eq!(generator.provider().image_calls(), 0);

    let messages = generator.provider().last_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(*messages[0].role(), Role::System);
    assert_eq!(messages[0].content().as_text(), Some(CAPTION_SYSTEM_PROMPT));
    let instruction = messages[1].content().as_text().unwrap();
    assert!(instruction.contains("Context: \"coffee in Paris\""));
    assert!(instruction.contains("Platform: Instagram"));
    assert!(instruction.contains("Tone: Casual"));
}

#[tokio::test]
async fn test_progress_for_caption() {
    let generator = generator(MockProvider::new().with_chat_json(chat_response(CAPTION_JSON)));
    let request = create_test_request("sunrise run", ContentFormat::Caption);

    let seen = Mutex::new(Vec::new());
    let progress: &ProgressFn = &|status: &str| seen.lock().unwrap().push(status.to_string());
    generator.generate(&request, Some(progress)).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["Drafting caption...".to_string()]);
}

#[tokio::test]
async fn test_post_skips_image_by_default() {
    let provider = MockProvider::new()
        .with_chat_json(chat_response(CAPTION_JSON))
        .with_image(Ok(vec!["https://img.example/1.png".to_string()]));
    let generator = generator(provider);
    let request = create_test_request("new menu", ContentFormat::Post);

    let seen = Mutex::new(Vec::new());
    let progress: &ProgressFn = &|status: &str| seen.lock().unwrap().push(status.to_string());
    let content = generator.generate(&request, Some(progress)).await.unwrap();

    assert!(content.image_url().is_none());
    assert!(content.video_url().is_none());
    assert_eq!(generator.provider().image_calls(), 0);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "Drafting caption...".to_string(),
            "Image generation skipped; generating caption only...".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_post_with_visuals_attaches_first_image() {
    let provider = MockProvider::new()
        .with_chat_json(chat_response(CAPTION_JSON))
        .with_image(Ok(vec![
            "https://img.example/1.png".to_string(),
            "https://img.example/2.png".to_string(),
        ]));
    let generator = generator(provider).with_visuals(true);
    let request = create_test_request("new menu", ContentFormat::Post);

    let seen = Mutex::new(Vec::new());
    let progress: &ProgressFn = &|status: &str| seen.lock().unwrap().push(status.to_string());
    let content = generator.generate(&request, Some(progress)).await.unwrap();

    assert_eq!(content.image_url().as_deref(), Some("https://img.example/1.png"));
    assert!(content.video_url().is_none());
    assert_eq!(content.caption(), "Golden hour at the café ☕");
    assert_eq!(generator.provider().image_calls(), 1);
    assert!(seen.lock().unwrap().contains(&"Generating image...".to_string()));
}

#[tokio::test]
async fn test_image_failure_aborts_generation() {
    let provider = MockProvider::new()
        .with_chat_json(chat_response(CAPTION_JSON))
        .with_image(Err(api_error(503, "image backend down")));
    let generator = generator(provider).with_visuals(true);
    let request = create_test_request("new menu", ContentFormat::Post);

    let err = generator.generate(&request, None).await.unwrap_err();
    assert!(err.to_string().contains("Failed to generate image via OpenRouter."));
}

#[tokio::test]
async fn test_image_without_url_keeps_caption() {
    let provider = MockProvider::new()
        .with_chat_json(chat_response(CAPTION_JSON))
        .with_image(Ok(Vec::new()));
    let generator = generator(provider).with_visuals(true);
    let request = create_test_request("new menu", ContentFormat::Post);

    let content = generator.generate(&request, None).await.unwrap();
    assert_eq!(content, expected_caption());
    assert!(content.image_url().is_none());
    assert_eq!(generator.provider().image_calls(), 1);
}

#[tokio::test]
async fn test_video_has_no_video_url() {
    let generator = generator(MockProvider::new().with_chat_json(chat_response(CAPTION_JSON)));
    let request = create_test_request("trail run", ContentFormat::Video);

    let seen = Mutex::new(Vec::new());
    let progress: &ProgressFn = &|status: &str| seen.lock().unwrap().push(status.to_string());
    let content = generator.generate(&request, Some(progress)).await.unwrap();

    assert!(content.video_url().is_none());
    assert!(content.image_url().is_none());
    assert!(
        seen.lock()
            .unwrap()
            .contains(&"Video generation skipped; generating caption only...".to_string())
    );
}

#[tokio::test]
async fn test_plain_text_response_becomes_caption() {
    let generator =
        generator(MockProvider::new().with_chat_json(chat_response("Just some text")));
    let request = create_test_request("anything", ContentFormat::Caption);

    let content = generator.generate(&request, None).await.unwrap();
    assert_eq!(content.caption(), "Just some text");
    assert!(content.hashtags().is_empty());
    assert!(content.emojis().is_empty());
}

#[tokio::test]
async fn test_empty_response_is_an_error() {
    let generator = generator(MockProvider::new().with_chat_json(chat_response("")));
    let request = create_test_request("anything", ContentFormat::Caption);

    let err = generator.generate(&request, None).await.unwrap_err();
    assert!(matches!(err.kind(), SparkErrorKind::EmptyResponse(_)));
    assert!(err.to_string().contains("No text generated."));
}

#[tokio::test]
async fn test_null_response_is_an_error() {
    let generator = generator(MockProvider::new().with_chat_json(serde_json::Value::Null));
    let request = create_test_request("anything", ContentFormat::Caption);

    let err = generator.generate(&request, None).await.unwrap_err();
    assert!(matches!(err.kind(), SparkErrorKind::EmptyResponse(_)));
}

#[tokio::test]
async fn test_whitespace_response_is_an_empty_caption() {
    let generator = generator(MockProvider::new().with_chat_json(chat_response("   ")));
    let request = create_test_request("anything", ContentFormat::Caption);

    let content = generator.generate(&request, None).await.unwrap();
    assert_eq!(content.caption(), "");
    assert!(content.hashtags().is_empty());
    assert!(content.emojis().is_empty());
}

#[tokio::test]
async fn test_provider_error_propagates_without_retry() {
    let provider = MockProvider::new()
        .with_chat(Err(api_error(500, "Internal error")))
        .with_chat_json(chat_response(CAPTION_JSON));
    let generator = generator(provider);
    let request = create_test_request("anything", ContentFormat::Caption);

    let err = generator.generate(&request, None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.as_provider().and_then(|e| e.attempts), Some(1));
    assert_eq!(generator.provider().chat_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_caption_is_retried() {
    let provider = MockProvider::new()
        .with_chat(Err(rate_limited()))
        .with_chat(Err(rate_limited()))
        .with_chat(Err(rate_limited()))
        .with_chat_json(chat_response(CAPTION_JSON));
    let generator = generator(provider);
    let request = create_test_request("coffee in Paris", ContentFormat::Caption);

    let started = tokio::time::Instant::now();
    let content = generator.generate(&request, None).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(content, expected_caption());
    assert_eq!(generator.provider().chat_calls(), 4);
    assert!(elapsed >= Duration::from_secs(7));
    assert!(elapsed < Duration::from_secs(7) + Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhaustion_reports_attempts() {
    let provider = MockProvider::new()
        .with_chat(Err(rate_limited()))
        .with_chat(Err(rate_limited()))
        .with_chat(Err(rate_limited()))
        .with_chat(Err(rate_limited()));
    let generator = generator(provider);
    let request = create_test_request("coffee in Paris", ContentFormat::Caption);

    let err = generator.generate(&request, None).await.unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.as_provider().and_then(|e| e.attempts), Some(4));
    assert_eq!(generator.provider().chat_calls(), 4);
}

#[tokio::test]
async fn test_stream_accumulates_text_and_reasoning_tokens() {
    let provider = MockProvider::new().with_stream(vec![
        Ok(StreamChunk::delta("Hel")),
        Ok(StreamChunk::delta("lo")),
        Ok(StreamChunk::usage(StreamUsage {
            reasoning_tokens: Some(12),
            ..Default::default()
        })),
    ]);
    let generator = generator(provider);

    let mut stream = generator
        .stream_generate("say hello", None, StreamOptions::with_usage())
        .await
        .unwrap();

    let mut accumulator = StreamAccumulator::default();
    while let Some(chunk) = stream.next().await {
        accumulator.push(&chunk.unwrap());
    }

    assert_eq!(accumulator.output(), "Hello");
    assert_eq!(accumulator.reasoning_tokens(), Some(12));

    let provider = generator.provider();
    assert_eq!(provider.last_model().as_deref(), Some(GeneratorConfig::default().text_model().as_str()));
    assert_eq!(provider.last_stream_options(), Some(StreamOptions::with_usage()));
    let messages = provider.last_messages();
    assert_eq!(messages[0].content().as_text(), Some(STREAM_SYSTEM_PROMPT));
    assert_eq!(messages[1].content().as_text(), Some("say hello"));
}

#[tokio::test]
async fn test_stream_model_override() {
    let generator = generator(MockProvider::new().with_stream(vec![Ok(StreamChunk::delta("ok"))]));

    let stream = generator
        .stream_generate("hi", Some("openai/gpt-4o-mini"), StreamOptions::default())
        .await
        .unwrap();
    let items: Vec<_> = stream.collect().await;

    assert_eq!(items.len(), 1);
    assert_eq!(generator.provider().last_model().as_deref(), Some("openai/gpt-4o-mini"));
}

#[tokio::test]
async fn test_structured_reply_in_fragments() {
    let body = json!({
        "choices": [{
            "message": {
                "content": [
                    { "type": "text", "text": CAPTION_JSON }
                ]
            }
        }]
    });
    let generator = generator(MockProvider::new().with_chat_json(body));
    let request = create_test_request("coffee in Paris", ContentFormat::Caption);

    let content = generator.generate(&request, None).await.unwrap();
    assert_eq!(content, expected_caption());
}
