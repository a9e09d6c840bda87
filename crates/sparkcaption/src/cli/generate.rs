//! Generate command handler.

use super::{GenerateArgs, load_config};
use sparkcaption::{GeneratedContent, GenerationRequest, Generator, ProgressFn};

/// Handles the generate command.
#[tracing::instrument(skip_all, fields(platform = %args.platform, format = %args.format))]
pub async fn handle_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(model) = args.model {
        config = config.with_text_model(model);
    }

    let generator = Generator::from_provider_config(config)?.with_visuals(args.with_visuals);
    let request = GenerationRequest::builder()
        .prompt(args.prompt)
        .platform(args.platform)
        .tone(args.tone)
        .length(args.length)
        .format(args.format)
        .build()?;

    let progress: &ProgressFn = &|status: &str| eprintln!("{}", status);
    let content = generator.generate(&request, Some(progress)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&content)?);
    } else {
        print_content(&content);
    }
    Ok(())
}

fn print_content(content: &GeneratedContent) {
    println!("{}", content.copy_text());
    if !content.emojis().is_empty() {
        println!("\nEmojis: {}", content.emojis().join(" "));
    }
    if let Some(url) = content.image_url() {
        println!("\nImage: {}", url);
    }
    if let Some(url) = content.video_url() {
        println!("\nVideo: {}", url);
    }
}
