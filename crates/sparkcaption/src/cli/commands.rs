//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use sparkcaption::{ContentFormat, Length, Platform, Tone};
use std::path::PathBuf;

/// Command-line arguments for sparkcaption.
#[derive(Parser, Debug)]
#[command(name = "sparkcaption")]
#[command(about = "Platform-aware social media captions from hosted LLMs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a caption with hashtags and emojis
    Generate(GenerateArgs),
    /// Stream a free-form response to stdout
    Stream(StreamArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What the content is about
    #[arg(short, long)]
    pub prompt: String,

    /// Target platform (instagram, twitter, linkedin, tiktok, general)
    #[arg(long, default_value_t = Platform::default())]
    pub platform: Platform,

    /// Voice of the copy
    #[arg(long, default_value_t = Tone::default())]
    pub tone: Tone,

    /// Caption length (short, medium, long)
    #[arg(long, default_value_t = Length::default())]
    pub length: Length,

    /// What the caption accompanies (caption, post, video)
    #[arg(long, default_value_t = ContentFormat::default())]
    pub format: ContentFormat,

    /// Override the text model
    #[arg(long)]
    pub model: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Provider configuration file (TOML); defaults to the environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generate an image for posts
    #[arg(long)]
    pub with_visuals: bool,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Prompt to send
    pub prompt: String,

    /// Override the text model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Do not request a usage summary at the end of the stream
    #[arg(long)]
    pub no_usage: bool,

    /// Provider configuration file (TOML); defaults to the environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["sparkcaption", "generate", "--prompt", "coffee in Paris"])
            .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.prompt, "coffee in Paris");
        assert_eq!(args.platform, Platform::Instagram);
        assert_eq!(args.tone, Tone::Casual);
        assert_eq!(args.length, Length::Medium);
        assert_eq!(args.format, ContentFormat::Caption);
        assert!(!args.json);
        assert!(!args.with_visuals);
    }

    #[test]
    fn test_generate_options_parse_case_insensitively() {
        let cli = Cli::try_parse_from([
            "sparkcaption",
            "generate",
            "-p",
            "launch",
            "--platform",
            "x",
            "--tone",
            "FUNNY",
            "--format",
            "post",
            "--with-visuals",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.platform, Platform::Twitter);
        assert_eq!(args.tone, Tone::Funny);
        assert_eq!(args.format, ContentFormat::Post);
        assert!(args.with_visuals);
    }

    #[test]
    fn test_stream_args() {
        let cli = Cli::try_parse_from(["sparkcaption", "stream", "hello", "--no-usage"]).unwrap();
        let Commands::Stream(args) = cli.command else {
            panic!("expected stream");
        };
        assert_eq!(args.prompt, "hello");
        assert!(args.no_usage);
        assert!(args.model.is_none());
    }

    #[test]
    fn test_unknown_platform_rejected() {
        assert!(Cli::try_parse_from(["sparkcaption", "generate", "-p", "x", "--platform", "myspace"]).is_err());
    }
}
