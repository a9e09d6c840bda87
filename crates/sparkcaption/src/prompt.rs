//! Prompt construction for caption and streaming calls.

use sparkcaption_core::{ChatMessage, ContentFormat, GenerationRequest, Length};

/// System instruction for caption calls. Demands strict JSON.
pub const CAPTION_SYSTEM_PROMPT: &str = "You are SparkCaption AI. Respond with JSON matching: \
{\"caption\": string, \"hashtags\": string[], \"emojis\": string[]}. Output ONLY the JSON.";

/// System instruction for free-form streaming calls.
pub const STREAM_SYSTEM_PROMPT: &str = "You are SparkCaption AI. You may stream reasoning tokens.";

fn task_description(format: ContentFormat) -> &'static str {
    match format {
        ContentFormat::Video => "video caption",
        ContentFormat::Post => "post caption",
        ContentFormat::Caption => "caption for existing image",
    }
}

fn style_guideline(format: ContentFormat) -> &'static str {
    match format {
        ContentFormat::Video => "Short, punchy, matches a fast-paced video.",
        ContentFormat::Post | ContentFormat::Caption => "Complements the visual.",
    }
}

fn length_guideline(length: Length) -> &'static str {
    match length {
        Length::Short => "Keep it to one or two sentences.",
        Length::Medium => "A short paragraph.",
        Length::Long => "Two or three paragraphs, story-driven.",
    }
}

/// The user-facing instruction for one request.
///
/// # Examples
///
/// ```
/// use sparkcaption::{GenerationRequest, caption_instruction};
///
/// let request = GenerationRequest::builder().prompt("coffee in Paris").build().unwrap();
/// let instruction = caption_instruction(&request);
/// assert!(instruction.contains("Context: \"coffee in Paris\""));
/// assert!(instruction.contains("Platform: Instagram"));
/// ```
pub fn caption_instruction(request: &GenerationRequest) -> String {
    let format = *request.format();
    format!(
        "You are an expert Social Media Manager.\n\
         Task: Create a {task}.\n\
         Context: \"{prompt}\"\n\
         Platform: {platform}\n\
         Tone: {tone}\n\
         Length: {length} ({length_hint})\n\n\
         Guidelines:\n\
         - Engaging and native to the platform.\n\
         - {style}\n\
         - Include 6-10 relevant hashtags.",
        task = task_description(format),
        prompt = request.prompt().trim(),
        platform = request.platform(),
        tone = request.tone(),
        length = request.length(),
        length_hint = length_guideline(*request.length()),
        style = style_guideline(format),
    )
}

/// System and user messages for a caption call.
pub fn caption_messages(request: &GenerationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CAPTION_SYSTEM_PROMPT),
        ChatMessage::user(caption_instruction(request)),
    ]
}

/// System and user messages for a streaming call.
pub fn stream_messages(prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(STREAM_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

/// Prompt sent to the image model for a post.
pub fn image_prompt(request: &GenerationRequest) -> String {
    format!(
        "Create a {tone} social media image for {platform}. Subject: {prompt}",
        tone = request.tone().to_string().to_lowercase(),
        platform = request.platform(),
        prompt = request.prompt().trim(),
    )
}
