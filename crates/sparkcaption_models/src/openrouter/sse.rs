//! Incremental decoder for `text/event-stream` bodies.

/// A meaningful line of a server-sent event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload
    Data(String),
    /// The `data: [DONE]` terminator
    Done,
}

/// Splits arbitrary byte chunks into SSE events.
///
/// Bytes are buffered until a full line arrives, so UTF-8 sequences and
/// lines split across network chunks are handled. Comment lines (`:`),
/// blank separators and non-`data` fields are dropped.
///
/// # Examples
///
/// ```
/// use sparkcaption_models::{SseDecoder, SseEvent};
///
/// let mut decoder = SseDecoder::default();
/// assert!(decoder.push(b": OPENROUTER PROCESSING\n\ndata: {\"a\"").is_empty());
/// assert_eq!(
///     decoder.push(b":1}\n\ndata: [DONE]\n"),
///     vec![SseEvent::Data("{\"a\":1}".to_string()), SseEvent::Done]
/// );
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feeds bytes in, returning every event completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Flushes a final line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<SseEvent> {
        let line = std::mem::take(&mut self.buffer);
        parse_line(&line)
    }
}

fn parse_line(line: &[u8]) -> Option<SseEvent> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(['\n', '\r']);

    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    match payload.trim() {
        "" => None,
        "[DONE]" => Some(SseEvent::Done),
        _ => Some(SseEvent::Data(payload.to_string())),
    }
}
