//! Server-Sent Events (SSE) parsing for streamed model replies.
//!
//! The Gemini API streams responses as SSE when asked with `alt=sse`. The
//! line-level parser is kept separate from the network read so it can be
//! tested without a socket.

use futures_util::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::ChatError;

/// A single SSE event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The `event:` field, when the server sent one.
    pub event: Option<String>,
    /// Accumulated `data:` lines, newline-joined.
    pub data: String,
}

/// Incremental line-by-line SSE parser.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line from the wire. Returns a complete event when the line
    /// terminates one (the SSE blank-line separator).
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.take_event();
        }

        if let Some(event_type) = line.strip_prefix("event: ") {
            self.event = Some(event_type.to_string());
        } else if let Some(data) = line.strip_prefix("data: ") {
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data);
        }
        // Other fields (id:, retry:, comments) are ignored.
        None
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<SseEvent> {
        self.take_event()
    }

    fn take_event(&mut self) -> Option<SseEvent> {
        if self.data.is_empty() {
            self.event = None;
            return None;
        }
        Some(SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data),
        })
    }
}

/// Read a reqwest SSE response to completion, calling `on_event` per event.
pub async fn read_sse_stream(
    response: reqwest::Response,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), ChatError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();

    let mut parser = SseParser::new();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?
    {
        if let Some(event) = parser.feed_line(&line) {
            on_event(event);
        }
    }
    if let Some(event) = parser.finish() {
        on_event(event);
    }

    Ok(())
}
