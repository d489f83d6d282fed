//! Async send methods for `Session` (plain + streaming).

use tracing::debug;

use crate::{ChatClient, ChatError};

use super::manager::Session;
use super::types::BusyGuard;

/// Placeholder reply when the provider returns empty text. A soft
/// condition, not an error: the exchange still counts as answered.
const NO_RESPONSE: &str = "(no response)";

impl Session {
    /// Append a user turn, issue exactly one remote call carrying the full
    /// transcript, and append the assistant's reply.
    ///
    /// On failure the user turn is rolled back, so the transcript returns
    /// to its last well-formed state and the next `send` never carries two
    /// consecutive user turns. Empty input is rejected before anything is
    /// appended or sent.
    pub async fn send(
        &mut self,
        client: &dyn ChatClient,
        user_text: impl AsRef<str>,
    ) -> Result<String, ChatError> {
        let user_text = user_text.as_ref().trim();
        if user_text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let _guard = BusyGuard::acquire(&self.busy)?;

        self.transcript.push_user(user_text);
        debug!(model = %self.model, turns = self.transcript.len(), "sending user turn");

        match client.send_message(self.transcript.turns()).await {
            Ok(reply) => {
                let reply = normalize_reply(reply);
                self.transcript.push_assistant(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                self.transcript.pop_user();
                Err(e)
            }
        }
    }

    /// Same contract as [`Session::send`], delivering chunks through
    /// `on_chunk` as they arrive.
    pub async fn send_streaming(
        &mut self,
        client: &dyn ChatClient,
        user_text: impl AsRef<str>,
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<String, ChatError> {
        let user_text = user_text.as_ref().trim();
        if user_text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let _guard = BusyGuard::acquire(&self.busy)?;

        self.transcript.push_user(user_text);
        debug!(model = %self.model, turns = self.transcript.len(), "sending user turn (streaming)");

        match client
            .send_message_streaming(self.transcript.turns(), on_chunk)
            .await
        {
            Ok(reply) => {
                let reply = normalize_reply(reply);
                self.transcript.push_assistant(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                self.transcript.pop_user();
                Err(e)
            }
        }
    }
}

fn normalize_reply(reply: String) -> String {
    if reply.trim().is_empty() {
        NO_RESPONSE.to_string()
    } else {
        reply
    }
}
