//! Conversation engine for Evo.
//!
//! Provides the role-tagged transcript model, the `Session` object that
//! mediates every remote model call, a Gemini API client with:
//! - Streaming (SSE) support
//! - Rollback of the user turn when a call fails
//! - Caller-driven rate-limit retry with linear backoff
//! - Stateless document-grounded Q&A
//! - Session save/load/list on disk

pub mod document;
pub mod gemini;
pub mod retry;
pub mod session;
pub mod streaming;

use async_trait::async_trait;

pub use document::answer_from_document;
pub use gemini::{GeminiClient, GeminiConfig};
pub use retry::{send_with_retry, RetryPolicy};
pub use session::{Session, SessionStore, Transcript, DEFAULT_INSTRUCTION};

/// The opaque request/response boundary to the hosted model provider.
///
/// Implementations receive the full transcript on every call (stateless
/// replay); the provider keeps no conversational state of its own.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_message(&self, turns: &[Turn]) -> Result<String, ChatError>;

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<String, ChatError>;
}

/// One role-tagged message unit in a conversation. Immutable once appended
/// to a transcript.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API error: {0}")]
    Api(String),
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("request timed out")]
    Timeout,
    #[error("session is busy with another request")]
    Busy,
    #[error("empty message")]
    EmptyMessage,
}
