//! Conversation session management.
//!
//! A `Session` owns one `Transcript` and mediates every call to the remote
//! model, enforcing alternation and rollback-on-failure.

mod chat;
mod manager;
mod store;
mod transcript;
mod types;

pub use manager::{Session, DEFAULT_INSTRUCTION};
pub use store::SessionStore;
pub use transcript::Transcript;
