//! Session struct and lifecycle operations.

use std::sync::atomic::AtomicBool;

use crate::Turn;

use super::transcript::Transcript;

/// Instruction used when the caller supplies a blank one.
pub const DEFAULT_INSTRUCTION: &str =
    "You are a helpful assistant. Keep replies short, clear, and friendly.";

/// The owning object pairing a transcript with a model identifier.
///
/// One session is one conversation. "New chat" and model changes construct
/// a fresh `Session` rather than mutating the old one, so differently
/// configured conversations can never cross-contaminate.
pub struct Session {
    /// The conversation transcript, system turn first.
    pub(super) transcript: Transcript,
    /// Opaque model identifier, validated only at call time.
    pub(super) model: String,
    /// Whether a remote call is currently in flight.
    pub(super) busy: AtomicBool,
}

impl Session {
    /// Create a session whose transcript holds exactly one system turn.
    /// A blank instruction falls back to [`DEFAULT_INSTRUCTION`].
    pub fn new(instruction: impl AsRef<str>, model: impl Into<String>) -> Self {
        let instruction = match instruction.as_ref().trim() {
            "" => DEFAULT_INSTRUCTION,
            other => other,
        };
        Self {
            transcript: Transcript::new(instruction),
            model: model.into(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The current system turn content.
    pub fn instruction(&self) -> &str {
        self.transcript.instruction().unwrap_or(DEFAULT_INSTRUCTION)
    }

    /// Read-only snapshot of the transcript in insertion order.
    pub fn turns(&self) -> &[Turn] {
        self.transcript.turns()
    }

    /// Clear memory: drop all non-system turns, keep instruction and model.
    pub fn reset(&mut self) {
        self.transcript.reset();
    }

    /// Replace the system turn. Roles and history are coupled: changing the
    /// instruction always resets memory. A blank instruction falls back to
    /// [`DEFAULT_INSTRUCTION`].
    pub fn replace_instruction(&mut self, instruction: impl AsRef<str>) {
        let instruction = match instruction.as_ref().trim() {
            "" => DEFAULT_INSTRUCTION,
            other => other,
        };
        self.transcript.replace_instruction(instruction);
    }

    /// Replace the transcript with previously saved turns (session load).
    /// Callers validate the turns first; see [`super::SessionStore`].
    pub fn restore(&mut self, turns: Vec<Turn>) {
        self.transcript = Transcript::from_turns(turns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, Turn};

    #[test]
    fn create_yields_single_system_turn() {
        let session = Session::new("You are Evo.", "gemini-2.0-flash");
        assert_eq!(session.turns(), &[Turn::system("You are Evo.")]);
        assert_eq!(session.model(), "gemini-2.0-flash");
    }

    #[test]
    fn blank_instruction_falls_back_to_default() {
        let session = Session::new("   ", "gemini-2.0-flash");
        assert_eq!(session.instruction(), DEFAULT_INSTRUCTION);
    }

    #[test]
    fn reset_on_fresh_session_is_a_noop() {
        let mut session = Session::new("role", "m");
        session.reset();
        session.reset();
        assert_eq!(session.turns(), &[Turn::system("role")]);
    }

    #[test]
    fn replace_instruction_resets_memory() {
        let mut session = Session::new("old", "m");
        session.transcript.push_user("Hi");
        session.transcript.push_assistant("Hello!");
        session.replace_instruction("new");
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].content, "new");
        assert_eq!(session.turns()[0].role, Role::System);
    }

    #[test]
    fn restore_replaces_transcript_and_instruction() {
        let mut session = Session::new("old", "m");
        session.restore(vec![
            Turn::system("saved role"),
            Turn::user("Hi"),
            Turn::assistant("Hello!"),
        ]);
        assert_eq!(session.instruction(), "saved role");
        assert_eq!(session.turns().len(), 3);
    }
}
