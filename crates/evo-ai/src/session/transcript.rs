//! The ordered sequence of turns belonging to one conversation.
//!
//! Invariants:
//! - Index 0, if present, holds the sole system turn.
//! - All other turns alternate user/assistant starting with user.
//! - Appending is the only mutation; the system turn's content may only be
//!   replaced wholesale, which truncates everything after it.

use crate::{Role, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// A transcript holding only the system turn.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(instruction)],
        }
    }

    /// Rebuild from previously exported turns (session load).
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Read-only snapshot in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Content of the system turn, if the transcript has one.
    pub fn instruction(&self) -> Option<&str> {
        match self.turns.first() {
            Some(turn) if turn.role == Role::System => Some(&turn.content),
            _ => None,
        }
    }

    pub(crate) fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub(crate) fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Remove the trailing user turn after a failed remote call, restoring
    /// the last well-formed state. A no-op if the last turn is not a user
    /// turn.
    pub(crate) fn pop_user(&mut self) {
        if matches!(self.turns.last(), Some(turn) if turn.role == Role::User) {
            self.turns.pop();
        }
    }

    /// Drop all non-system turns, keeping the instruction.
    pub fn reset(&mut self) {
        self.turns.retain(|turn| turn.role == Role::System);
    }

    /// Replace the system turn wholesale. This always truncates back to
    /// just the system turn.
    pub fn replace_instruction(&mut self, instruction: impl Into<String>) {
        self.turns = vec![Turn::system(instruction)];
    }

    /// True when the turns after the system turn strictly alternate
    /// user/assistant starting with user.
    pub fn is_well_formed(&self) -> bool {
        let body = match self.turns.first() {
            Some(turn) if turn.role == Role::System => &self.turns[1..],
            _ => &self.turns[..],
        };
        if body.iter().any(|turn| turn.role == Role::System) {
            return false;
        }
        body.iter().enumerate().all(|(i, turn)| {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            turn.role == expected
        })
    }
}
