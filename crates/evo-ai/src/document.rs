//! Stateless document-grounded Q&A.
//!
//! Builds a one-off two-turn exchange scoped to a loaded document and
//! discards it after the single call. The caller's running session is
//! never touched, so document answers leave conversational memory intact.

use crate::{ChatClient, ChatError, Turn};

const DOCUMENT_INSTRUCTION: &str =
    "Answer using only the provided document. If not found, say so.";

/// Ask one question against a document. Returns the reply text; an empty
/// reply becomes the literal `(no response)` placeholder, matching the
/// session contract.
pub async fn answer_from_document(
    client: &dyn ChatClient,
    doc_name: &str,
    doc_text: &str,
    question: &str,
) -> Result<String, ChatError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let turns = vec![
        Turn::system(DOCUMENT_INSTRUCTION),
        Turn::user(format!(
            "Use this document as context (file: {doc_name}):\n\n{doc_text}\n\nUser question: {question}"
        )),
    ];

    let reply = client.send_message(&turns).await?;
    if reply.trim().is_empty() {
        Ok("(no response)".to_string())
    } else {
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::Role;

    /// Records what it was asked, answers with a fixed reply.
    struct RecordingClient {
        seen: Mutex<Vec<Vec<Turn>>>,
        reply: String,
    }

    #[async_trait]
    impl ChatClient for RecordingClient {
        async fn send_message(&self, turns: &[Turn]) -> Result<String, ChatError> {
            self.seen.lock().unwrap().push(turns.to_vec());
            Ok(self.reply.clone())
        }

        async fn send_message_streaming(
            &self,
            turns: &[Turn],
            _on_chunk: Box<dyn Fn(String) + Send + Sync>,
        ) -> Result<String, ChatError> {
            self.send_message(turns).await
        }
    }

    #[tokio::test]
    async fn builds_a_two_turn_exchange_with_document_context() {
        let client = RecordingClient {
            seen: Mutex::new(Vec::new()),
            reply: "It says hello.".into(),
        };

        let reply = answer_from_document(&client, "notes.txt", "hello world", "What does it say?")
            .await
            .unwrap();
        assert_eq!(reply, "It says hello.");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let turns = &seen[0];
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[0].content, DOCUMENT_INSTRUCTION);
        assert_eq!(turns[1].role, Role::User);
        assert!(turns[1].content.contains("(file: notes.txt)"));
        assert!(turns[1].content.contains("hello world"));
        assert!(turns[1].content.contains("User question: What does it say?"));
    }

    #[tokio::test]
    async fn leaves_the_running_session_untouched() {
        let client = RecordingClient {
            seen: Mutex::new(Vec::new()),
            reply: "answer".into(),
        };
        let session = crate::Session::new("role", "m");
        let before = session.turns().to_vec();

        answer_from_document(&client, "doc.txt", "text", "question")
            .await
            .unwrap();

        assert_eq!(session.turns(), &before[..]);
    }

    #[tokio::test]
    async fn empty_question_is_rejected_before_the_call() {
        let client = RecordingClient {
            seen: Mutex::new(Vec::new()),
            reply: "unused".into(),
        };
        let err = answer_from_document(&client, "doc.txt", "text", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_reply_becomes_placeholder() {
        let client = RecordingClient {
            seen: Mutex::new(Vec::new()),
            reply: "  ".into(),
        };
        let reply = answer_from_document(&client, "doc.txt", "text", "question")
            .await
            .unwrap();
        assert_eq!(reply, "(no response)");
    }
}
