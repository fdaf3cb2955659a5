//! Chat assistant conversation buffer.
//!
//! The buffer is append-only for the lifetime of the session. A send appends
//! the user turn immediately and hands back a [`ChatRequest`]; the reply (or
//! failure) is applied later with [`ChatSession::finish`].

use crate::analyst::AnalystError;
use crate::types::{ChatMessage, ChatRole};

/// Model-role text appended in place of a reply when the call fails.
pub const CHAT_FALLBACK: &str = "I encountered an error. Please try again.";

/// Everything the analyst needs to answer one user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub prompt: String,
    /// Prior user/model turns, oldest first. Never contains `thought` turns.
    pub history: Vec<ChatMessage>,
    /// Raises the model's reasoning budget for this reply only.
    pub thinking: bool,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    thinking: bool,
    pending: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a reply is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn thinking(&self) -> bool {
        self.thinking
    }

    pub fn toggle_thinking(&mut self) {
        self.thinking = !self.thinking;
    }

    /// Appends the user's turn and builds the request for it.
    ///
    /// Returns `None` without touching the buffer when `input` is blank or a
    /// previous reply is still pending.
    pub fn begin_send(&mut self, input: &str) -> Option<ChatRequest> {
        if input.trim().is_empty() || self.pending {
            return None;
        }
        let history = self
            .messages
            .iter()
            .filter(|m| m.role != ChatRole::Thought)
            .cloned()
            .collect();
        self.messages.push(ChatMessage::user(input));
        self.pending = true;
        Some(ChatRequest { prompt: input.to_owned(), history, thinking: self.thinking })
    }

    /// Applies the outcome of the outstanding request.
    ///
    /// Success appends the reply; any failure appends [`CHAT_FALLBACK`]. Either
    /// way exactly one model-role turn is added.
    pub fn finish(&mut self, outcome: Result<String, AnalystError>) {
        self.pending = false;
        match outcome {
            Ok(text) => self.messages.push(ChatMessage::model(text)),
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                self.messages.push(ChatMessage::model(CHAT_FALLBACK));
            }
        }
    }

    /// Records a reasoning trace for display. It is never sent as history.
    #[cfg(test)]
    pub(crate) fn push_thought(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage { role: ChatRole::Thought, text: text.into() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_appends_user_turn_before_reply() {
        let mut chat = ChatSession::new();
        let request = chat.begin_send("How is the lounge?").unwrap();
        assert!(request.history.is_empty());
        assert_eq!(chat.messages(), &[ChatMessage::user("How is the lounge?")]);
        assert!(chat.is_pending());
    }

    #[test]
    fn blank_and_concurrent_sends_are_ignored() {
        let mut chat = ChatSession::new();
        assert!(chat.begin_send("   ").is_none());
        assert!(chat.begin_send("first").is_some());
        assert!(chat.begin_send("second").is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn failure_appends_exactly_one_fallback() {
        let mut chat = ChatSession::new();
        chat.begin_send("hi").unwrap();
        chat.finish(Err(AnalystError::EmptyResponse));
        assert_eq!(
            chat.messages(),
            &[ChatMessage::user("hi"), ChatMessage::model(CHAT_FALLBACK)]
        );
        assert!(!chat.is_pending());
    }

    #[test]
    fn history_excludes_thoughts_and_new_prompt() {
        let mut chat = ChatSession::new();
        chat.begin_send("one").unwrap();
        chat.finish(Ok("reply one".to_owned()));
        chat.push_thought("internal");
        chat.toggle_thinking();
        let request = chat.begin_send("two").unwrap();
        assert_eq!(
            request.history,
            vec![ChatMessage::user("one"), ChatMessage::model("reply one")]
        );
        assert_eq!(request.prompt, "two");
        assert!(request.thinking);
    }
}
