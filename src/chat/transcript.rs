use super::types::{HistoryEntry, Message};
use crate::constants::WELCOME_MESSAGE;

/// Ordered, append-only list of chat messages
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_welcome(WELCOME_MESSAGE)
    }
}

impl Transcript {
    /// Start a transcript holding only the synthetic greeting
    pub fn with_welcome(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::welcome(text)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The `window` most recent conversational messages in the backend's
    /// `{role, content}` shape. The welcome greeting is never included.
    pub fn history(&self, window: usize) -> Vec<HistoryEntry> {
        let conversational: Vec<&Message> =
            self.messages.iter().filter(|m| !m.is_welcome).collect();
        let start = conversational.len().saturating_sub(window);
        conversational[start..]
            .iter()
            .map(|m| HistoryEntry::from(*m))
            .collect()
    }
}
