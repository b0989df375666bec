use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::NO_ANSWER_MESSAGE;

/// Who authored a message in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

impl Origin {
    /// Role name understood by the chat backend
    pub fn as_role(&self) -> &'static str {
        match self {
            Origin::User => "user",
            Origin::Assistant => "assistant",
        }
    }
}

/// Unique message identifier.
///
/// Millisecond timestamp in the high bits, per-process sequence in the low
/// bits, so two messages created in the same millisecond still differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(u64);

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl MessageId {
    pub fn next() -> Self {
        let millis = Local::now().timestamp_millis().max(0) as u64;
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
        Self((millis << 16) | seq)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One committed turn of the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub origin: Origin,
    pub created_at: DateTime<Local>,
    /// Synthetic greeting shown at session start; never sent to the backend
    pub is_welcome: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text.into(), false)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Origin::Assistant, text.into(), false)
    }

    pub fn welcome(text: impl Into<String>) -> Self {
        Self::new(Origin::Assistant, text.into(), true)
    }

    fn new(origin: Origin, text: String, is_welcome: bool) -> Self {
        Self {
            id: MessageId::next(),
            text,
            origin,
            created_at: Local::now(),
            is_welcome,
        }
    }
}

/// A prior turn as carried in the request's `messages` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.origin.as_role().to_string(),
            content: message.text.clone(),
        }
    }
}

/// Body of `POST /api/v1/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub top_k: u32,
    pub messages: Vec<HistoryEntry>,
}

/// Successful response from the chat backend.
///
/// `answer` stays optional: a 2xx body without it still counts as a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub context_sources: Vec<String>,
}

impl ChatReply {
    /// Read a 2xx body leniently.
    ///
    /// Any JSON value is accepted: a missing, null or non-string `answer`
    /// leaves `answer` empty, and `context_sources` keeps only its string
    /// entries.
    pub fn from_value(body: &Value) -> Self {
        let answer = body.get("answer").and_then(Value::as_str).map(str::to_string);
        let context_sources = body
            .get("context_sources")
            .and_then(Value::as_array)
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|s| s.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            answer,
            context_sources,
        }
    }

    /// Text to show for this reply, substituting a placeholder for an absent or empty answer
    pub fn display_text(&self) -> &str {
        match self.answer.as_deref() {
            Some(answer) if !answer.is_empty() => answer,
            _ => NO_ANSWER_MESSAGE,
        }
    }
}
