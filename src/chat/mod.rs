// Gateway module for chat - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod session;
mod transcript;
mod types;

// Public re-exports - the ONLY way to access chat functionality
pub use client::{ChatBackend, ChatError, HttpChatBackend};
#[cfg(test)]
pub use client::MockChatBackend;
pub use session::{ChatSession, Exchange, SessionState};
pub use transcript::Transcript;
pub use types::{ChatReply, ChatRequest, HistoryEntry, Message, MessageId, Origin};
