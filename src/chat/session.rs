use std::ops::{Deref, DerefMut};
use std::time::Instant;
use tracing::{info, warn};

use super::client::{ChatBackend, ChatError};
use super::transcript::Transcript;
use super::types::{ChatReply, ChatRequest, Message};
use crate::app::ChatConfig;
use crate::constants::{DEFAULT_HISTORY_WINDOW, DEFAULT_TOP_K, UNAVAILABLE_MESSAGE};

/// Request lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting,
}

/// The single request a session may have outstanding
#[derive(Debug)]
struct InFlight {
    request: ChatRequest,
    started: Instant,
}

/// One completed round trip: what was asked and what got appended
#[derive(Debug, Clone)]
pub struct Exchange {
    pub request: ChatRequest,
    pub reply: Message,
    pub sources: Vec<String>,
    /// Failure detail when the reply is the unavailability fallback
    pub error: Option<String>,
    pub duration_ms: u128,
}

/// Conversation state behind the chat widget
#[derive(Debug)]
pub struct ChatSession {
    transcript: Transcript,
    input: String,
    in_flight: Option<InFlight>,
    top_k: u32,
    history_window: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K, DEFAULT_HISTORY_WINDOW)
    }
}

impl ChatSession {
    pub fn new(top_k: u32, history_window: usize) -> Self {
        Self {
            transcript: Transcript::default(),
            input: String::new(),
            in_flight: None,
            top_k,
            history_window,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.top_k, config.history_window)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.is_some() {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }

    pub fn is_awaiting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Pending, uncommitted input
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// True when submitting now would send something
    pub fn can_submit(&self) -> bool {
        !self.is_awaiting() && !self.input.trim().is_empty()
    }

    /// Commit the pending input buffer. See [`ChatSession::begin`].
    pub fn begin_from_input(&mut self) -> Option<ChatRequest> {
        let raw = self.input.clone();
        self.begin(&raw)
    }

    /// Synchronous half of a submission.
    ///
    /// Appends the user's message, clears the input buffer and marks the
    /// session as awaiting. Returns the request to send, or `None` when the
    /// trimmed text is empty or a request is already outstanding; in both
    /// cases nothing is mutated.
    pub fn begin(&mut self, raw: &str) -> Option<ChatRequest> {
        let text = raw.trim();
        if text.is_empty() || self.in_flight.is_some() {
            return None;
        }

        // History is taken before the new message lands in the transcript
        let request = ChatRequest {
            message: text.to_string(),
            top_k: self.top_k,
            messages: self.transcript.history(self.history_window),
        };

        self.transcript.push(Message::user(text));
        self.input.clear();
        self.in_flight = Some(InFlight {
            request: request.clone(),
            started: Instant::now(),
        });

        info!("💬 Sending question ({} chars, {} prior turns)", text.len(), request.messages.len());
        Some(request)
    }

    /// Asynchronous half of a submission: apply the backend outcome.
    ///
    /// Appends exactly one assistant message and returns the session to idle.
    /// Returns `None` if nothing was outstanding.
    pub fn resolve(&mut self, outcome: Result<ChatReply, ChatError>) -> Option<Exchange> {
        let Some(in_flight) = self.in_flight.as_ref() else {
            warn!("⚠️ Ignoring chat response with no request outstanding");
            return None;
        };
        let request = in_flight.request.clone();
        let duration_ms = in_flight.started.elapsed().as_millis();

        let (reply, sources, error) = match outcome {
            Ok(reply) => {
                let message = Message::assistant(reply.display_text());
                (message, reply.context_sources, None)
            }
            Err(e) => {
                warn!("❌ Chat request failed: {}", e);
                (Message::assistant(UNAVAILABLE_MESSAGE), Vec::new(), Some(e.to_string()))
            }
        };

        self.transcript.push(reply.clone());
        self.in_flight = None;

        Some(Exchange {
            request,
            reply,
            sources,
            error,
            duration_ms,
        })
    }

    /// Submit `raw` and wait for the backend in one call.
    ///
    /// The awaiting state is released by a guard, so it clears on every exit
    /// path including a dropped future or a panicking backend.
    pub async fn submit<B>(&mut self, raw: &str, backend: &B) -> Option<Exchange>
    where
        B: ChatBackend + ?Sized,
    {
        let request = self.begin(raw)?;
        let mut guard = AwaitingGuard { session: self };
        let outcome = backend.send(&request).await;
        guard.resolve(outcome)
    }
}

/// Clears the in-flight slot when dropped
struct AwaitingGuard<'a> {
    session: &'a mut ChatSession,
}

impl Deref for AwaitingGuard<'_> {
    type Target = ChatSession;

    fn deref(&self) -> &ChatSession {
        self.session
    }
}

impl DerefMut for AwaitingGuard<'_> {
    fn deref_mut(&mut self) -> &mut ChatSession {
        self.session
    }
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::client::MockChatBackend;
    use crate::chat::types::{HistoryEntry, Origin};
    use crate::constants::NO_ANSWER_MESSAGE;
    use pretty_assertions::assert_eq;

    fn answer(text: &str) -> Result<ChatReply, ChatError> {
        Ok(ChatReply {
            answer: Some(text.to_string()),
            context_sources: vec![],
        })
    }

    fn texts(session: &ChatSession) -> Vec<(Origin, String)> {
        session
            .transcript()
            .messages()
            .iter()
            .map(|m| (m.origin, m.text.clone()))
            .collect()
    }

    #[test]
    fn test_initial_transcript_is_welcome_only() {
        let session = ChatSession::default();
        let messages = session.transcript().messages();

        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_welcome);
        assert_eq!(messages[0].origin, Origin::Assistant);
        assert!(messages[0].text.starts_with("Hi! I'm Mohamed Dhia Betis's AI assistant"));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_whitespace_input_is_noop() {
        let mut backend = MockChatBackend::new();
        backend.expect_send().times(0);

        let mut session = ChatSession::default();
        session.set_input("   ");
        for raw in ["", "   ", "\n\t ", "\u{3000}"] {
            assert!(session.submit(raw, &backend).await.is_none());
        }

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.input(), "   ");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_begin_appends_user_message_before_network() {
        let mut session = ChatSession::default();
        session.set_input("  What are his skills?  ");

        let request = session.begin_from_input().unwrap();

        assert_eq!(
            request,
            ChatRequest {
                message: "What are his skills?".to_string(),
                top_k: 6,
                messages: vec![],
            }
        );
        let last = session.transcript().last().unwrap();
        assert_eq!(last.origin, Origin::User);
        assert_eq!(last.text, "What are his skills?");
        assert!(!last.is_welcome);
        assert_eq!(session.input(), "");
        assert!(session.is_awaiting());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_second_submission_rejected_while_awaiting() {
        let mut session = ChatSession::default();
        assert!(session.begin("first").is_some());
        assert!(session.begin("second").is_none());
        assert_eq!(session.transcript().len(), 2);

        session.resolve(answer("ok"));
        assert!(session.begin("second").is_some());
    }

    #[test]
    fn test_resolve_without_request_is_ignored() {
        let mut session = ChatSession::default();
        assert!(session.resolve(answer("stray")).is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_send()
            .withf(|req| {
                req.message == "What are his skills?" && req.top_k == 6 && req.messages.is_empty()
            })
            .times(1)
            .returning(|_| answer("Python, ML, NLP..."));

        let mut session = ChatSession::default();
        let exchange = session.submit("What are his skills?", &backend).await.unwrap();

        assert_eq!(exchange.reply.text, "Python, ML, NLP...");
        assert!(exchange.error.is_none());
        assert_eq!(
            texts(&session)[1..].to_vec(),
            vec![
                (Origin::User, "What are his skills?".to_string()),
                (Origin::Assistant, "Python, ML, NLP...".to_string()),
            ]
        );
        assert!(!session.is_awaiting());
    }

    #[tokio::test]
    async fn test_server_error_yields_fallback() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_send()
            .times(1)
            .returning(|_| Err(ChatError::Status(500)));

        let mut session = ChatSession::default();
        let exchange = session.submit("hello", &backend).await.unwrap();

        assert_eq!(exchange.reply.text, UNAVAILABLE_MESSAGE);
        assert!(exchange.error.is_some());
        assert_eq!(
            texts(&session)[1..].to_vec(),
            vec![
                (Origin::User, "hello".to_string()),
                (Origin::Assistant, UNAVAILABLE_MESSAGE.to_string()),
            ]
        );
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_repeated_failures_use_identical_fallback() {
        let mut backend = MockChatBackend::new();
        let mut calls = 0;
        backend.expect_send().times(3).returning(move |_| {
            calls += 1;
            match calls {
                1 => Err(ChatError::Transport("dns".to_string())),
                2 => Err(ChatError::Status(503)),
                _ => Err(ChatError::Decode("eof".to_string())),
            }
        });

        let mut session = ChatSession::default();
        for q in ["a", "b", "c"] {
            session.submit(q, &backend).await;
        }

        let replies: Vec<&str> = session
            .transcript()
            .messages()
            .iter()
            .skip(1)
            .filter(|m| m.origin == Origin::Assistant)
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(replies, vec![UNAVAILABLE_MESSAGE; 3]);
    }

    #[tokio::test]
    async fn test_empty_answer_substituted() {
        let mut backend = MockChatBackend::new();
        backend.expect_send().times(2).returning(|req| {
            if req.message == "blank" {
                answer("")
            } else {
                Ok(ChatReply::default())
            }
        });

        let mut session = ChatSession::default();
        let blank = session.submit("blank", &backend).await.unwrap();
        let missing = session.submit("missing", &backend).await.unwrap();

        assert_eq!(blank.reply.text, NO_ANSWER_MESSAGE);
        assert_eq!(missing.reply.text, NO_ANSWER_MESSAGE);
        assert!(blank.error.is_none());
    }

    #[tokio::test]
    async fn test_each_submit_grows_transcript_by_two() {
        let mut backend = MockChatBackend::new();
        backend.expect_send().returning(|req| {
            if req.message.contains("fail") {
                Err(ChatError::Status(500))
            } else {
                answer("fine")
            }
        });

        let mut session = ChatSession::default();
        for (i, q) in ["one", "fail two", "three"].iter().enumerate() {
            session.submit(q, &backend).await;
            assert_eq!(session.transcript().len(), 1 + 2 * (i + 1));
            assert!(!session.is_awaiting());
        }
    }

    #[tokio::test]
    async fn test_history_window_after_five_exchanges() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_send()
            .returning(|req| answer(&format!("answer to {}", req.message)));

        let mut session = ChatSession::default();
        for i in 1..=5 {
            session.submit(&format!("question {}", i), &backend).await;
        }
        assert_eq!(session.transcript().len(), 11);

        let request = session.begin("question 6").unwrap();
        assert_eq!(
            request.messages,
            vec![
                HistoryEntry {
                    role: "assistant".to_string(),
                    content: "answer to question 4".to_string(),
                },
                HistoryEntry {
                    role: "user".to_string(),
                    content: "question 5".to_string(),
                },
                HistoryEntry {
                    role: "assistant".to_string(),
                    content: "answer to question 5".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_history_never_exceeds_window() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_send()
            .withf(|req| req.messages.len() <= 3)
            .returning(|_| answer("ok"));

        let mut session = ChatSession::default();
        for i in 0..6 {
            session.submit(&format!("q{}", i), &backend).await;
        }
        assert_eq!(session.transcript().len(), 13);
    }

    #[tokio::test]
    async fn test_guard_clears_awaiting_when_future_dropped() {
        struct Stalled;

        #[async_trait::async_trait]
        impl ChatBackend for Stalled {
            async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, ChatError> {
                futures::future::pending().await
            }

            fn endpoint(&self) -> String {
                "stalled".to_string()
            }
        }

        let mut session = ChatSession::default();
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            session.submit("hello", &Stalled),
        )
        .await;

        assert!(result.is_err());
        assert!(!session.is_awaiting());
        assert_eq!(session.transcript().len(), 2);
    }
}
