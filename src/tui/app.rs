use std::sync::Arc;

use super::input::InputAction;
use crate::app::Config;
use crate::chat::{ChatBackend, ChatError, ChatReply, ChatRequest, ChatSession, Exchange};
use crate::constants::UI_SCROLL_LINES;

/// Application state for the chat window
pub struct App {
    /// Conversation state
    pub session: ChatSession,
    /// Backend the spawned request tasks talk to
    pub backend: Arc<dyn ChatBackend>,
    /// Is the app running?
    pub running: bool,
    /// Chat panel visibility. Independent of the session: hiding the panel
    /// never cancels an outstanding request.
    pub panel_open: bool,
    /// Lines scrolled up from the bottom of the transcript
    pub scroll_offset: u16,
    /// Name shown in the header
    pub assistant_name: String,
    /// Show message times
    pub show_timestamps: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new app instance
    pub fn new(config: &Config, backend: impl ChatBackend + 'static) -> Self {
        Self {
            session: ChatSession::from_config(&config.chat),
            backend: Arc::new(backend),
            running: true,
            panel_open: true,
            scroll_offset: 0,
            assistant_name: config.ui.assistant_name.clone(),
            show_timestamps: config.ui.show_timestamps,
            status_message: None,
        }
    }

    /// Apply one input action. Returns a request when one must be dispatched.
    pub fn handle_action(&mut self, action: InputAction) -> Option<ChatRequest> {
        match action {
            InputAction::Quit => self.quit(),
            InputAction::TogglePanel => self.toggle_panel(),
            InputAction::ScrollUp => self.scroll_up(UI_SCROLL_LINES),
            InputAction::ScrollDown => self.scroll_down(UI_SCROLL_LINES),
            // Input is disabled while an answer is pending
            _ if self.session.is_awaiting() || !self.panel_open => {}
            InputAction::Insert(c) => self.session.push_input(c),
            InputAction::Delete => self.session.pop_input(),
            InputAction::Submit => {
                let request = self.session.begin_from_input()?;
                self.scroll_offset = 0;
                self.set_status("Waiting for the assistant...");
                return Some(request);
            }
            InputAction::None => {}
        }
        None
    }

    /// Apply the outcome of a dispatched request
    pub fn apply(&mut self, outcome: Result<ChatReply, ChatError>) -> Option<Exchange> {
        let exchange = self.session.resolve(outcome)?;
        self.scroll_offset = 0;
        match &exchange.error {
            Some(_) => self.set_status("Assistant unavailable"),
            None => self.set_status(format!("Answered in {}ms", exchange.duration_ms)),
        }
        Some(exchange)
    }

    /// Toggle chat panel visibility
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Scroll chat view up, bounded by the transcript's line count
    pub fn scroll_up(&mut self, amount: u16) {
        let total_lines: usize = self
            .session
            .transcript()
            .messages()
            .iter()
            // role line + content + blank separator
            .map(|m| m.text.lines().count() + 2)
            .sum();
        let max_scroll = u16::try_from(total_lines).unwrap_or(u16::MAX);

        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
    }

    /// Scroll chat view down
    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{MockChatBackend, Origin};
    use crate::constants::UNAVAILABLE_MESSAGE;

    fn app() -> App {
        App::new(&Config::default(), MockChatBackend::new())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(InputAction::Insert(c));
        }
    }

    #[test]
    fn test_submit_dispatches_request_and_locks_input() {
        let mut app = app();
        type_text(&mut app, "hello");

        let request = app.handle_action(InputAction::Submit).unwrap();
        assert_eq!(request.message, "hello");
        assert!(app.session.is_awaiting());

        // Typing and submitting are ignored until the answer arrives
        type_text(&mut app, "more");
        assert_eq!(app.session.input(), "");
        assert!(app.handle_action(InputAction::Submit).is_none());
        assert_eq!(app.session.transcript().len(), 2);
    }

    #[test]
    fn test_blank_submit_does_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        assert!(app.handle_action(InputAction::Submit).is_none());
        assert_eq!(app.session.transcript().len(), 1);
        assert_eq!(app.session.input(), "   ");
    }

    #[test]
    fn test_response_applied_while_panel_hidden() {
        let mut app = app();
        type_text(&mut app, "hello");
        app.handle_action(InputAction::Submit).unwrap();

        app.handle_action(InputAction::TogglePanel);
        assert!(!app.panel_open);

        let exchange = app.apply(Err(ChatError::Status(500))).unwrap();
        assert_eq!(exchange.reply.text, UNAVAILABLE_MESSAGE);
        assert!(!app.session.is_awaiting());

        let last = app.session.transcript().last().unwrap();
        assert_eq!(last.origin, Origin::Assistant);
        assert_eq!(app.status_message.as_deref(), Some("Assistant unavailable"));
    }

    #[test]
    fn test_scroll_bounds() {
        let mut app = app();
        app.scroll_down(5);
        assert_eq!(app.scroll_offset, 0);
        app.scroll_up(1000);
        assert!(app.scroll_offset > 0);
        assert!(app.scroll_offset < 1000);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_action(InputAction::Quit);
        assert!(!app.running);
    }
}
