use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Maps key presses to chat window actions
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Process a key event
    pub fn handle_key(&self, key: KeyEvent) -> InputAction {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Esc, _) => InputAction::Quit,
            (KeyCode::Tab, _) => InputAction::TogglePanel,
            // Shift+Enter is not a submit
            (KeyCode::Enter, KeyModifiers::SHIFT) => InputAction::None,
            (KeyCode::Enter, _) => InputAction::Submit,
            (KeyCode::Backspace, _) => InputAction::Delete,
            (KeyCode::PageUp, _) | (KeyCode::Up, _) => InputAction::ScrollUp,
            (KeyCode::PageDown, _) | (KeyCode::Down, _) => InputAction::ScrollDown,
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => InputAction::Insert(c),
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Submit,
    Quit,
    TogglePanel,
    Insert(char),
    Delete,
    ScrollUp,
    ScrollDown,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_mapping() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Enter, KeyModifiers::NONE)), InputAction::Submit);
        assert_eq!(handler.handle_key(key(KeyCode::Enter, KeyModifiers::SHIFT)), InputAction::None);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            InputAction::Insert('A')
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(handler.handle_key(key(KeyCode::Tab, KeyModifiers::NONE)), InputAction::TogglePanel);
    }
}
