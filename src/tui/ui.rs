use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::chat::{ChatBackend, ChatError, ChatReply, ChatRequest};
use crate::constants::UI_REFRESH_INTERVAL_MS;
use crate::tui::input::InputHandler;
use crate::tui::render::render_ui;
use crate::tui::App;
use crate::utils::PortfolioError;

type Outcome = Result<ChatReply, ChatError>;

/// Run the terminal UI
pub async fn run_ui(mut app: App) -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ The chat window requires an interactive terminal.");
        eprintln!("   Use --prompt \"your question\" for non-interactive use.");
        return Err(PortfolioError::UIError("No interactive terminal available".to_string()).into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Resolved requests come back through this channel
    let (tx, mut rx) = mpsc::channel::<Outcome>(4);

    let res = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<Outcome>,
    rx: &mut mpsc::Receiver<Outcome>,
) -> Result<()> {
    let input = InputHandler::new();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(UI_REFRESH_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = app.handle_action(input.handle_key(key)) {
                        dispatch(app.backend.clone(), request, tx.clone());
                    }
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            app.apply(outcome);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Send `request` off the UI thread; its outcome always comes back on `tx`
pub(crate) fn dispatch(
    backend: Arc<dyn ChatBackend>,
    request: ChatRequest,
    tx: mpsc::Sender<Outcome>,
) {
    tokio::spawn(async move {
        let outcome = match tokio::spawn(async move { backend.send(&request).await }).await {
            Ok(outcome) => outcome,
            Err(e) => Err(ChatError::Task(e.to_string())),
        };
        if tx.send(outcome).await.is_err() {
            debug!("Chat window closed before the answer arrived");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;
    use crate::chat::MockChatBackend;
    use crate::constants::UNAVAILABLE_MESSAGE;
    use crate::tui::input::InputAction;

    #[tokio::test]
    async fn test_dispatch_round_trip() {
        let mut backend = MockChatBackend::new();
        backend.expect_send().times(1).returning(|_| {
            Ok(ChatReply {
                answer: Some("Python, ML, NLP...".to_string()),
                context_sources: vec![],
            })
        });
        let mut app = App::new(&Config::default(), backend);
        let (tx, mut rx) = mpsc::channel(4);

        app.session.set_input("What are his skills?");
        let request = app.handle_action(InputAction::Submit).unwrap();
        dispatch(app.backend.clone(), request, tx);

        let outcome = rx.recv().await.unwrap();
        let exchange = app.apply(outcome).unwrap();
        assert_eq!(exchange.reply.text, "Python, ML, NLP...");
        assert_eq!(app.session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_panicking_backend_still_resolves() {
        let mut backend = MockChatBackend::new();
        backend.expect_send().returning(|_| panic!("backend exploded"));
        let mut app = App::new(&Config::default(), backend);
        let (tx, mut rx) = mpsc::channel(4);

        let request = app.session.begin("hello").unwrap();
        dispatch(app.backend.clone(), request, tx);

        let outcome = rx.recv().await.unwrap();
        assert!(matches!(outcome, Err(ChatError::Task(_))));
        app.apply(outcome);
        assert!(!app.session.is_awaiting());
        assert_eq!(app.session.transcript().last().unwrap().text, UNAVAILABLE_MESSAGE);
    }
}
