pub mod app;
pub mod chat;
pub mod cli;
pub mod constants;
pub mod contact;
pub mod projects;
pub mod runtime;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use chat::{ChatBackend, ChatSession, HttpChatBackend, Message, Origin};
pub use tui::run_ui;
pub use utils::PortfolioError;
