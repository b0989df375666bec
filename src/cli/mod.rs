/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, ContactArgs, OutputFormat};
pub use commands::{handle_command, list_projects, send_contact, show_version};
