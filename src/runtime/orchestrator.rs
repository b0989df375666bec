use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use crate::{
    app::{load_config, load_config_file, Config},
    chat::{ChatBackend, HttpChatBackend},
    cli::{handle_command, Cli},
    tui::{run_ui, App},
};

use super::NonInteractiveRunner;

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = if let Some(config_path) = &cli.config {
            load_config_file(config_path)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("⚠️  Failed to load config: {:#}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        if let Some(api_base) = &cli.api_base {
            config.chat.api_base = api_base.clone();
            config.validate()?;
        }

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(());
            }
            // Continue to chat for Commands::Chat
        }

        let backend = self.backend()?;

        if let Some(prompt) = self.cli.prompt.clone() {
            let mut runner = NonInteractiveRunner::new(&self.config, Box::new(backend));
            let result = runner.execute(prompt).await?;
            println!("{}", runner.format_result(&result, self.cli.output_format));

            if !result.errors.is_empty() {
                std::process::exit(1);
            }
            return Ok(());
        }

        println!(
            "💬 Connecting to assistant at {}",
            backend.endpoint().green()
        );
        let app = App::new(&self.config, backend);
        run_ui(app).await
    }

    fn backend(&self) -> Result<HttpChatBackend> {
        HttpChatBackend::new(
            &self.config.chat.api_base,
            Duration::from_secs(self.config.chat.request_timeout_secs),
        )
    }
}
