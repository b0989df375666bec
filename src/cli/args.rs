use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio-assistant")]
#[command(version)]
#[command(about = "Chat with Mohamed Dhia Betis's portfolio assistant", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Base URL of the assistant backend (overrides configuration)
    #[arg(long, env = "PORTFOLIO_API_BASE")]
    pub api_base: Option<String>,

    /// Non-interactive question to ask
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "prompt")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Open the chat window (default)
    Chat,
    /// Show version information
    Version,
    /// Check configuration and backend reachability
    Status,
    /// List showcased projects with live repository stats
    Projects,
    /// Send a message through the contact form
    Contact(ContactArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    /// Your name
    #[arg(long)]
    pub name: String,
    /// Address to reply to
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contact() {
        let cli = Cli::try_parse_from([
            "portfolio-assistant",
            "contact",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--subject",
            "Hi",
            "--message",
            "Hello there",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Contact(args)) => assert_eq!(args.email, "ada@example.com"),
            other => panic!("Expected contact command, got {:?}", other),
        }
    }

    #[test]
    fn test_output_format_requires_prompt() {
        let result = Cli::try_parse_from(["portfolio-assistant", "--output-format", "json"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "portfolio-assistant",
            "-p",
            "What are his skills?",
            "--output-format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.output_format, OutputFormat::Json));
    }
}
