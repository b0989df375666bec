use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use crate::{
    app::{get_config_dir, init_config, Config},
    chat::{ChatBackend, HttpChatBackend},
    contact::{ContactClient, ContactForm, ContactOutcome},
    projects::{curated_projects, ProjectCard, ProjectEnricher},
    utils::{log_info, log_warn},
};

use super::{Commands, ContactArgs};

/// Handle CLI subcommands. Returns `false` when the chat window should open.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing portfolio assistant configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Projects => {
            list_projects(config).await?;
            Ok(true)
        }
        Commands::Contact(args) => {
            let outcome = send_contact(config, args).await?;
            if outcome == ContactOutcome::Sent {
                println!("{}", outcome.message().green());
            } else {
                println!("{}", outcome.message().red());
            }
            Ok(true)
        }
        Commands::Chat => Ok(false),
    }
}

/// Show version information
pub fn show_version() {
    println!("portfolio-assistant v{}", env!("CARGO_PKG_VERSION"));
    println!("   Ask me about Mohamed Dhia");
}

/// Show configuration and backend status
async fn show_status(config: &Config) -> Result<()> {
    println!("Portfolio Assistant Status:");
    println!();

    let backend = HttpChatBackend::new(
        &config.chat.api_base,
        Duration::from_secs(config.chat.request_timeout_secs),
    )?;
    match backend.version().await {
        Some(version) => println!("  [OK] Chat backend: {} ({})", backend.endpoint(), version),
        None => println!("  [ERROR] Chat backend: {} unreachable", backend.endpoint()),
    }
    println!("  [OK] Retrieval breadth: top_k={}", config.chat.top_k);
    println!("  [OK] History window: {} messages", config.chat.history_window);
    println!("  [OK] Contact relay: {}", config.contact.endpoint);

    match get_config_dir() {
        Ok(dir) if dir.join("config.toml").exists() => {
            println!("  [OK] Configuration: {}", dir.join("config.toml").display());
        }
        _ => println!("  [WARNING] Configuration: Not found (using defaults)"),
    }

    println!();
    Ok(())
}

/// Print the project showcase, enriched with repository stats when reachable
pub async fn list_projects(config: &Config) -> Result<()> {
    let enricher = ProjectEnricher::new(
        &config.projects,
        Duration::from_secs(config.chat.request_timeout_secs),
    )?;
    let projects = enricher.enrich(curated_projects()).await;

    println!("Projects:");
    for project in &projects {
        print_project(project);
    }
    Ok(())
}

fn print_project(project: &ProjectCard) {
    println!();
    println!("  {}", project.name.bold());
    println!("    {}", project.description);
    println!("    {}", project.workflow.dimmed());
    println!("    Tech: {}", project.tech.join(", ").cyan());
    if let (Some(stars), Some(forks)) = (project.stars, project.forks) {
        println!("    ★ {}  ⑂ {}", stars, forks);
    }
    if !project.topics.is_empty() {
        println!("    Topics: {}", project.topics.join(", "));
    }
    if let Some(updated) = project.updated_at {
        println!("    Updated: {}", updated.format("%Y-%m-%d"));
    }
    if let Some(link) = project.link() {
        println!("    {}", link.underline());
    }
}

/// Submit the contact form
pub async fn send_contact(config: &Config, args: &ContactArgs) -> Result<ContactOutcome> {
    let client = ContactClient::new(
        config.contact.endpoint.clone(),
        Duration::from_secs(config.chat.request_timeout_secs),
    )?;
    let form = ContactForm::new(&args.name, &args.email, &args.subject, &args.message);

    log_info("📨", format!("Sending contact form to {}", config.contact.endpoint));
    let outcome = client.submit(&form).await;
    if outcome == ContactOutcome::Failed {
        log_warn("⚠️", "Contact form was not delivered");
    }
    Ok(outcome)
}
