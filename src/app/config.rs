use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_ASSISTANT_NAME, DEFAULT_CONTACT_ENDPOINT, DEFAULT_GITHUB_API,
    DEFAULT_HISTORY_WINDOW, DEFAULT_TOP_K, ENV_PREFIX, HTTP_REQUEST_TIMEOUT_SECS,
    LEGACY_API_BASE_ENV, MAX_PROJECT_TOPICS,
};
use crate::utils::PortfolioError;

/// Bounds the chat backend accepts for `top_k`
const TOP_K_RANGE: std::ops::RangeInclusive<u32> = 1..=16;

const LOCAL_CONFIG_PATH: &str = ".portfolio/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat backend configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Contact form relay
    #[serde(default)]
    pub contact: ContactConfig,

    /// Project showcase enrichment
    #[serde(default)]
    pub projects: ProjectsConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Chat backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the assistant backend
    pub api_base: String,
    /// Retrieval breadth passed through to the backend
    pub top_k: u32,
    /// Number of prior messages sent along with each question, at most 3
    pub history_window: usize,
    /// Transport-level request timeout
    pub request_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            top_k: DEFAULT_TOP_K,
            history_window: DEFAULT_HISTORY_WINDOW,
            request_timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Contact form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Form relay endpoint receiving `{name, email, subject, message}`
    pub endpoint: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
        }
    }
}

/// Project showcase settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// GitHub REST API base
    pub github_api: String,
    /// Topics kept per repository
    pub max_topics: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            github_api: DEFAULT_GITHUB_API.to_string(),
            max_topics: MAX_PROJECT_TOPICS,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Name shown in the chat header
    pub assistant_name: String,
    /// Show message times next to each turn
    pub show_timestamps: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            show_timestamps: false,
        }
    }
}

impl Config {
    /// Reject values the backend or the UI cannot work with
    pub fn validate(&self) -> Result<(), PortfolioError> {
        let base = self.chat.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(PortfolioError::ConfigError(format!(
                "chat.api_base must be an http(s) URL, got '{}'",
                self.chat.api_base
            )));
        }
        if !TOP_K_RANGE.contains(&self.chat.top_k) {
            return Err(PortfolioError::ConfigError(format!(
                "chat.top_k must be between {} and {}, got {}",
                TOP_K_RANGE.start(),
                TOP_K_RANGE.end(),
                self.chat.top_k
            )));
        }
        if self.chat.history_window > DEFAULT_HISTORY_WINDOW {
            return Err(PortfolioError::ConfigError(format!(
                "chat.history_window must be at most {}, got {}",
                DEFAULT_HISTORY_WINDOW, self.chat.history_window
            )));
        }
        Ok(())
    }
}

/// Layered sources: defaults, each existing file in order, then environment.
///
/// `PORTFOLIO_API_BASE` and the legacy `NEXT_PUBLIC_API_BASE` both set
/// `chat.api_base`; other keys use `PORTFOLIO_SECTION__KEY`.
fn figment_with(files: &[PathBuf]) -> Figment {
    let figment = files
        .iter()
        .filter(|path| path.exists())
        .fold(Figment::from(Serialized::defaults(Config::default())), |figment, path| {
            figment.merge(Toml::file(path))
        });

    figment
        .merge(
            Env::raw()
                .only(&[LEGACY_API_BASE_ENV])
                .map(|_| "chat.api_base".into()),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(
            Env::raw()
                .only(&[API_BASE_ENV])
                .map(|_| "chat.api_base".into()),
        )
}

fn extract(files: &[PathBuf]) -> Result<Config> {
    let config: Config = figment_with(files)
        .extract()
        .context("Failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from the global and local config files
pub fn load_config() -> Result<Config> {
    let mut files = Vec::new();
    if let Ok(dir) = get_config_dir() {
        files.push(dir.join("config.toml"));
    }
    files.push(PathBuf::from(LOCAL_CONFIG_PATH));
    extract(&files)
}

/// Load configuration from an explicit file, still honouring the environment
pub fn load_config_file(path: &Path) -> Result<Config> {
    extract(&[path.to_path_buf()])
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "portfolio-assistant") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("portfolio-assistant");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    let local_example = PathBuf::from(".portfolio/config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# Portfolio assistant - local overrides

[chat]
api_base = "http://localhost:8000"
top_k = 6
history_window = 3

[contact]
endpoint = "https://formspree.io/f/mvgwanoz"
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}
