use thiserror::Error;

/// Main error type for the portfolio assistant
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("UI error: {0}")]
    UIError(String),
}
