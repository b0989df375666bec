/// Constants module to avoid magic numbers and literal strings in the codebase

// Network Configuration
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const CHAT_ENDPOINT_PATH: &str = "/api/v1/chat";
pub const CHAT_VERSION_PATH: &str = "/api/v1/chat/_version";
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://formspree.io/f/mvgwanoz";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const GITHUB_USER_AGENT: &str = concat!("portfolio-assistant/", env!("CARGO_PKG_VERSION"));

// Environment variables
pub const ENV_PREFIX: &str = "PORTFOLIO_";
pub const API_BASE_ENV: &str = "PORTFOLIO_API_BASE";
pub const LEGACY_API_BASE_ENV: &str = "NEXT_PUBLIC_API_BASE";
pub const LOG_ENV: &str = "PORTFOLIO_LOG";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 3;

// Chat request shaping
pub const DEFAULT_TOP_K: u32 = 6;
pub const DEFAULT_HISTORY_WINDOW: usize = 3;

// Project enrichment
pub const MAX_PROJECT_TOPICS: usize = 6;

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const DEFAULT_ASSISTANT_NAME: &str = "Mohamed Dhia";

// User-facing literals
pub const WELCOME_MESSAGE: &str = "Hi! I'm Mohamed Dhia Betis's AI assistant. I can answer questions about his skills, experience, education, certifications, and projects. What would you like to know?";
pub const UNAVAILABLE_MESSAGE: &str =
    "The AI assistant is not available at the moment. Please try again later.";
pub const NO_ANSWER_MESSAGE: &str = "No answer.";
pub const CONTACT_SUCCESS_MESSAGE: &str = "Thanks! I'll get back to you soon.";
pub const CONTACT_FAILURE_MESSAGE: &str =
    "Something went wrong. Please try again or email me directly.";
