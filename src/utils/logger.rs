use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Directives used when neither `PORTFOLIO_LOG` nor `RUST_LOG` is set
const DEFAULT_DIRECTIVES: &str = "warn,portfolio_assistant=info";

/// `PORTFOLIO_LOG` wins over `RUST_LOG`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the stderr subscriber.
///
/// Returns `false` when a global subscriber was already set.
pub fn init_logger() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

pub fn log_info(emoji: &str, message: impl std::fmt::Display) {
    info!("{} {}", emoji, message);
}

pub fn log_warn(emoji: &str, message: impl std::fmt::Display) {
    warn!("{} {}", emoji, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init_logger();
        assert!(!init_logger());
        log_info("🧪", "logger installed");
    }
}
