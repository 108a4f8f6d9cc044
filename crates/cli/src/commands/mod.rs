//! Subcommand implementations.
//!
//! Each command returns the process exit status.

pub mod crawl;
pub mod forward;

use crawlmark_core::AppConfig;

/// Generic failure status.
pub const EXIT_FAILURE: u8 = 1;

/// Load layered configuration, logging the failure.
pub fn load_config() -> Option<AppConfig> {
    match AppConfig::load() {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}
