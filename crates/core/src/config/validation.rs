//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;
const MAX_REQUEST_DELAY_MS: u64 = 60_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `user_agent` or `output_dir` is empty
    /// - a timeout is below 100ms or above 5 minutes
    /// - `request_delay_ms` exceeds one minute
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "output_dir".into(), reason: "must not be empty".into() });
        }

        for (field, value) in [("render_timeout_ms", self.render_timeout_ms), ("webhook_timeout_ms", self.webhook_timeout_ms)] {
            if value < MIN_TIMEOUT_MS {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be at least 100ms".into() });
            }
            if value > MAX_TIMEOUT_MS {
                return Err(ConfigError::Invalid {
                    field: field.into(),
                    reason: "must not exceed 5 minutes (300000ms)".into(),
                });
            }
        }

        if self.request_delay_ms > MAX_REQUEST_DELAY_MS {
            return Err(ConfigError::Invalid {
                field: "request_delay_ms".into(),
                reason: "must not exceed 1 minute (60000ms)".into(),
            });
        }

        if self.request_delay_ms == 0 {
            tracing::warn!("request_delay_ms is 0; pages will be fetched back to back");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_empty_output_dir() {
        let config = AppConfig { output_dir: "".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "output_dir"));
    }

    #[test]
    fn test_validate_render_timeout_too_small() {
        let config = AppConfig { render_timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "render_timeout_ms"));
    }

    #[test]
    fn test_validate_webhook_timeout_exceeds_limit() {
        let config = AppConfig { webhook_timeout_ms: 301_000, ..Default::default() }; // 5min 1sec
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "webhook_timeout_ms"));
    }

    #[test]
    fn test_validate_request_delay_exceeds_limit() {
        let config = AppConfig { request_delay_ms: 60_001, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "request_delay_ms"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig {
            render_timeout_ms: 100,
            webhook_timeout_ms: 300_000,
            request_delay_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
