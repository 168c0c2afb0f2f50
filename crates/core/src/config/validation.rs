//! Configuration validation rules.
//!
//! Validation logic for `AppConfig` values after they have been loaded from
//! environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is outside [100ms, 5 minutes]
    /// - `per_page` is 0 or above the hh.ru cap of 100
    /// - `max_pages` is 0 or above 20
    /// - an exchange rate is not strictly positive
    /// - `user_agent` or `bind_addr` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.per_page == 0 || self.per_page > 100 {
            return Err(ConfigError::Invalid {
                field: "per_page".into(),
                reason: "must be between 1 and 100 (hh.ru cap)".into(),
            });
        }

        if self.max_pages == 0 || self.max_pages > 20 {
            return Err(ConfigError::Invalid { field: "max_pages".into(), reason: "must be between 1 and 20".into() });
        }

        if self.usd_rate <= 0.0 {
            return Err(ConfigError::Invalid { field: "usd_rate".into(), reason: "must be positive".into() });
        }
        if self.eur_rate <= 0.0 {
            return Err(ConfigError::Invalid { field: "eur_rate".into(), reason: "must be positive".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.bind_addr.is_empty() {
            return Err(ConfigError::Invalid { field: "bind_addr".into(), reason: "must not be empty".into() });
        }

        if self.page_delay_ms < 1_000 {
            tracing::warn!(
                page_delay_ms = self.page_delay_ms,
                "page_delay_ms below 1000 may exceed one request per second toward hh.ru"
            );
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
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_per_page_bounds() {
        let config = AppConfig { per_page: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = AppConfig { per_page: 101, ..Default::default() };
        assert!(config.validate().is_err());

        let config = AppConfig { per_page: 100, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_pages_bounds() {
        let config = AppConfig { max_pages: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = AppConfig { max_pages: 21, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rates_must_be_positive() {
        let config = AppConfig { usd_rate: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "usd_rate"));

        let config = AppConfig { eur_rate: -1.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "eur_rate"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_empty_bind_addr() {
        let config = AppConfig { bind_addr: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bind_addr"));
    }

    #[test]
    fn test_short_page_delay_is_legal() {
        // Courtesy pacing, not a correctness rule: short delays only warn.
        let config = AppConfig { page_delay_ms: 200, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
