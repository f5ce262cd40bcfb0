//! Configuration management
//!
//! One immutable [`SyncConfig`] is built at startup and passed explicitly
//! into the Stripe client and store constructors.

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default base URL of the payment platform API.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Default page size for remote listings (the platform maximum).
pub const DEFAULT_PAGE_SIZE: u16 = 100;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/ledgersync";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Top-level sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub stripe: StripeConfig,
    pub database: DatabaseConfig,
}

/// Remote listing API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeConfig {
    /// Secret API key; empty when running in file-only mode.
    pub api_key: String,
    pub api_base: String,
    pub page_size: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl SyncConfig {
    /// Load configuration from `.env` and environment variables.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = SyncConfig {
            stripe: StripeConfig {
                api_key: std::env::var("STRIPE_API_KEY").unwrap_or_default(),
                api_base: std::env::var("STRIPE_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                page_size: std::env::var("STRIPE_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_PAGE_SIZE),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
                min_connections: std::env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_MIN_CONNECTIONS),
                connect_timeout_secs: std::env::var("DATABASE_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS),
                idle_timeout_secs: std::env::var("DATABASE_IDLE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_IDLE_TIMEOUT_SECS),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.stripe.page_size == 0 || self.stripe.page_size > 100 {
            anyhow::bail!(
                "Stripe page size must be between 1 and 100, got {}",
                self.stripe.page_size
            );
        }

        if self.stripe.api_base.is_empty() {
            anyhow::bail!("Stripe API base URL cannot be empty");
        }

        Ok(())
    }

    /// True when a remote API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.stripe.api_key.is_empty()
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            stripe: StripeConfig {
                api_key: String::new(),
                api_base: DEFAULT_API_BASE.to_string(),
                page_size: DEFAULT_PAGE_SIZE,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_is_valid() {
        let config = SyncConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_api_key());
        assert_eq!(config.stripe.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn oversized_page_size_is_rejected() {
        let mut config = SyncConfig::default();
        config.stripe.page_size = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_pool_bounds_are_rejected() {
        let mut config = SyncConfig::default();
        config.database.min_connections = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn load_reads_environment_overrides() {
        std::env::set_var("DATABASE_URL", "postgresql://localhost/ledgersync_test");
        std::env::set_var("STRIPE_PAGE_SIZE", "25");

        let config = SyncConfig::load().unwrap();
        assert_eq!(config.database.url, "postgresql://localhost/ledgersync_test");
        assert_eq!(config.stripe.page_size, 25);

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("STRIPE_PAGE_SIZE");
    }
}
