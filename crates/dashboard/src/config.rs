//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DASHBOARD_API_BASE_URL` - Backend origin (default: `https://backend.teemify.biz`)
//! - `DASHBOARD_HIGHLIGHT_TTL_SECS` - How long "new"/"updated" tags stay visible (default: 5, max: 86400)
//! - `DASHBOARD_SYNC_MODE` - `refetch` (default) or `reconcile`
//!
//! ## Optional (credentials - must be set together)
//! - `DASHBOARD_USERNAME` - Login user name
//! - `DASHBOARD_PASSWORD` - Login password

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::api::Credentials;

/// Backend origin used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://backend.teemify.biz";

/// Default lifetime of highlight annotations, in seconds.
pub const DEFAULT_HIGHLIGHT_TTL_SECS: u64 = 5;

/// Longest accepted highlight lifetime, in seconds.
pub const MAX_HIGHLIGHT_TTL_SECS: u64 = 86_400;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How the product list catches up after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Re-fetch the whole collection from the backend.
    #[default]
    Refetch,
    /// Apply the acknowledged mutation to the local collection.
    Reconcile,
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refetch" => Ok(Self::Refetch),
            "reconcile" => Ok(Self::Reconcile),
            other => Err(format!("unknown sync mode '{other}' (expected refetch or reconcile)")),
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend origin all requests are sent to
    pub api_base_url: Url,
    /// Lifetime of "new"/"updated" highlight annotations
    pub highlight_ttl: Duration,
    /// Post-mutation synchronization strategy
    pub sync_mode: SyncMode,
    /// Login credentials, when provided through the environment
    pub credentials: Option<Credentials>,
}

impl DashboardConfig {
    /// Configuration pointing at `api_base_url` with every other setting at its default.
    #[must_use]
    pub const fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            highlight_ttl: Duration::from_secs(DEFAULT_HIGHLIGHT_TTL_SECS),
            sync_mode: SyncMode::Refetch,
            credentials: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value, or if
    /// only one of the credential variables is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`DashboardConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("DASHBOARD_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("DASHBOARD_API_BASE_URL".to_string(), e.to_string())
        })?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "DASHBOARD_API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", api_base_url.scheme()),
            ));
        }

        let ttl_secs = lookup("DASHBOARD_HIGHLIGHT_TTL_SECS")
            .map_or(Ok(DEFAULT_HIGHLIGHT_TTL_SECS), |s| s.trim().parse::<u64>())
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DASHBOARD_HIGHLIGHT_TTL_SECS".to_string(), e.to_string())
            })?;
        if ttl_secs > MAX_HIGHLIGHT_TTL_SECS {
            return Err(ConfigError::InvalidEnvVar(
                "DASHBOARD_HIGHLIGHT_TTL_SECS".to_string(),
                format!("{ttl_secs} exceeds the maximum of {MAX_HIGHLIGHT_TTL_SECS}"),
            ));
        }
        let highlight_ttl = Duration::from_secs(ttl_secs);

        let sync_mode = lookup("DASHBOARD_SYNC_MODE")
            .map_or(Ok(SyncMode::default()), |s| s.parse())
            .map_err(|e| ConfigError::InvalidEnvVar("DASHBOARD_SYNC_MODE".to_string(), e))?;

        let credentials = match (lookup("DASHBOARD_USERNAME"), lookup("DASHBOARD_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials {
                username,
                password: SecretString::from(password),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("DASHBOARD_PASSWORD".to_string()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("DASHBOARD_USERNAME".to_string()));
            }
        };

        Ok(Self {
            api_base_url,
            highlight_ttl,
            sync_mode,
            credentials,
        })
    }
}
