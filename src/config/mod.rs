//! Configuration management for the sweeper
//!
//! Loading, env-var overrides, and validation of the sweeper's
//! configuration.

pub mod models;

pub use models::*;

use std::env;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::utils::error::{Result, SweepError};

/// Config file looked for when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sweep.yaml";

/// Main configuration struct for the sweeper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Sweeper configuration
    pub sweep: SweepConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SweepError::Config(format!("Failed to read config file: {}", e)))?;
        let sweep: SweepConfig = serde_yaml::from_str(&content)?;

        Ok(Self { sweep })
    }

    /// Load configuration: explicit file, default file, or bare defaults;
    /// env vars override in every case, then the result is validated.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE).await?
            }
            None => {
                debug!("no config file, starting from defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `SWEEP_*` overrides from the given lookup
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(page_url) = get("SWEEP_PAGE_URL") {
            self.sweep.host.page_url = page_url;
        }
        if let Some(sessionid) = get("SWEEP_SESSIONID") {
            self.sweep.host.session.sessionid = Some(sessionid);
        }
        if let Some(csrftoken) = get("SWEEP_CSRFTOKEN") {
            self.sweep.host.session.csrftoken = Some(csrftoken);
        }
        if let Some(backend) = get("SWEEP_STORAGE_BACKEND") {
            self.sweep.storage.backend = backend;
        }
        if let Some(path) = get("SWEEP_RESUME_PATH") {
            self.sweep.storage.path = path;
        }
        if let Some(secs) = get("SWEEP_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.sweep.http.timeout_secs = secs;
        }
        if let Some(user_agent) = get("SWEEP_USER_AGENT") {
            self.sweep.http.user_agent = user_agent;
        }
    }

    /// Get host page configuration
    pub fn host(&self) -> &HostConfig {
        &self.sweep.host
    }

    /// Get HTTP client configuration
    pub fn http(&self) -> &HttpConfig {
        &self.sweep.http
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.sweep.storage
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.sweep.host.page_url.is_empty() {
            return Err(SweepError::Config(
                "host.page_url is required (or set SWEEP_PAGE_URL)".to_string(),
            ));
        }
        Url::parse(&self.sweep.host.page_url)
            .map_err(|e| SweepError::Config(format!("host.page_url is not a valid URL: {}", e)))?;

        if self.sweep.http.timeout_secs == 0 {
            return Err(SweepError::Config(
                "http.timeout_secs must be positive".to_string(),
            ));
        }

        match self.sweep.storage.backend.as_str() {
            "file" | "memory" => {}
            other => {
                return Err(SweepError::Config(format!(
                    "Unsupported storage backend: {}",
                    other
                )));
            }
        }

        Ok(())
    }
}
