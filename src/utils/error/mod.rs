//! Error types for the sweeper

use thiserror::Error;

/// Result type alias for the sweeper
pub type Result<T> = std::result::Result<T, SweepError>;

/// Main error type for the sweeper
#[derive(Error, Debug)]
pub enum SweepError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (target count, prompt values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Resume storage errors
    #[error("Resume storage error: {0}")]
    Storage(String),

    /// Host page errors (fetch, scrape, rejected deletes)
    #[error("Host page error: {0}")]
    HostPage(String),
}
