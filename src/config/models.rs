//! Configuration model structs

use serde::{Deserialize, Serialize};

/// Top-level sweeper configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Host page settings
    pub host: HostConfig,
    /// HTTP client settings
    pub http: HttpConfig,
    /// Resume storage settings
    pub storage: StorageConfig,
    /// Walk pages and report without deleting anything
    pub dry_run: bool,
}

/// The library page whose visible scrobbles are removed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Full URL of the library page, e.g.
    /// `https://www.last.fm/user/<name>/library/music/<artist>/_/<track>`
    pub page_url: String,
    /// Authenticated session cookies
    pub session: SessionConfig,
}

/// Session cookies of a logged-in browser session.
///
/// The delete forms are CSRF-protected; both cookies come from the
/// browser that is logged in to the host service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// `sessionid` cookie value
    pub sessionid: Option<String>,
    /// `csrftoken` cookie value
    pub csrftoken: Option<String>,
}

impl SessionConfig {
    /// Render the configured cookies as a `Cookie` header value
    pub fn cookie_header(&self) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(sessionid) = &self.sessionid {
            pairs.push(format!("sessionid={}", sessionid));
        }
        if let Some(csrftoken) = &self.csrftoken {
            pairs.push(format!("csrftoken={}", csrftoken));
        }
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("scrobble-sweep/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Resume storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend: "file" or "memory"
    pub backend: String,
    /// Resume document path for the file backend
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            path: format!(".scrobble-sweep/{}", crate::storage::RESUME_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.storage.backend, "file");
        assert!(config.storage.path.ends_with("resume.json"));
        assert_eq!(config.http.timeout_secs, 30);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_cookie_header() {
        let mut session = SessionConfig::default();
        assert!(session.cookie_header().is_none());

        session.sessionid = Some(".abc123".to_string());
        assert_eq!(session.cookie_header().unwrap(), "sessionid=.abc123");

        session.csrftoken = Some("tok".to_string());
        assert_eq!(
            session.cookie_header().unwrap(),
            "sessionid=.abc123; csrftoken=tok"
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: SweepConfig = serde_yaml::from_str(
            "host:\n  page_url: https://www.last.fm/user/me/library\n",
        )
        .unwrap();
        assert_eq!(config.host.page_url, "https://www.last.fm/user/me/library");
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.http.timeout_secs, 30);
    }
}
