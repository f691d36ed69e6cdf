//! Host environment: the live library page and the console
//!
//! Everything the removal core sees through its collaborator traits is
//! implemented here: the reqwest-backed library page (rows + reload),
//! and console stand-ins for the original page widgets (target input,
//! progress text, scrobble counter).

/// Console input and display sinks
pub mod console;
/// The live library page
pub mod page;
/// Library page scraping
pub mod parse;

pub use console::{ConsoleCount, ConsolePrompt, ConsoleProgress};
pub use page::LibraryPage;

use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::config::{HttpConfig, SessionConfig};
use crate::utils::error::{Result, SweepError};

/// Build the HTTP client shared by page fetches and delete requests.
///
/// Session cookies ride along as a default header so every request is
/// authenticated the way the original's browser session was.
pub fn build_client(http: &HttpConfig, session: &SessionConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = session.cookie_header() {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| SweepError::Config(format!("invalid session cookie value: {}", e)))?;
        headers.insert(header::COOKIE, value);
    }

    reqwest::Client::builder()
        .user_agent(&http.user_agent)
        .timeout(Duration::from_secs(http.timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(SweepError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_with_session() {
        let session = SessionConfig {
            sessionid: Some(".abc".to_string()),
            csrftoken: Some("tok".to_string()),
        };
        assert!(build_client(&HttpConfig::default(), &session).is_ok());
    }

    #[test]
    fn test_build_client_rejects_bad_cookie() {
        let session = SessionConfig {
            sessionid: Some("line\nbreak".to_string()),
            csrftoken: None,
        };
        assert!(matches!(
            build_client(&HttpConfig::default(), &session),
            Err(SweepError::Config(_))
        ));
    }
}
