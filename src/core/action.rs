//! Delete action value object

use reqwest::Method;

/// One removable row's network call: method, endpoint, and the
/// form-encoded payload the host page attached to the row.
///
/// Built by the host page per visible row at the moment a page batch
/// starts, consumed by the batch executor, never reused across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    /// HTTP method of the delete form
    pub method: Method,
    /// Absolute endpoint the form posts to
    pub endpoint: String,
    /// Form fields, in document order
    pub payload: Vec<(String, String)>,
}

impl DeleteAction {
    /// A POST delete action, the only kind the host page produces
    pub fn post(endpoint: impl Into<String>, payload: Vec<(String, String)>) -> Self {
        Self {
            method: Method::POST,
            endpoint: endpoint.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_constructor() {
        let action = DeleteAction::post(
            "https://www.last.fm/user/me/library/delete",
            vec![("timestamp".to_string(), "1690000000".to_string())],
        );
        assert_eq!(action.method, Method::POST);
        assert_eq!(action.endpoint, "https://www.last.fm/user/me/library/delete");
        assert_eq!(action.payload.len(), 1);
    }
}
