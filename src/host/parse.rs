//! Library page scraping
//!
//! Pulls the per-row delete forms and the scrobble-count metadata out of
//! the rendered page. The markup is stable enough that a handful of
//! regexes over the raw HTML covers it; only attributes the delete forms
//! actually carry are read.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::core::DeleteAction;
use crate::utils::error::Result;

static FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<form\b[^>]*\baction="([^"]*)"[^>]*>(.*?)</form>"#).unwrap()
});
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<input\b[^>]*>").unwrap());
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bname\s*=\s*"([^"]*)""#).unwrap());
static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bvalue\s*=\s*"([^"]*)""#).unwrap());
static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)class="metadata-display[^"]*"[^>]*>\s*([\d,]+)\s*<"#).unwrap()
});

/// Marker distinguishing a row's delete form from other forms on the page
const DELETE_MARKER: &str = "chartlist-delete-button";

/// Extract one delete action per visible removable row, in document
/// order (the order the host renders, oldest page first).
pub fn delete_actions(html: &str, base: &Url) -> Result<Vec<DeleteAction>> {
    let mut actions = Vec::new();
    for caps in FORM_RE.captures_iter(html) {
        let body = &caps[2];
        if !body.contains(DELETE_MARKER) {
            continue;
        }
        // An empty action attribute posts back to the page itself.
        let endpoint = base.join(&unescape(&caps[1]))?;
        actions.push(DeleteAction::post(endpoint.to_string(), form_fields(body)));
    }
    Ok(actions)
}

/// The page's scrobble-count metadata, if present.
///
/// First metadata-display value on the page, digits with thousands
/// separators.
pub fn scrobble_count(html: &str) -> Option<u64> {
    let caps = COUNT_RE.captures(html)?;
    caps[1].replace(',', "").parse().ok()
}

fn form_fields(body: &str) -> Vec<(String, String)> {
    INPUT_RE
        .find_iter(body)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let name = NAME_RE.captures(tag)?.get(1)?.as_str();
            if name.is_empty() {
                return None;
            }
            let value = VALUE_RE
                .captures(tag)
                .and_then(|caps| caps.get(1))
                .map_or("", |m| m.as_str());
            Some((unescape(name), unescape(value)))
        })
        .collect()
}

fn unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<ul class="metadata-list">
  <li class="metadata-item">
    <h4 class="metadata-title">Scrobbles</h4>
    <p class="metadata-display">12,345</p>
  </li>
</ul>
<form action="/search" method="GET"><input name="q" value=""></form>
<table class="chartlist">
  <tr>
    <td class="chartlist-delete">
      <form method="POST" action="/user/me/library/delete">
        <input type="hidden" name="csrfmiddlewaretoken" value="tok1">
        <input type="hidden" name="artist_name" value="Mott &amp; Friends">
        <input type="hidden" name="track_name" value="Jingle #1">
        <input type="hidden" name="timestamp" value="1690000001">
        <button type="submit" class="chartlist-delete-button">Delete</button>
      </form>
    </td>
  </tr>
  <tr>
    <td class="chartlist-delete">
      <form method="POST" action="/user/me/library/delete">
        <input type="hidden" name="csrfmiddlewaretoken" value="tok2">
        <input type="hidden" name="artist_name" value="Mott &amp; Friends">
        <input type="hidden" name="track_name" value="Jingle #1">
        <input type="hidden" name="timestamp" value="1690000002">
        <button type="submit" class="chartlist-delete-button">Delete</button>
      </form>
    </td>
  </tr>
</table>
"#;

    fn base() -> Url {
        Url::parse("https://www.last.fm/user/me/library/music/Mott/_/Jingle").unwrap()
    }

    #[test]
    fn test_delete_actions_skips_other_forms() {
        let actions = delete_actions(PAGE, &base()).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0].endpoint,
            "https://www.last.fm/user/me/library/delete"
        );
    }

    #[test]
    fn test_fields_keep_document_order_and_unescape() {
        let actions = delete_actions(PAGE, &base()).unwrap();
        let payload = &actions[0].payload;
        assert_eq!(payload[0], ("csrfmiddlewaretoken".to_string(), "tok1".to_string()));
        assert_eq!(payload[1].1, "Mott & Friends");
        assert_eq!(payload[3], ("timestamp".to_string(), "1690000001".to_string()));
    }

    #[test]
    fn test_rows_in_document_order() {
        let actions = delete_actions(PAGE, &base()).unwrap();
        let timestamps: Vec<&str> = actions
            .iter()
            .map(|a| a.payload[3].1.as_str())
            .collect();
        assert_eq!(timestamps, ["1690000001", "1690000002"]);
    }

    #[test]
    fn test_scrobble_count() {
        assert_eq!(scrobble_count(PAGE), Some(12345));
        assert_eq!(scrobble_count("<p>no metadata here</p>"), None);
    }

    #[test]
    fn test_empty_page_yields_no_actions() {
        let actions = delete_actions("<html><body></body></html>", &base()).unwrap();
        assert!(actions.is_empty());
    }
}
