//! Upstream status sources and their payload parsers
//!
//! Each third-party status endpoint speaks its own JSON dialect. A source
//! bundles the fetch coordinates for one upstream with the parser that
//! normalizes its payload into an [`Indicator`]. The orchestrator depends
//! only on the [`StatusSource`] trait and never on a concrete source type,
//! so supporting a new upstream format means one new source and one
//! directory entry.

use crate::errors::{Result, StatusError};
use crate::indicator::{Color, Indicator};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

/// Message used when a single-message feed reports no body
pub const DEFAULT_OK_MESSAGE: &str = "Everything operating normally.";

/// Trait for one upstream status source
///
/// `parse` is pure: the same payload always yields the same indicator, and
/// a payload missing required fields fails with
/// [`StatusError::MalformedPayload`] rather than fabricating a report.
pub trait StatusSource: Send + Sync {
    /// Unique key within a directory, used as the configuration join key
    fn key(&self) -> &str;

    /// Human-readable name
    fn label(&self) -> &str;

    /// Origin used both for fetching and as the indicator's more-info URL
    fn base_url(&self) -> &str;

    /// Path of the status document under the base URL
    fn status_path(&self) -> &str;

    /// Normalize a raw upstream payload into an indicator
    fn parse(&self, payload: &Value) -> Result<Indicator>;
}

/// The ordered universe of sources the collector knows how to query.
/// Key uniqueness across the directory is the caller's invariant.
pub type ServiceDirectory = Vec<Box<dyn StatusSource>>;

/// Built-in production directory
pub fn default_directory() -> ServiceDirectory {
    vec![
        Box::new(StatusPageSource::new("quay", "Quay.io", "http://status.quay.io")),
        Box::new(GithubSource::new()),
        Box::new(HerokuSource::new()),
    ]
}

/// Source backed by a StatusPage.io-style multi-component status page
///
/// Reads the page-level `status.indicator` enum and `status.description`
/// string; component and incident detail in the payload is ignored.
pub struct StatusPageSource {
    key: String,
    label: String,
    base_url: String,
}

impl StatusPageSource {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            base_url: base_url.into(),
        }
    }

    fn malformed(&self, reason: &str) -> StatusError {
        StatusError::MalformedPayload {
            service: self.key.clone(),
            reason: reason.to_string(),
        }
    }
}

impl StatusSource for StatusPageSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn status_path(&self) -> &str {
        "/index.json"
    }

    fn parse(&self, payload: &Value) -> Result<Indicator> {
        let indicator = payload["status"]["indicator"]
            .as_str()
            .ok_or_else(|| self.malformed("missing status.indicator"))?;

        let description = payload["status"]["description"]
            .as_str()
            .ok_or_else(|| self.malformed("missing status.description"))?;

        let color = match indicator {
            "none" => Color::Green,
            "minor" => Color::Yellow,
            "major" => Color::Red,
            // "unknown" and any unrecognized token
            _ => Color::Black,
        };

        // The page description is carried verbatim, even when empty
        Ok(Indicator::new(
            &self.key,
            &self.label,
            color,
            description,
            &self.base_url,
        ))
    }
}

/// Source backed by a GitHub-style single-message feed
///
/// Reads a top-level `status` enum and `body` string; an absent or empty
/// body falls back to [`DEFAULT_OK_MESSAGE`].
pub struct GithubSource {
    base_url: String,
}

impl GithubSource {
    pub fn new() -> Self {
        Self {
            base_url: "https://status.github.com".to_string(),
        }
    }

    /// Point the source at a different origin (used against mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn malformed(&self, reason: &str) -> StatusError {
        StatusError::MalformedPayload {
            service: self.key().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for GithubSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSource for GithubSource {
    fn key(&self) -> &str {
        "github"
    }

    fn label(&self) -> &str {
        "Github"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn status_path(&self) -> &str {
        "/api/last-message.json"
    }

    fn parse(&self, payload: &Value) -> Result<Indicator> {
        let status = payload["status"]
            .as_str()
            .ok_or_else(|| self.malformed("missing status"))?;

        let color = match status {
            "good" => Color::Green,
            "minor" => Color::Yellow,
            "major" => Color::Red,
            _ => Color::Black,
        };

        let message = match payload["body"].as_str() {
            Some(body) if !body.is_empty() => body.to_string(),
            _ => DEFAULT_OK_MESSAGE.to_string(),
        };

        Ok(Indicator::new(
            self.key(),
            self.label(),
            color,
            message,
            &self.base_url,
        ))
    }
}

/// Source backed by a Heroku-style availability ledger
///
/// The upstream publishes a ledger of dated availability records, most
/// recent first, with only a binary signal per entry. Anything other than
/// a literal `green` on the latest entry collapses to red; there is no
/// yellow or black from this source, and the messages are fixed constants
/// rather than payload text.
pub struct HerokuSource {
    base_url: String,
}

impl HerokuSource {
    pub fn new() -> Self {
        Self {
            base_url: "https://status.heroku.com".to_string(),
        }
    }

    /// Point the source at a different origin (used against mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn malformed(&self, reason: &str) -> StatusError {
        StatusError::MalformedPayload {
            service: self.key().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for HerokuSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSource for HerokuSource {
    fn key(&self) -> &str {
        "heroku"
    }

    fn label(&self) -> &str {
        "Heroku"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn status_path(&self) -> &str {
        "/api/ui/availabilities"
    }

    fn parse(&self, payload: &Value) -> Result<Indicator> {
        let entries = payload["data"]
            .as_array()
            .ok_or_else(|| self.malformed("missing data array"))?;

        let latest = entries
            .first()
            .ok_or_else(|| self.malformed("empty availability ledger"))?;

        let color = latest["attributes"]["color"]
            .as_str()
            .ok_or_else(|| self.malformed("missing attributes.color on latest entry"))?;

        if let Some(date) = latest["attributes"]["date"]
            .as_str()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        {
            debug!("Latest availability entry for {} dated {}", self.key(), date);
        }

        let (color, message) = if color == "green" {
            (Color::Green, "OK".to_string())
        } else {
            (Color::Red, format!("{} is reporting issues.", self.label()))
        };

        Ok(Indicator::new(
            self.key(),
            self.label(),
            color,
            message,
            &self.base_url,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_payload(indicator: &str, description: &str) -> Value {
        json!({
            "page": { "id": "8szqd6w4s277", "name": "Quay.io", "url": "http://status.quay.io" },
            "status": { "indicator": indicator, "description": description }
        })
    }

    fn feed_payload(status: &str, body: &str) -> Value {
        json!({ "status": status, "body": body, "created_on": "2016-06-09T07:42:57Z" })
    }

    fn ledger_payload(colors: &[&str]) -> Value {
        let entries: Vec<Value> = colors
            .iter()
            .enumerate()
            .map(|(i, color)| {
                json!({
                    "id": format!("{}", 100 + i),
                    "type": "availabilities",
                    "attributes": {
                        "date": format!("2016-06-{:02}", 14 - i),
                        "region": "US",
                        "calculation": 0.9999,
                        "color": color,
                        "magnitude": "none"
                    }
                })
            })
            .collect();
        json!({ "data": entries })
    }

    #[test]
    fn test_status_page_vocabulary_mapping() {
        let source = StatusPageSource::new("key", "Label", "http://status.example.com");

        let cases = [
            ("none", Color::Green),
            ("minor", Color::Yellow),
            ("major", Color::Red),
            ("unknown", Color::Black),
            ("bogus", Color::Black),
        ];

        for (token, expected) in cases {
            let indicator = source.parse(&page_payload(token, "msg")).unwrap();
            assert_eq!(indicator.color, expected, "token {}", token);
            assert_eq!(indicator.message, "msg");
            assert_eq!(indicator.key, "key");
            assert_eq!(indicator.label, "Label");
            assert_eq!(indicator.more_info_url, "http://status.example.com");
        }
    }

    #[test]
    fn test_status_page_carries_description_verbatim_even_if_empty() {
        let source = StatusPageSource::new("key", "Label", "http://status.example.com");
        let indicator = source.parse(&page_payload("none", "")).unwrap();
        assert_eq!(indicator.message, "");
    }

    #[test]
    fn test_status_page_missing_fields_is_malformed() {
        let source = StatusPageSource::new("key", "Label", "http://status.example.com");

        for payload in [json!({}), json!({ "status": { "description": "msg" } })] {
            match source.parse(&payload) {
                Err(StatusError::MalformedPayload { service, .. }) => {
                    assert_eq!(service, "key")
                }
                other => panic!("expected MalformedPayload, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_github_vocabulary_mapping() {
        let source = GithubSource::new();

        let cases = [
            ("good", Color::Green),
            ("minor", Color::Yellow),
            ("major", Color::Red),
            ("unknown", Color::Black),
        ];

        for (token, expected) in cases {
            let indicator = source.parse(&feed_payload(token, "some msg")).unwrap();
            assert_eq!(indicator.color, expected, "token {}", token);
            assert_eq!(indicator.message, "some msg");
        }
    }

    #[test]
    fn test_github_defaults_missing_or_empty_body() {
        let source = GithubSource::new();

        let no_body = json!({ "status": "good" });
        let indicator = source.parse(&no_body).unwrap();
        assert_eq!(indicator.message, DEFAULT_OK_MESSAGE);

        let empty_body = feed_payload("good", "");
        let indicator = source.parse(&empty_body).unwrap();
        assert_eq!(indicator.message, DEFAULT_OK_MESSAGE);
    }

    #[test]
    fn test_github_missing_status_is_malformed() {
        let source = GithubSource::new();
        assert!(matches!(
            source.parse(&json!({ "body": "msg" })),
            Err(StatusError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_heroku_green_ledger_is_ok() {
        let source = HerokuSource::new();
        let indicator = source.parse(&ledger_payload(&["green", "green"])).unwrap();
        assert_eq!(indicator.color, Color::Green);
        assert_eq!(indicator.message, "OK");
        assert_eq!(indicator.more_info_url, "https://status.heroku.com");
    }

    #[test]
    fn test_heroku_any_other_color_collapses_to_red() {
        let source = HerokuSource::new();

        // Only the most recent entry counts, older greens do not rescue it
        let payload = ledger_payload(&["other string than green", "green", "green"]);
        let indicator = source.parse(&payload).unwrap();
        assert_eq!(indicator.color, Color::Red);
        assert_eq!(indicator.message, "Heroku is reporting issues.");
    }

    #[test]
    fn test_heroku_empty_or_missing_ledger_is_malformed() {
        let source = HerokuSource::new();

        for payload in [json!({}), json!({ "data": [] })] {
            assert!(matches!(
                source.parse(&payload),
                Err(StatusError::MalformedPayload { .. })
            ));
        }
    }

    #[test]
    fn test_parsers_are_idempotent() {
        let source = GithubSource::new();
        let payload = feed_payload("minor", "degraded");
        let first = source.parse(&payload).unwrap();
        let second = source.parse(&payload).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_directory_keys_are_unique() {
        let directory = default_directory();
        let mut keys: Vec<&str> = directory.iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), directory.len());
    }
}
