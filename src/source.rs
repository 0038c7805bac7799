use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::{CloudError, Result};

/// Where the cloud's data comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Already-parsed data root
    Value(Value),
    /// JSON text
    Json(String),
    /// Address to fetch the JSON from
    Url(String),
}

impl DataSource {
    /// Text starting with `{` is JSON, anything else is taken as a URL.
    pub fn infer(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with('{') {
            DataSource::Json(text)
        } else {
            DataSource::Url(text)
        }
    }
}

/// What loading a source produced.
#[derive(Debug)]
pub enum Loaded {
    Ready(Value),
    /// A remote fetch that never delivered. The reason was already logged.
    Unavailable,
}

/// Resolve a source into a data root.
///
/// Literal JSON that fails to parse is a configuration error. Remote
/// failures of any kind (transport, non-2xx, bad body) are logged and
/// reported as [`Loaded::Unavailable`].
pub fn load(source: DataSource) -> Result<Loaded> {
    match source {
        DataSource::Value(value) => Ok(Loaded::Ready(value)),
        DataSource::Json(text) => serde_json::from_str(&text)
            .map(Loaded::Ready)
            .map_err(|e| CloudError::Configuration(format!("data is not valid JSON: {}", e))),
        DataSource::Url(url) => Ok(match fetch_text(&url) {
            Some(body) => match serde_json::from_str(&body) {
                Ok(value) => Loaded::Ready(value),
                Err(e) => {
                    tracing::error!("Data from {} is not valid JSON: {}", url, e);
                    Loaded::Unavailable
                }
            },
            None => Loaded::Unavailable,
        }),
    }
}

/// Fetch a URL body (blocking). Only 2xx responses count as a response.
pub fn fetch_text(url_str: &str) -> Option<String> {
    let parsed = match Url::parse(url_str) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!("Invalid data URL '{}': {}", url_str, e);
            return None;
        }
    };

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("HTTP client error: {}", e);
            return None;
        }
    };

    let response = match client
        .get(parsed.as_str())
        .header("Accept", "application/json")
        .send()
    {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Request to {} failed: {}", parsed, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Request to {} returned {}, ignoring", parsed, status);
        return None;
    }

    match response.text() {
        Ok(body) => {
            tracing::info!("Fetched {} bytes from {}", body.len(), parsed);
            Some(body)
        }
        Err(e) => {
            tracing::warn!("Failed to read body from {}: {}", parsed, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infer_json_or_url() {
        assert!(matches!(DataSource::infer("{\"topics\": []}"), DataSource::Json(_)));
        assert!(matches!(DataSource::infer("https://example.com/t.json"), DataSource::Url(_)));
        // Leading whitespace is not JSON, same as a plain prefix check.
        assert!(matches!(DataSource::infer(" {}"), DataSource::Url(_)));
    }

    #[test]
    fn literal_json_parses_or_fails_loudly() {
        match load(DataSource::Json("{\"topics\": []}".into())).unwrap() {
            Loaded::Ready(v) => assert_eq!(v, json!({"topics": []})),
            Loaded::Unavailable => panic!("expected data"),
        }
        let err = load(DataSource::Json("{oops".into())).unwrap_err();
        assert!(matches!(err, CloudError::Configuration(_)));
    }

    #[test]
    fn unparseable_url_is_unavailable() {
        assert!(matches!(load(DataSource::Url("not a url".into())).unwrap(), Loaded::Unavailable));
    }
}
