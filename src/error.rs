//! @acp:module "Errors"
//! @acp:summary "Library error type and Result alias"
//! @acp:domain widget
//! @acp:layer types
//!
//! Nothing in the widget surfaces these to the host page. Fallible I/O
//! returns them so the boundary that owns the fail-silent policy can log
//! and degrade to "absent".

/// Errors raised while loading resources or persisted state.
#[derive(Debug, thiserror::Error)]
pub enum WaifuError {
    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote resource answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document was not valid JSON or had the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL (cdn path, referrer, quote service) could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A document lacked a field the caller needs.
    #[error("missing field '{field}' in {document}")]
    MissingField { document: String, field: String },

    /// Configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WaifuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = WaifuError::Status {
            url: "https://cdn.example/model_list.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://cdn.example/model_list.json returned HTTP 404"
        );
    }

    #[test]
    fn test_json_conversion() {
        let err: WaifuError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
