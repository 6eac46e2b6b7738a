use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching, parsing or persisting company data
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Failed to launch the browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to attach to a running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab creation or lookup failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation failed for a reason other than a timeout
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A page did not finish loading within the configured timeout
    #[error("Timed out after {timeout_secs}s loading {url}")]
    Timeout { url: String, timeout_secs: u64 },

    /// The rendered document could not be read back from the tab
    #[error("Failed to read page content: {0}")]
    ContentFailed(String),

    /// The company list could not be opened
    #[error("Input file {path:?} is unavailable: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = ScraperError::Timeout { url: "https://example.com".to_string(), timeout_secs: 5 };
        assert_eq!(err.to_string(), "Timed out after 5s loading https://example.com");
    }

    #[test]
    fn test_input_unavailable_message() {
        let err = ScraperError::InputUnavailable {
            path: PathBuf::from("companies.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("companies.txt"));
    }

    #[test]
    fn test_json_error_converts() {
        let err: ScraperError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ScraperError::Json(_)));
    }
}
