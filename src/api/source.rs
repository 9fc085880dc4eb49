use std::fmt;

use async_trait::async_trait;

use crate::core::country::Country;

/// Errors that can occur while fetching the dataset.
/// None of them are retried automatically; the user re-triggers the load.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (DNS, connection refused, TLS).
    Network(String),
    /// The endpoint answered with a non-2xx status.
    Status { status: u16, message: String },
    /// The payload was not a list of country records.
    Parse(String),
    /// A local snapshot could not be read.
    Io(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

/// Where country records come from.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Short human-readable name, shown in the status bar.
    fn name(&self) -> &str;

    /// Fetches the full dataset once.
    async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FetchError::Status {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
        assert_eq!(
            FetchError::Network("refused".into()).to_string(),
            "network error: refused"
        );
    }

    #[test]
    fn test_from_serde_error_is_parse() {
        let err: FetchError = serde_json::from_str::<Vec<u8>>("nope").unwrap_err().into();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
