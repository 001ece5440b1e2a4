//! Error types for the crawler
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The taxonomy matters for control flow: transport failures and
//! non-success HTTP statuses are retryable and feed the backoff
//! controller; malformed responses, signing failures, and configuration
//! problems are fatal and end the crawl immediately.

use thiserror::Error;

/// The main error type for the crawler
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Auth Errors
    // ============================================================================
    #[error("Request signing failed: {message}")]
    Signing { message: String },

    // ============================================================================
    // Crawl Errors
    // ============================================================================
    #[error("Crawl aborted: retry delay ceiling reached")]
    CrawlAborted,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Every non-2xx status is retryable — the server answers 429/5xx for
    /// transient overload and the search endpoint has been seen returning
    /// 4xx while rate limiting. Decode and signing failures are not: a
    /// malformed page will be malformed on the next attempt too.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::HttpStatus { .. })
    }
}

/// Result type alias for the crawler
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(503, "overloaded");
        assert_eq!(err.to_string(), "HTTP 503: overloaded");

        let err = Error::decode("missing items");
        assert_eq!(err.to_string(), "Failed to decode response: missing items");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());
        // The search API rate-limits with plain 4xx at times; every
        // non-success status goes through the backoff controller.
        assert!(Error::http_status(403, "").is_retryable());

        assert!(!Error::decode("bad shape").is_retryable());
        assert!(!Error::signing("no key").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::CrawlAborted.is_retryable());
    }
}
