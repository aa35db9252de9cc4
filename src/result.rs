//! Result and error types for the suite.

use thiserror::Error;

/// Result type for all suite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the storefront.
#[derive(Debug, Error)]
pub enum Error {
    /// Browser launch error
    #[error("failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page-level error (evaluation, element access)
    #[error("page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An element never reached the required state. Always fatal to the
    /// current test; page objects never retry past this.
    #[error("timed out after {ms}ms waiting on {selector}")]
    Timeout {
        /// Selector that was waited on
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Screenshot capture error
    #[error("screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// A setting could not be coerced to its declared type. Fatal at
    /// process start, before any test runs.
    #[error("invalid configuration for {key}: {message}")]
    Config {
        /// Environment variable that failed to parse
        key: String,
        /// Error message
        message: String,
    },

    /// A composed fixture's precondition did not hold
    #[error("fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is an element-wait timeout. Probe methods
    /// (`is_visible`/`is_hidden`) use this to convert the one permitted
    /// timeout into a boolean instead of failing the test.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_names_selector() {
        let err = Error::Timeout {
            selector: "[data-test=\"login-button\"]".to_string(),
            ms: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("5000ms"));
        assert!(msg.contains("login-button"));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_config_error_names_key() {
        let err = Error::Config {
            key: "SWAG_TIMEOUT_MS".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        assert!(err.to_string().contains("SWAG_TIMEOUT_MS"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
    }
}
