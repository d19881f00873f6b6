//! Custom error types for the Library Logger UI runtime
//!
//! Only the setup paths return these errors. Page-level operations (toasts,
//! modals, API calls) swallow their failures and degrade to no-ops or `None`.

use std::fmt;

/// Main error type for the Library Logger UI runtime
#[derive(Debug)]
pub enum LibraryLoggerError {
    /// An HTTP request could not be built, sent or decoded
    Http(reqwest::Error),

    /// A configured URL could not be parsed
    InvalidUrl(url::ParseError),

    /// Error occurred while reading configuration file
    ConfigRead(std::io::Error),

    /// Error occurred while parsing configuration
    ConfigParse(json5::Error),

    /// A markup template failed to render
    Render(askama::Error),

    /// Generic error with a message
    Generic(String),
}

impl fmt::Display for LibraryLoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryLoggerError::Http(e) => {
                write!(f, "HTTP request failed: {e}")
            }
            LibraryLoggerError::InvalidUrl(e) => {
                write!(f, "Invalid URL: {e}")
            }
            LibraryLoggerError::ConfigRead(e) => {
                write!(f, "Failed to read configuration file: {e}")
            }
            LibraryLoggerError::ConfigParse(e) => {
                write!(f, "Failed to parse configuration: {e}")
            }
            LibraryLoggerError::Render(e) => {
                write!(f, "Failed to render template: {e}")
            }
            LibraryLoggerError::Generic(msg) => {
                write!(f, "Error: {msg}")
            }
        }
    }
}

impl std::error::Error for LibraryLoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryLoggerError::Http(e) => Some(e),
            LibraryLoggerError::InvalidUrl(e) => Some(e),
            LibraryLoggerError::ConfigRead(e) => Some(e),
            LibraryLoggerError::ConfigParse(e) => Some(e),
            LibraryLoggerError::Render(e) => Some(e),
            LibraryLoggerError::Generic(_) => None,
        }
    }
}

impl From<reqwest::Error> for LibraryLoggerError {
    fn from(error: reqwest::Error) -> Self {
        LibraryLoggerError::Http(error)
    }
}

impl From<url::ParseError> for LibraryLoggerError {
    fn from(error: url::ParseError) -> Self {
        LibraryLoggerError::InvalidUrl(error)
    }
}

impl From<std::io::Error> for LibraryLoggerError {
    fn from(error: std::io::Error) -> Self {
        LibraryLoggerError::ConfigRead(error)
    }
}

impl From<json5::Error> for LibraryLoggerError {
    fn from(error: json5::Error) -> Self {
        LibraryLoggerError::ConfigParse(error)
    }
}

impl From<askama::Error> for LibraryLoggerError {
    fn from(error: askama::Error) -> Self {
        LibraryLoggerError::Render(error)
    }
}

impl From<&str> for LibraryLoggerError {
    fn from(message: &str) -> Self {
        LibraryLoggerError::Generic(message.to_string())
    }
}

impl From<String> for LibraryLoggerError {
    fn from(message: String) -> Self {
        LibraryLoggerError::Generic(message)
    }
}

/// Result type alias using our custom error type
pub type Result<T> = std::result::Result<T, LibraryLoggerError>;
