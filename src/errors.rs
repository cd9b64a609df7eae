//! Error types for the tappay-rs library.
//!
//! Only local failures are represented here: bad configuration, transport
//! failures and JSON (de)serialization problems. Rejections by TapPay itself
//! arrive as a non-zero `status` inside a successfully decoded response and
//! are left for the caller to interpret.

use thiserror::Error;

/// Main error type for TapPay client operations.
#[derive(Error, Debug)]
pub enum TapPayError {
    /// Error during HTTP request/response handling
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error resolving a service path against the base URL
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Configuration error, e.g. an unusable base URL
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request parameters that cannot be sent as a JSON object
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    /// A caller-supplied deadline expired before the response arrived
    #[error("Timeout exceeded")]
    TimeoutExceeded,
}

/// Result type alias for TapPay operations.
pub type Result<T> = std::result::Result<T, TapPayError>;
