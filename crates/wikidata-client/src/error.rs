//! Error types for the Wikidata clients

use thiserror::Error;

use crate::http::HttpError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Non-success status from an endpoint
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Structured error returned by the Action API
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    /// Write attempted without a configured OAuth token
    #[error("An OAuth token is required for write operations")]
    AuthRequired,
}
