use thiserror::Error;

/// Errors talking to the Descope management API.
#[derive(Error, Debug)]
pub enum DescopeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status; `message` is Descope's error description when present.
    #[error("Descope error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Descope URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected Descope response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, DescopeError>;
