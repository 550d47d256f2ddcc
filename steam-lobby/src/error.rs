use thiserror::Error;

#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("steamid not found: {0}")]
    NotFound(String),

    #[error("could not resolve name '{name}': {message}")]
    UnresolvedName { name: String, message: String },

    #[error("invalid profile reference: {0:?}")]
    InvalidReference(String),
}

impl LobbyError {
    /// True when the underlying request hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LobbyError::Http(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, LobbyError>;
