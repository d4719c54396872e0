use thiserror::Error;

/// Why an outbound lookup produced nothing. Never leaves the service that
/// issued the call: the public operations log it and degrade to empty.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl SourceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Http(err) if err.is_timeout())
    }
}
