use thiserror::Error;

/// Rejected user input, detected before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be a finite number greater than zero")]
    InvalidAmount,
    #[error("note must not be empty")]
    EmptyNote,
    #[error("amount must be a finite number")]
    NotANumber,
    #[error("date must be a YYYY-MM-DD calendar date")]
    InvalidDate,
}

/// Failure talking to the server. The held snapshot is left as it was.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to build http client: {0}")]
    Setup(#[source] reqwest::Error),
    #[error("transaction rejected before sending: {0}")]
    Invalid(#[from] ValidationError),
    #[error("failed to fetch data: {0}")]
    FetchFailed(#[source] reqwest::Error),
    #[error("request to [{endpoint}] failed: {source}")]
    SubmitFailed {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl SyncError {
    pub fn submit_failed(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::SubmitFailed { endpoint, source }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Setup(err) | Self::FetchFailed(err) => err.status(),
            Self::SubmitFailed { source, .. } => source.status(),
            Self::Invalid(_) => None,
        }
    }
}
