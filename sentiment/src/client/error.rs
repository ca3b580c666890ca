use thiserror::Error;

/// Coarse grouping of [`AnalysisError`], used when callers only care about where the
/// request broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    Transport,
    Server,
    Parse,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No base URL configured for the prediction service")]
    MissingBaseUrl,
    #[error("Unable to resolve the prediction endpoint from base URL `{url}`")]
    InvalidBaseUrl { url: String },
    #[error("Network error or API is down. {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("Prediction service responded with status {status}")]
    Server { status: u16 },
    #[error("Unable to parse prediction response. {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingBaseUrl
            | AnalysisError::InvalidBaseUrl { .. }
            | AnalysisError::Transport { .. } => ErrorKind::Transport,
            AnalysisError::Server { .. } => ErrorKind::Server,
            AnalysisError::Parse { .. } => ErrorKind::Parse,
        }
    }
}
