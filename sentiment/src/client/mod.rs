use clap::ValueEnum;
use std::sync::Arc;
use tracing::{error, warn};

mod api;
mod error;
mod fallback;
mod models;

pub mod prelude {
    pub use super::api::{ApiRoute, HttpSentimentApi, MockSentimentApi, SentimentApi};
    pub use super::error::{AnalysisError, ErrorKind};
    pub use super::fallback::{synthesize as synthesize_fallback, FALLBACK_CONFIDENCE};
    pub use super::models::{AnalysisRequest, AnalysisResult, Sentiment};
    pub use super::{AnalysisClient, AnalysisOutcome, FailurePolicy};
}

use api::SentimentApi;
use error::AnalysisError;
use models::AnalysisResult;

/// How a call site reacts when the prediction service cannot produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and substitute a synthesized result.
    #[default]
    Fallback,
    /// Log the failure and hand it back to the caller.
    Propagate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Resolved(AnalysisResult),
    /// Synthesized locally after the service failed; `reason` is the error that was masked.
    Fallback {
        result: AnalysisResult,
        reason: String,
    },
}

impl AnalysisOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Resolved(result) => result,
            AnalysisOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Resolved(result) => result,
            AnalysisOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }
}

/// Issues one request per call against a [`SentimentApi`] and applies the configured
/// [`FailurePolicy`] to failures.
#[derive(Clone)]
pub struct AnalysisClient {
    api: Arc<dyn SentimentApi>,
    policy: FailurePolicy,
}

impl AnalysisClient {
    pub fn new(api: Arc<dyn SentimentApi>, policy: FailurePolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisOutcome, AnalysisError> {
        let response = self.api.analyze(text).await;

        match (response, self.policy) {
            (Ok(result), _) => Ok(AnalysisOutcome::Resolved(result)),
            (Err(e), FailurePolicy::Propagate) => {
                error!(kind = %e.kind(), "Error analyzing sentiment: {}", e);
                Err(e)
            }
            (Err(e), FailurePolicy::Fallback) => {
                warn!(kind = %e.kind(), "Analysis failed, using a synthesized result: {}", e);
                let result = {
                    let mut rng = rand::rng();
                    fallback::synthesize(&mut rng)
                };
                Ok(AnalysisOutcome::Fallback {
                    result,
                    reason: e.to_string(),
                })
            }
        }
    }
}
