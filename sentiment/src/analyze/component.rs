use super::render::{render, AnalyzerView};
use crate::client::prelude::{AnalysisClient, AnalysisError, AnalysisResult};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Snapshot of what the analyzer currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub text: String,
    pub result: Option<AnalysisResult>,
    pub is_loading: bool,
}

/// What happened to a single `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Text was blank, nothing was sent.
    Skipped,
    /// The service answered and the result is shown.
    Applied,
    /// The service failed and a synthesized result is shown.
    Fallback,
    /// A newer submit or a clear happened while this one was in flight, the response was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct Inner {
    text: String,
    result: Option<AnalysisResult>,
    in_flight: usize,
    latest_seq: u64,
}

impl Inner {
    fn snapshot(&self) -> UiState {
        UiState {
            text: self.text.clone(),
            result: self.result.clone(),
            is_loading: self.in_flight > 0,
        }
    }
}

/// Owns the text, the last result and the loading flag for one session, and runs the
/// request/response cycle against an [`AnalysisClient`].
///
/// Every submit is tagged with a sequence number. `clear` also advances it. Only the
/// response carrying the latest number is applied; older ones are dropped. Nothing stops
/// a second submit while one is loading, the view disables the trigger instead.
pub struct SentimentAnalyzer {
    client: AnalysisClient,
    inner: RwLock<Inner>,
}

impl SentimentAnalyzer {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            client,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub async fn state(&self) -> UiState {
        self.inner.read().await.snapshot()
    }

    pub async fn view(&self) -> AnalyzerView {
        render(&self.state().await)
    }

    pub async fn set_text(&self, text: &str) {
        self.inner.write().await.text = text.to_string();
    }

    /// Resets text and result. Leaves in-flight requests running, their responses are
    /// discarded when they land.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.text.clear();
        inner.result = None;
        inner.latest_seq += 1;
    }

    #[instrument(skip_all)]
    pub async fn submit(&self, text: &str) -> Result<SubmitStatus, AnalysisError> {
        if text.trim().is_empty() {
            debug!("Blank text, skipping analysis");
            return Ok(SubmitStatus::Skipped);
        }

        let seq = {
            let mut inner = self.inner.write().await;
            inner.text = text.to_string();
            inner.latest_seq += 1;
            inner.in_flight += 1;
            inner.latest_seq
        };

        let outcome = self.client.analyze(text).await;

        let mut inner = self.inner.write().await;
        inner.in_flight = inner.in_flight.saturating_sub(1);

        if seq != inner.latest_seq {
            debug!(
                seq,
                latest = inner.latest_seq,
                "Discarding response for superseded request"
            );
            return Ok(SubmitStatus::Stale);
        }

        let outcome = outcome?;
        let status = if outcome.is_fallback() {
            SubmitStatus::Fallback
        } else {
            SubmitStatus::Applied
        };
        inner.result = Some(outcome.into_result());

        Ok(status)
    }
}
