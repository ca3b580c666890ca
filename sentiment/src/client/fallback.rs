use super::models::{AnalysisResult, Sentiment};
use rand::Rng;
use std::ops::Range;

/// Range the synthesized confidence is drawn from. This is demo behaviour, not a model
/// calibration.
pub const FALLBACK_CONFIDENCE: Range<f64> = 0.6..1.0;

/// Produce a stand-in result when the prediction service could not answer.
pub fn synthesize<R: Rng>(rng: &mut R) -> AnalysisResult {
    let sentiment = if rng.random_bool(0.5) {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    };

    AnalysisResult::new(sentiment, rng.random_range(FALLBACK_CONFIDENCE))
}
