use serde::{Deserialize, Serialize};
use std::fmt;

/// Label predicted by the service. Labels other than `positive` and `negative` are kept
/// verbatim so a response is never rewritten on its way through the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Other(String),
}

impl Sentiment {
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Other(label) => label,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Sentiment::Positive)
    }
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Other(value),
        }
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        match value {
            Sentiment::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Fraction in `[0, 1]`; the client does not enforce the range.
    pub confidence: f64,
}

impl AnalysisResult {
    pub fn new(sentiment: Sentiment, confidence: f64) -> Self {
        Self {
            sentiment,
            confidence,
        }
    }
}
