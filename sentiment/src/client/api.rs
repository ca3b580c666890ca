use super::error::AnalysisError;
use super::models::{AnalysisRequest, AnalysisResult};
use async_trait::async_trait;
use clap::ValueEnum;
use mockall::automock;
use reqwest::StatusCode;
use serde::de::IgnoredAny;
use tracing::{debug, instrument};
use url::Url;

/// Route on the prediction service that receives the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ApiRoute {
    /// `POST {base}/api/analyze`
    #[default]
    Analyze,
    /// `POST {base}/predict`
    Predict,
}

impl ApiRoute {
    pub fn path(&self) -> &'static str {
        match self {
            ApiRoute::Analyze => "/api/analyze",
            ApiRoute::Predict => "/predict",
        }
    }
}

#[automock]
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// Send `text` to the service once and return its answer as an [`AnalysisResult`].
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct HttpSentimentApi {
    client: reqwest::Client,
    base_url: Option<String>,
    route: ApiRoute,
}

impl HttpSentimentApi {
    pub fn new(base_url: Option<String>, route: ApiRoute) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            route,
        }
    }

    pub fn endpoint(&self) -> Result<Url, AnalysisError> {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .ok_or(AnalysisError::MissingBaseUrl)?;

        let raw = format!("{}{}", base.trim_end_matches('/'), self.route.path());
        Url::parse(&raw).map_err(|_| AnalysisError::InvalidBaseUrl {
            url: base.to_string(),
        })
    }

    /// POST `text` once and return the response body untouched, as long as the service
    /// answered `200` with well-formed JSON. The body is not held to the
    /// [`AnalysisResult`] shape.
    #[instrument(skip_all, fields(route = %self.route))]
    pub async fn fetch_raw(&self, text: &str) -> Result<String, AnalysisError> {
        let endpoint = self.endpoint()?;
        debug!("Posting {} bytes of text to {}", text.len(), endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&AnalysisRequest { text })
            .send()
            .await
            .map_err(|source| AnalysisError::Transport { source })?;

        let status = response.status();
        debug!(server = "prediction", "API Response status was {}", status);
        if status != StatusCode::OK {
            return Err(AnalysisError::Server {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| AnalysisError::Transport { source })?;

        serde_json::from_str::<IgnoredAny>(&body)
            .map_err(|source| AnalysisError::Parse { source })?;

        Ok(body)
    }
}

#[async_trait]
impl SentimentApi for HttpSentimentApi {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let body = self.fetch_raw(text).await?;
        serde_json::from_str(&body).map_err(|source| AnalysisError::Parse { source })
    }
}
