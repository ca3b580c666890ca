use crate::client::prelude::{synthesize_fallback, ApiRoute, FailurePolicy};
use crate::report_stdout;
use crate::shared::prelude::FoundConfig;
use anyhow::Result;
use clap::Args;
use std::io::Write;
use tracing::{error, warn};

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// The text that should be sent to the prediction service
    #[arg(required = true)]
    text: Vec<String>,
}

/// Calls the prediction service directly and prints its JSON answer unchanged.
pub async fn predict_root(found_config: &FoundConfig, args: &PredictArgs) -> Result<i32> {
    let api = found_config.http_api(ApiRoute::Predict);
    let text = args.text.join(" ");

    let body = match api.fetch_raw(&text).await {
        Ok(body) => body,
        Err(e) => match found_config.policy_or(FailurePolicy::Propagate) {
            FailurePolicy::Propagate => {
                error!(target: "user", kind = %e.kind(), "Unable to get a prediction: {}", e);
                return Ok(1);
            }
            FailurePolicy::Fallback => {
                warn!(target: "user", kind = %e.kind(), "Prediction service unavailable, printing a synthesized result: {}", e);
                let result = {
                    let mut rng = rand::rng();
                    synthesize_fallback(&mut rng)
                };
                serde_json::to_string(&result)?
            }
        },
    };

    report_stdout!("{}", body.trim_end());

    Ok(0)
}
