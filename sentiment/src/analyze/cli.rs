use super::component::{SentimentAnalyzer, SubmitStatus};
use super::error::AnalyzeError;
use crate::client::prelude::{AnalysisError, ApiRoute, FailurePolicy};
use crate::report_stdout;
use crate::shared::prelude::{progress_bar_without_pos, FoundConfig};
use anyhow::Result;
use clap::Args;
use std::future::Future;
use std::io::{IsTerminal, Write};
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, info_span, Instrument};
use tracing_indicatif::span_ext::IndicatifSpanExt;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Text to analyze. When omitted and stdin is not a terminal, the text is read from stdin.
    text: Vec<String>,
}

pub async fn analyze_root(found_config: &FoundConfig, args: &AnalyzeArgs) -> Result<i32> {
    let text = if args.text.is_empty() && !std::io::stdin().is_terminal() {
        read_from_stdin().await?
    } else {
        args.text.join(" ")
    };

    let analyzer = SentimentAnalyzer::new(
        found_config.analysis_client(ApiRoute::Analyze, FailurePolicy::Fallback),
    );

    let status = with_busy_indicator(analyzer.submit(&text)).await;
    Ok(report_submit(&analyzer, status).await)
}

/// Writes the outcome of a submit for the user and maps it to an exit code.
pub(super) async fn report_submit(
    analyzer: &SentimentAnalyzer,
    status: Result<SubmitStatus, AnalysisError>,
) -> i32 {
    match status {
        Ok(SubmitStatus::Skipped) => {
            info!(target: "user", "Nothing to analyze, enter some text first.");
            0
        }
        Ok(SubmitStatus::Stale) => {
            debug!(target: "user", "Result was superseded by a newer request");
            0
        }
        Ok(status) => {
            if status == SubmitStatus::Fallback {
                debug!(target: "user", "Prediction service unavailable, result was synthesized");
            }
            let view = analyzer.view().await;
            report_stdout!("{}", view.to_terminal());
            0
        }
        Err(e) => {
            error!(target: "user", "Analysis failed: {}", e);
            1
        }
    }
}

/// Shows a spinner for the duration of `fut`.
pub(super) async fn with_busy_indicator<F: Future>(fut: F) -> F::Output {
    let span = info_span!("analyze", "indicatif.pb_show" = true);
    span.pb_set_style(&progress_bar_without_pos());
    span.pb_set_message(super::render::BUSY_LABEL);

    fut.instrument(span).await
}

async fn read_from_stdin() -> Result<String, AnalyzeError> {
    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    Ok(buffer)
}
