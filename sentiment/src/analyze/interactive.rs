use super::cli::{report_submit, with_busy_indicator};
use super::component::SentimentAnalyzer;
use super::error::AnalyzeError;
use crate::client::prelude::{ApiRoute, FailurePolicy};
use crate::shared::prelude::FoundConfig;
use anyhow::Result;
use clap::Args;
use inquire::InquireError;
use tracing::info;

const CLEAR_COMMAND: &str = ":clear";
const QUIT_COMMANDS: [&str; 2] = [":quit", ":q"];

#[derive(Debug, Args)]
pub struct InteractiveArgs {}

enum PromptAction {
    Submit(String),
    Clear,
    Quit,
}

pub async fn interactive_root(found_config: &FoundConfig, _args: &InteractiveArgs) -> Result<i32> {
    let analyzer = SentimentAnalyzer::new(
        found_config.analysis_client(ApiRoute::Analyze, FailurePolicy::Fallback),
    );

    info!(target: "user", "Analyze the emotional tone of your text");

    loop {
        let clear_visible = analyzer.view().await.clear_visible;
        let action = tracing_indicatif::suspend_tracing_indicatif(|| prompt_for_text(clear_visible))?;

        match action {
            PromptAction::Quit => break,
            PromptAction::Clear => {
                analyzer.clear().await;
                info!(target: "user", "Cleared");
            }
            PromptAction::Submit(text) => {
                let status = with_busy_indicator(analyzer.submit(&text)).await;
                report_submit(&analyzer, status).await;
            }
        }
    }

    Ok(0)
}

fn prompt_for_text(clear_visible: bool) -> Result<PromptAction, AnalyzeError> {
    let help = if clear_visible {
        format!("{} to reset, {} to exit", CLEAR_COMMAND, QUIT_COMMANDS[0])
    } else {
        format!("{} to exit", QUIT_COMMANDS[0])
    };

    let answer = inquire::Text::new("Enter your text")
        .with_placeholder("Type or paste your text here...")
        .with_help_message(&help)
        .prompt();

    match answer {
        Ok(line) => Ok(parse_action(line)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(PromptAction::Quit)
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_action(line: String) -> PromptAction {
    match line.trim() {
        CLEAR_COMMAND => PromptAction::Clear,
        command if QUIT_COMMANDS.contains(&command) => PromptAction::Quit,
        _ => PromptAction::Submit(line),
    }
}
