mod cli;
mod component;
mod error;
mod interactive;
mod render;

pub mod prelude {
    pub use super::cli::{analyze_root, AnalyzeArgs};
    pub use super::component::{SentimentAnalyzer, SubmitStatus, UiState};
    pub use super::error::AnalyzeError;
    pub use super::interactive::{interactive_root, InteractiveArgs};
    pub use super::render::{
        format_confidence, render, AnalyzerView, IndicatorColor, ResultPanel, BUSY_LABEL,
        SUBMIT_LABEL,
    };
}
