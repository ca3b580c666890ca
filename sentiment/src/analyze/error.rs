use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Unable to read text from stdin. {0}")]
    StdinError(#[from] std::io::Error),
    #[error("Prompt failed. {0}")]
    PromptError(#[from] inquire::InquireError),
}
