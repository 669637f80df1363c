use thiserror::Error;

use crate::llm_client::LlmError;

/// Failures of one interview-question run. Everything except `Completion` and
/// `Cancelled` is raised before the completion call is made.
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("must specify a job title or description")]
    InvalidInput,

    #[error("request settings are required")]
    MissingSettings,

    #[error("request settings are missing `{0}`")]
    IncompleteSettings(&'static str),

    #[error("completion call failed: {0}")]
    Completion(#[from] LlmError),

    #[error("request was cancelled")]
    Cancelled,
}
