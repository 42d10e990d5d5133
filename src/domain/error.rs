// Pipeline failure taxonomy
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// Network, auth or upstream status failure
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Response missing required fields, unparseable values or a cursor loop
    #[error("malformed page: {0}")]
    MalformedPage(String),

    /// The caller abandoned the run
    #[error("run cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PipelineError::MalformedPage(err.to_string())
        } else {
            PipelineError::SourceUnavailable(err.to_string())
        }
    }
}
