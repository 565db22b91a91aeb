use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsultError {
    #[error("consult backend is not configured")]
    NotConfigured,

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("consult timed out after {0}s")]
    Timeout(u64),
}
