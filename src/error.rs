//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`PipelineError`]
//! as the error type. Out-of-vocabulary tokens are deliberately *not* an
//! error anywhere in the crate — they map to a reserved sentinel id instead.

use thiserror::Error;

use crate::sentiment::ServiceState;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust,no_run
/// use candle_sentiment::error::PipelineError;
///
/// fn handle_error(e: PipelineError) {
///     match &e {
///         PipelineError::Artifact(_) => {
///             // Bad or missing model/vocabulary file - check the export
///         }
///         PipelineError::Download(_) => {
///             // Network issue - retry with backoff
///         }
///         PipelineError::NotReady(_) => {
///             // Artifacts still loading (or load failed) - wait or reload
///         }
///         PipelineError::Device(_) => {
///             // GPU unavailable - fall back to CPU
///         }
///         PipelineError::Unexpected(_) => {
///             // Internal error - report bug
///             eprintln!("Internal error: {e}");
///         }
///         _ => {
///             // Future error variants
///         }
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Artifact read or parse failure at load time. Not retried; the
    /// service that attempted the load stays non-ready.
    #[error("{0}")]
    Artifact(String),

    /// Network or download failure. Retry may help.
    #[error("{0}")]
    Download(String),

    /// Predict was invoked before both artifacts finished loading.
    #[error("model not ready (state: {0})")]
    NotReady(ServiceState),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {value}"))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Artifact(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Artifact(value.to_string())
    }
}
