use std::sync::Mutex;

use super::model::SentimentModel;
use super::pipeline::{SentimentInput, SentimentPipeline};
use crate::error::{PipelineError, Result};

/// Lifecycle of a [`SentimentService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// No load has been requested yet.
    Uninitialized,
    /// Artifacts are being fetched and parsed.
    Loading,
    /// Artifacts loaded; predictions are available.
    Ready,
    /// The load failed. Terminal — a new service instance is needed to retry.
    Failed,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServiceState::Uninitialized => "uninitialized",
            ServiceState::Loading => "loading",
            ServiceState::Ready => "ready",
            ServiceState::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

enum Slot<M: SentimentModel> {
    Uninitialized,
    Loading,
    Ready(SentimentPipeline<M>),
    Failed(String),
}

impl<M: SentimentModel> Slot<M> {
    fn state(&self) -> ServiceState {
        match self {
            Slot::Uninitialized => ServiceState::Uninitialized,
            Slot::Loading => ServiceState::Loading,
            Slot::Ready(_) => ServiceState::Ready,
            Slot::Failed(_) => ServiceState::Failed,
        }
    }
}

/// Readiness gate around a [`SentimentPipeline`].
///
/// Artifacts load once, at startup. Until both finish, [`Self::predict`]
/// reports [`PipelineError::NotReady`] instead of returning a stale or
/// default score, and a failed load keeps the service disabled — there is
/// no automatic retry.
///
/// The gate is `Sync`: a front end may run [`Self::load`] on a background
/// thread and poll [`Self::state`] to decide when to enable its submit
/// action.
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::{SentimentPipelineBuilder, SentimentService};
/// let service = SentimentService::new();
/// assert!(service.predict("great film").is_err());
///
/// service.load(|| SentimentPipelineBuilder::local_dir("model").build());
///
/// if let Ok(output) = service.predict("great film") {
///     println!("{} ({:.2}%)", output.prediction.sentiment, output.prediction.confidence);
/// }
/// ```
pub struct SentimentService<M: SentimentModel> {
    slot: Mutex<Slot<M>>,
}

impl<M: SentimentModel> SentimentService<M> {
    /// Create a service with no pipeline loaded yet.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Uninitialized),
        }
    }

    /// Run `loader`, transitioning `Loading → Ready` on success or
    /// `Loading → Failed` on error.
    ///
    /// The lock is released while `loader` runs, so other threads observe
    /// `Loading` during the fetch instead of blocking on [`Self::state`].
    pub fn load<F>(&self, loader: F)
    where
        F: FnOnce() -> Result<SentimentPipeline<M>>,
    {
        *self.slot.lock().unwrap() = Slot::Loading;

        let outcome = loader();

        let mut slot = self.slot.lock().unwrap();
        match outcome {
            Ok(pipeline) => {
                tracing::info!("sentiment service ready");
                *slot = Slot::Ready(pipeline);
            }
            Err(e) => {
                tracing::error!(error = %e, "artifact load failed; service disabled");
                *slot = Slot::Failed(e.to_string());
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.slot.lock().unwrap().state()
    }

    /// The load failure message, when the state is `Failed`.
    pub fn failure(&self) -> Option<String> {
        match &*self.slot.lock().unwrap() {
            Slot::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Classify review text. Valid only in `Ready`.
    ///
    /// Accepts the same inputs as [`SentimentPipeline::run`]: a single
    /// `&str` or a slice of them.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NotReady`] carrying the current state when the
    /// service is not `Ready`.
    pub fn predict<'a, I: SentimentInput<'a>>(&self, input: I) -> Result<I::Output> {
        let slot = self.slot.lock().unwrap();
        match &*slot {
            Slot::Ready(pipeline) => pipeline.run(input),
            other => Err(PipelineError::NotReady(other.state())),
        }
    }
}

impl<M: SentimentModel> Default for SentimentService<M> {
    fn default() -> Self {
        Self::new()
    }
}
