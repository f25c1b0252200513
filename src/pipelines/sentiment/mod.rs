//! Movie-review sentiment pipeline.
//!
//! Classifies free text as `Positive` or `Negative` with a confidence
//! percentage, using a pre-trained binary classifier and its vocabulary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use candle_sentiment::sentiment::SentimentPipelineBuilder;
//!
//! # fn main() -> candle_sentiment::error::Result<()> {
//! let pipeline = SentimentPipelineBuilder::local_dir("model").build()?;
//!
//! let output = pipeline.run("One of the best films I have seen in years")?;
//! println!(
//!     "sentiment: {} (confidence: {:.2}%)",
//!     output.prediction.sentiment, output.prediction.confidence
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Inference
//!
//! Analyze multiple reviews at once (returns `BatchOutput`):
//!
//! ```rust,no_run
//! # use candle_sentiment::sentiment::SentimentPipelineBuilder;
//! # fn main() -> candle_sentiment::error::Result<()> {
//! # let pipeline = SentimentPipelineBuilder::local_dir("model").build()?;
//! let reviews = &[
//!     "Best movie night in ages!",
//!     "Flat characters, predictable plot.",
//! ];
//!
//! let output = pipeline.run(reviews)?;
//!
//! for r in output.results {
//!     let p = r.prediction?;
//!     println!("{}: {} ({:.2}%)", r.text, p.sentiment, p.confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Startup gating
//!
//! Front ends that must not call `predict` before the artifacts are in
//! memory wrap the pipeline in a [`SentimentService`], which answers
//! `NotReady` until its load completes.

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;
pub(crate) mod service;

// ============ Public API ============

pub use crate::models::PooledEmbeddingClassifier;
pub use crate::pipelines::stats::PipelineStats;
pub use builder::SentimentPipelineBuilder;
pub use model::SentimentModel;
pub use pipeline::{BatchOutput, BatchResult, Output, Prediction, Sentiment, SentimentPipeline};
pub use service::{SentimentService, ServiceState};

#[doc(hidden)]
pub use pipeline::SentimentInput;
