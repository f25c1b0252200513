use candle_core::Device;

use crate::error::Result;

/// Calling contract for a loaded review classifier.
///
/// Implementations take a batch of fixed-length id sequences and return one
/// sentiment score in `[0, 1]` per row, read as P(positive). Everything
/// behind the scores — layer stack, weight layout, how the artifact was
/// trained — is opaque to the pipeline.
pub trait SentimentModel {
    /// Score one batch. Every row of `sequences` must share one length
    /// (the pipeline pads them before they get here).
    fn score_batch(&self, sequences: &[Vec<u32>]) -> Result<Vec<f32>>;

    /// The device the model runs on.
    fn device(&self) -> &Device;
}
