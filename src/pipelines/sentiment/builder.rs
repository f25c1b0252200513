use std::path::Path;

use super::pipeline::SentimentPipeline;
use crate::error::Result;
use crate::loaders::{ArtifactSource, WordIndexLoader};
use crate::models::PooledEmbeddingClassifier;
use crate::pipelines::cache::global_cache;
use crate::pipelines::utils::{build_cache_key, DeviceRequest};
use crate::sequence::{PaddingConfig, Side};

/// Builder for [`SentimentPipeline`] instances backed by exported
/// classifier artifacts.
///
/// Entry points are [`Self::local_dir`] and [`Self::hf_hub`]; everything
/// else is optional. The fixed sequence length defaults to whatever the
/// model's `config.json` declares.
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::SentimentPipelineBuilder;
/// # fn main() -> candle_sentiment::error::Result<()> {
/// let pipeline = SentimentPipelineBuilder::local_dir("model")
///     .cuda(0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipelineBuilder {
    source: ArtifactSource,
    device_request: DeviceRequest,
    max_len: Option<usize>,
    padding: Side,
    truncation: Side,
    fill: u32,
}

impl SentimentPipelineBuilder {
    fn new(source: ArtifactSource) -> Self {
        let defaults = PaddingConfig::default();
        Self {
            source,
            device_request: DeviceRequest::default(),
            max_len: None,
            padding: defaults.padding,
            truncation: defaults.truncation,
            fill: defaults.fill,
        }
    }

    /// Load artifacts from a local directory containing `config.json`,
    /// `model.safetensors` and `word_index.json`.
    pub fn local_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(ArtifactSource::LocalDir(dir.as_ref().to_path_buf()))
    }

    /// Fetch artifacts from a Hugging Face Hub model repo.
    pub fn hf_hub(repo: impl Into<String>) -> Self {
        Self::new(ArtifactSource::HfHub { repo: repo.into() })
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Override the fixed sequence length from the model config.
    ///
    /// Only useful against artifacts exported with a different shape; the
    /// model rejects inputs whose length disagrees with its weights.
    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    /// Attach the fill block at the front instead of the back.
    pub fn padding_side(mut self, side: Side) -> Self {
        self.padding = side;
        self
    }

    /// Drop excess elements from the front instead of the back.
    pub fn truncation_side(mut self, side: Side) -> Self {
        self.truncation = side;
        self
    }

    /// Value written into fill positions (default 0, the reserved pad id).
    pub fn fill_value(mut self, fill: u32) -> Self {
        self.fill = fill;
        self
    }

    /// Load both artifacts and assemble the pipeline.
    ///
    /// Classifier weights are shared through a process-wide cache, so
    /// building twice over the same source and device loads them once.
    ///
    /// # Errors
    ///
    /// Returns an error if either artifact is missing or malformed, or if
    /// device initialization fails.
    pub fn build(self) -> Result<SentimentPipeline<PooledEmbeddingClassifier>> {
        let device = self.device_request.resolve()?;

        let cache_key = build_cache_key(&self.source, &device);
        let model = global_cache().get_or_create(&cache_key, || {
            PooledEmbeddingClassifier::new(&self.source, device.clone())
        })?;

        let word_index = WordIndexLoader::new(self.source.clone()).load()?;

        let padding = PaddingConfig {
            max_len: self.max_len.unwrap_or_else(|| model.max_len()),
            padding: self.padding,
            truncation: self.truncation,
            fill: self.fill,
        };

        Ok(SentimentPipeline {
            model,
            word_index,
            padding,
        })
    }
}
