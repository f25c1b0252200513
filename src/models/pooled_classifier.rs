use candle_core::{DType, Device, Tensor};
use candle_nn::{embedding, linear, Embedding, Linear, Module, VarBuilder};

use crate::error::{PipelineError, Result};
use crate::loaders::{ArtifactSource, ModelConfig, ModelConfigLoader, WEIGHTS_FILE};
use crate::pipelines::sentiment::model::SentimentModel;

/// The exported review classifier: embedding table, mean pooling over the
/// sequence, one hidden dense layer with relu, and a sigmoid scalar head.
///
/// The layer stack only matters for mapping safetensors names to weights.
/// Callers see the [`SentimentModel`] contract — fixed-length id rows in,
/// one score per row out — and nothing else about the architecture.
#[derive(Clone)]
pub struct PooledEmbeddingClassifier {
    embedding: Embedding,
    hidden: Linear,
    output: Linear,
    config: ModelConfig,
    device: Device,
}

impl PooledEmbeddingClassifier {
    /// Load the classifier from `config.json` + `model.safetensors`.
    pub(crate) fn new(source: &ArtifactSource, device: Device) -> Result<Self> {
        let config = ModelConfigLoader::new(source.clone()).load()?;
        let weights_path = source.locate(WEIGHTS_FILE)?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)?
        };

        let embedding = embedding(config.vocab_size, config.embedding_dim, vb.pp("embedding"))?;
        let hidden = linear(config.embedding_dim, config.hidden_dim, vb.pp("hidden"))?;
        let output = linear(config.hidden_dim, 1, vb.pp("output"))?;

        tracing::info!(
            vocab_size = config.vocab_size,
            max_len = config.max_len,
            "classifier weights loaded"
        );

        Ok(Self {
            embedding,
            hidden,
            output,
            config,
            device,
        })
    }

    /// Fixed input sequence length the model was exported with.
    pub fn max_len(&self) -> usize {
        self.config.max_len
    }

    fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        // [batch, len] ids -> [batch, len, emb] -> pooled [batch, emb]
        let embedded = self.embedding.forward(input_ids)?;
        let pooled = embedded.mean(1)?;

        let hidden = self.hidden.forward(&pooled)?.relu()?;
        let logits = self.output.forward(&hidden)?;

        // [batch, 1] -> [batch], squashed to [0, 1]
        let scores = candle_nn::ops::sigmoid(&logits)?.squeeze(1)?;
        Ok(scores)
    }
}

impl SentimentModel for PooledEmbeddingClassifier {
    fn score_batch(&self, sequences: &[Vec<u32>]) -> Result<Vec<f32>> {
        if sequences.is_empty() {
            return Ok(vec![]);
        }

        let len = sequences[0].len();
        if sequences.iter().any(|row| row.len() != len) {
            return Err(PipelineError::Unexpected(
                "ragged batch reached the classifier; all rows must share one length".to_string(),
            ));
        }

        let batch = sequences.len();
        let flat: Vec<u32> = sequences.iter().flatten().copied().collect();
        let input_ids = Tensor::from_vec(flat, (batch, len), &self.device)?;

        let scores = self.forward(&input_ids)?;
        Ok(scores.to_vec1::<f32>()?)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
