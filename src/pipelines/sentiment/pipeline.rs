use std::sync::Arc;

use super::model::SentimentModel;
use crate::error::{PipelineError, Result};
use crate::pipelines::stats::PipelineStats;
use crate::sequence::PaddingConfig;
use crate::text;
use crate::vocab::WordIndex;

// ============ Output types ============

/// Sentiment label derived from the model score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    /// Score at or above 0.5.
    Positive,
    /// Score below 0.5.
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}

/// A sentiment prediction with label, raw score and confidence.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The predicted sentiment.
    pub sentiment: Sentiment,
    /// Raw model output in `[0, 1]`, read as P(positive).
    pub score: f32,
    /// Confidence percentage: `max(score, 1 - score) * 100`.
    pub confidence: f32,
}

impl Prediction {
    /// Derive label and confidence from a raw model score.
    ///
    /// A score of exactly 0.5 counts as positive, at 50% confidence.
    pub fn from_score(score: f32) -> Self {
        let sentiment = if score >= 0.5 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };
        let confidence = if score >= 0.5 { score } else { 1.0 - score } * 100.0;
        Self {
            sentiment,
            score,
            confidence,
        }
    }
}

/// Single-text output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Sentiment prediction.
    pub prediction: Prediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Single result in batch output.
#[derive(Debug)]
pub struct BatchResult {
    /// Input text.
    pub text: String,
    /// Prediction or error for this input.
    pub prediction: Result<Prediction>,
}

/// Batch output from `run()`.
#[derive(Debug)]
pub struct BatchOutput {
    /// Results for each input.
    pub results: Vec<BatchResult>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Input trait for type-based dispatch ============

#[doc(hidden)]
pub trait SentimentInput<'a> {
    /// Output type for `.run()`.
    type Output;

    #[doc(hidden)]
    fn into_texts(self) -> Vec<&'a str>;
    #[doc(hidden)]
    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output>;
}

impl<'a> SentimentInput<'a> for &'a str {
    type Output = Output;

    fn into_texts(self) -> Vec<&'a str> {
        vec![self]
    }

    fn convert_output(
        _texts: Vec<&'a str>,
        mut predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let prediction = predictions
            .pop()
            .ok_or_else(|| PipelineError::Unexpected("No predictions returned".into()))??;
        Ok(Output { prediction, stats })
    }
}

impl<'a> SentimentInput<'a> for &'a [&'a str] {
    type Output = BatchOutput;

    fn into_texts(self) -> Vec<&'a str> {
        self.to_vec()
    }

    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let results = texts
            .into_iter()
            .zip(predictions)
            .map(|(text, prediction)| BatchResult {
                text: text.to_string(),
                prediction,
            })
            .collect();
        Ok(BatchOutput { results, stats })
    }
}

impl<'a, const N: usize> SentimentInput<'a> for &'a [&'a str; N] {
    type Output = BatchOutput;

    fn into_texts(self) -> Vec<&'a str> {
        self.as_slice().to_vec()
    }

    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let results = texts
            .into_iter()
            .zip(predictions)
            .map(|(text, prediction)| BatchResult {
                text: text.to_string(),
                prediction,
            })
            .collect();
        Ok(BatchOutput { results, stats })
    }
}

// ============ Pipeline ============

/// Classifies movie-review sentiment from a pre-trained binary classifier.
///
/// Construct with [`SentimentPipelineBuilder`](super::SentimentPipelineBuilder),
/// or from an already-loaded model with [`Self::from_parts`].
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::SentimentPipelineBuilder;
/// # fn main() -> candle_sentiment::error::Result<()> {
/// let pipeline = SentimentPipelineBuilder::local_dir("model").build()?;
///
/// // Single text - direct access
/// let output = pipeline.run("A moving, beautifully shot film")?;
/// println!("{} ({:.2}%)", output.prediction.sentiment, output.prediction.confidence);
///
/// // Batch - results include input text
/// let output = pipeline.run(&["Loved it!", "Two hours I want back."])?;
/// for r in output.results {
///     println!("{} → {}", r.text, r.prediction?.sentiment);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipeline<M: SentimentModel> {
    pub(crate) model: Arc<M>,
    pub(crate) word_index: WordIndex,
    pub(crate) padding: PaddingConfig,
}

impl<M: SentimentModel> SentimentPipeline<M> {
    /// Assemble a pipeline from already-loaded parts.
    ///
    /// This is the entry point for custom [`SentimentModel`] implementations;
    /// artifact-backed pipelines come from the builder instead.
    pub fn from_parts(model: M, word_index: WordIndex, padding: PaddingConfig) -> Self {
        Self {
            model: Arc::new(model),
            word_index,
            padding,
        }
    }

    /// Classify review text.
    ///
    /// Single input → [`Output`], batch → [`BatchOutput`].
    pub fn run<'a, I: SentimentInput<'a>>(&self, input: I) -> Result<I::Output> {
        let stats_builder = PipelineStats::start();
        let texts = input.into_texts();
        let item_count = texts.len();

        let predictions = self.score_texts(&texts)?;

        I::convert_output(texts, predictions, stats_builder.finish(item_count))
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }

    /// Fixed sequence length every input is padded or truncated to.
    pub fn max_len(&self) -> usize {
        self.padding.max_len
    }

    // normalize → encode → pad → one forward pass over the whole batch
    fn score_texts(&self, texts: &[&str]) -> Result<Vec<Result<Prediction>>> {
        let sequences: Vec<Vec<u32>> = texts
            .iter()
            .map(|text| self.word_index.encode(&text::tokenize(text)))
            .collect();
        let padded = self.padding.pad_batch(&sequences);

        let scores = self.model.score_batch(&padded)?;
        if scores.len() != texts.len() {
            return Err(PipelineError::Unexpected(format!(
                "model returned {} scores for a batch of {}",
                scores.len(),
                texts.len()
            )));
        }

        Ok(scores
            .into_iter()
            .map(|score| {
                if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                    Err(PipelineError::Unexpected(format!(
                        "model score {score} outside [0, 1]"
                    )))
                } else {
                    Ok(Prediction::from_score(score))
                }
            })
            .collect())
    }
}
