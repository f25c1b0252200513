use std::sync::{Arc, Mutex};

use candle_core::Device;
use candle_sentiment::error::{PipelineError, Result};
use candle_sentiment::sentiment::{
    Sentiment, SentimentModel, SentimentPipeline, SentimentService, ServiceState,
};
use candle_sentiment::sequence::PaddingConfig;
use candle_sentiment::vocab::WordIndex;

/// Stub classifier: returns a fixed score for every row and records the
/// batches it was given, so tests can assert on the exact input shape the
/// pipeline produces.
struct FixedScoreModel {
    score: f32,
    device: Device,
    batches: Arc<Mutex<Vec<Vec<Vec<u32>>>>>,
}

impl SentimentModel for FixedScoreModel {
    fn score_batch(&self, sequences: &[Vec<u32>]) -> Result<Vec<f32>> {
        self.batches.lock().unwrap().push(sequences.to_vec());
        Ok(vec![self.score; sequences.len()])
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

type BatchLog = Arc<Mutex<Vec<Vec<Vec<u32>>>>>;

fn word_index() -> WordIndex {
    WordIndex::from_json_str(r#"{"great": 12, "film": 31, "good": 5, "bad": 7}"#).unwrap()
}

fn pipeline(score: f32, max_len: usize) -> (SentimentPipeline<FixedScoreModel>, BatchLog) {
    let batches: BatchLog = Arc::new(Mutex::new(Vec::new()));
    let model = FixedScoreModel {
        score,
        device: Device::Cpu,
        batches: batches.clone(),
    };
    let padding = PaddingConfig {
        max_len,
        ..PaddingConfig::default()
    };
    (
        SentimentPipeline::from_parts(model, word_index(), padding),
        batches,
    )
}

#[test]
fn high_scoring_review_is_positive() -> Result<()> {
    let (pipeline, _) = pipeline(0.82, 236);

    let output = pipeline.run("great film")?;
    assert_eq!(output.prediction.sentiment, Sentiment::Positive);
    assert!((output.prediction.confidence - 82.0).abs() < 1e-3);
    assert!((output.prediction.score - 0.82).abs() < 1e-6);
    assert_eq!(output.stats.items_processed, 1);
    Ok(())
}

#[test]
fn low_scoring_review_is_negative() -> Result<()> {
    let (pipeline, _) = pipeline(0.2, 236);

    let output = pipeline.run("great film")?;
    assert_eq!(output.prediction.sentiment, Sentiment::Negative);
    assert!((output.prediction.confidence - 80.0).abs() < 1e-3);
    Ok(())
}

#[test]
fn model_receives_one_fixed_length_row_per_text() -> Result<()> {
    let (pipeline, batches) = pipeline(0.9, 8);

    pipeline.run("great film")?;

    let batches = batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], vec![vec![12, 31, 0, 0, 0, 0, 0, 0]]);
    Ok(())
}

#[test]
fn unknown_words_reach_the_model_as_the_oov_sentinel() -> Result<()> {
    let (pipeline, batches) = pipeline(0.9, 6);

    pipeline.run("great unwatchable film")?;

    let batches = batches.lock().unwrap();
    assert_eq!(batches[0], vec![vec![12, 1, 31, 0, 0, 0]]);
    Ok(())
}

#[test]
fn empty_review_still_classifies() -> Result<()> {
    let (pipeline, batches) = pipeline(0.7, 4);

    let output = pipeline.run("")?;
    assert_eq!(output.prediction.sentiment, Sentiment::Positive);

    // "" normalizes to one empty token, which is out-of-vocabulary.
    let batches = batches.lock().unwrap();
    assert_eq!(batches[0], vec![vec![1, 0, 0, 0]]);
    Ok(())
}

#[test]
fn long_review_is_truncated_to_max_len() -> Result<()> {
    let (pipeline, batches) = pipeline(0.6, 5);

    let review = ["good"; 40].join(" ");
    pipeline.run(review.as_str())?;

    let batches = batches.lock().unwrap();
    assert_eq!(batches[0], vec![vec![5, 5, 5, 5, 5]]);
    Ok(())
}

#[test]
fn batch_inputs_share_one_forward_pass() -> Result<()> {
    let (pipeline, batches) = pipeline(0.75, 6);

    let reviews = &["good", "bad", "great film"];
    let output = pipeline.run(reviews)?;

    assert_eq!(output.results.len(), 3);
    assert_eq!(output.stats.items_processed, 3);
    for (result, expected) in output.results.iter().zip(reviews) {
        assert_eq!(result.text, *expected);
        assert!(result.prediction.is_ok());
    }

    let batches = batches.lock().unwrap();
    assert_eq!(batches.len(), 1, "batch should be scored in a single call");
    assert_eq!(batches[0].len(), 3);
    Ok(())
}

#[test]
fn out_of_range_score_is_rejected() {
    let (pipeline, _) = pipeline(1.5, 4);

    let err = pipeline.run("good").unwrap_err();
    assert!(matches!(err, PipelineError::Unexpected(_)));
}

#[test]
fn service_rejects_predict_before_load() {
    let service: SentimentService<FixedScoreModel> = SentimentService::new();
    assert_eq!(service.state(), ServiceState::Uninitialized);

    let err = service.predict("great film").unwrap_err();
    assert!(matches!(
        err,
        PipelineError::NotReady(ServiceState::Uninitialized)
    ));
}

#[test]
fn service_becomes_ready_after_a_successful_load() -> Result<()> {
    let service = SentimentService::new();
    service.load(|| {
        let (pipeline, _) = pipeline(0.82, 236);
        Ok(pipeline)
    });

    assert_eq!(service.state(), ServiceState::Ready);
    assert!(service.failure().is_none());

    let output = service.predict("great film")?;
    assert_eq!(output.prediction.sentiment, Sentiment::Positive);
    Ok(())
}

#[test]
fn failed_load_is_terminal_and_keeps_the_service_disabled() {
    let service: SentimentService<FixedScoreModel> = SentimentService::new();
    service.load(|| {
        Err(PipelineError::Artifact(
            "missing artifact 'word_index.json'".to_string(),
        ))
    });

    assert_eq!(service.state(), ServiceState::Failed);
    assert!(service
        .failure()
        .is_some_and(|message| message.contains("word_index.json")));

    let err = service.predict("great film").unwrap_err();
    assert!(matches!(err, PipelineError::NotReady(ServiceState::Failed)));
}
