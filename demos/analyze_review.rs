use std::io::Read;

use candle_sentiment::error::Result;
use candle_sentiment::sentiment::{SentimentPipelineBuilder, SentimentService};

// Usage: analyze_review [artifact-dir] [review text...]
//
// With no review argument the text is read from stdin, so piping works:
//   echo "a beautifully shot, moving film" | analyze_review model
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let artifact_dir = args.next().unwrap_or_else(|| "model".to_string());

    let rest: Vec<String> = args.collect();
    let review = if rest.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        rest.join(" ")
    };
    let review = review.trim();

    println!("Loading artifacts from '{artifact_dir}'...");

    let service = SentimentService::new();
    service.load(|| SentimentPipelineBuilder::local_dir(&artifact_dir).build());

    if let Some(reason) = service.failure() {
        eprintln!("Could not load the model artifacts: {reason}");
        std::process::exit(1);
    }

    let output = service.predict(review)?;

    println!("\n=== Sentiment Analysis Result ===");
    println!("Review: \"{review}\"");
    println!(
        "Sentiment: {} ({:.2}%)",
        output.prediction.sentiment, output.prediction.confidence
    );
    println!(
        "Completed in {:.2}ms",
        output.stats.total_time.as_secs_f64() * 1000.0
    );

    Ok(())
}
