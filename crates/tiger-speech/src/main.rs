//! Lambda entry point for the text-to-speech function.
//!
//! Wires the S3 and Polly clients into a [`SpeechPipeline`] and hands each
//! storage notification to it. Errors go straight back to the Lambda
//! runtime, which reports the invocation as failed.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::info;

use tiger_core::config::{load_config, load_dotenv};
use tiger_speech::aws::{PollySynthesizer, S3Store};
use tiger_speech::{SpeechPipeline, StorageEvent, SynthesisOutcome};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();
    load_dotenv();

    let config = load_config(None);
    let aws = aws_config::load_from_env().await;

    let pipeline = SpeechPipeline::new(
        Arc::new(S3Store::new(aws_sdk_s3::Client::new(&aws))),
        Arc::new(PollySynthesizer::new(aws_sdk_polly::Client::new(&aws))),
        &config.speech,
    );
    info!(voice = %config.speech.voice, "speech function ready");

    let pipeline = &pipeline;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<StorageEvent>| async move {
        let outcome: SynthesisOutcome = pipeline.handle(&event.payload).await?;
        Ok::<_, Error>(outcome)
    }))
    .await
}

/// Initialize tracing for CloudWatch: no colours, no timestamps.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .compact()
        .init();
}
