//! AWS-backed collaborators: S3 for storage, Polly for synthesis.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_polly::types::{OutputFormat, VoiceId};
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use crate::pipeline::{ObjectStore, SpeechSynthesizer};

/// [`ObjectStore`] over an S3 client.
#[derive(Clone, Debug)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context("GetObject request failed")?;

        let data = object
            .body
            .collect()
            .await
            .context("failed to read object body")?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        debug!(bucket, key, bytes = body.len(), "PutObject");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("audio/mpeg")
            .body(ByteStream::from(body))
            .send()
            .await
            .context("PutObject request failed")?;
        Ok(())
    }
}

/// [`SpeechSynthesizer`] over a Polly client, MP3 output.
#[derive(Clone, Debug)]
pub struct PollySynthesizer {
    client: aws_sdk_polly::Client,
}

impl PollySynthesizer {
    pub fn new(client: aws_sdk_polly::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Option<Vec<u8>>> {
        let response = self
            .client
            .synthesize_speech()
            .text(text)
            .output_format(OutputFormat::Mp3)
            .voice_id(VoiceId::from(voice))
            .send()
            .await
            .context("SynthesizeSpeech request failed")?;

        let audio = response
            .audio_stream
            .collect()
            .await
            .context("failed to read audio stream")?
            .into_bytes();

        // An empty stream counts as "no audio stream".
        Ok((!audio.is_empty()).then(|| audio.to_vec()))
    }

    fn display_name(&self) -> &str {
        "Amazon Polly"
    }
}
