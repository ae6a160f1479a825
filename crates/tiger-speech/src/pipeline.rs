//! Read → synthesize → write.
//!
//! The storage and synthesis services are traits so the flow can run
//! against in-memory fakes. Errors from any step propagate unchanged; there
//! is no retry and nothing is cleaned up after a partial failure.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use tiger_core::config::SpeechConfig;

use crate::event::StorageEvent;

// ─────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────

/// Object storage (bucket + key addressing).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read a whole object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Create or replace an object.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Text-to-speech with MP3 output.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with `voice`.
    ///
    /// Returns `None` when the service answered without an audio stream.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Option<Vec<u8>>>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

// ─────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────

/// What one invocation did.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SynthesisOutcome {
    pub bucket: String,
    pub source_key: String,
    /// Key the audio was written to; `None` if there was no audio to write.
    pub audio_key: Option<String>,
}

/// Destination key for the audio of a text object.
///
/// `text/hello.txt` → `audio/hello.mp3`. Every `text/` is removed and every
/// `.txt` becomes `.mp3`.
pub fn audio_key_for(text_key: &str) -> String {
    let stripped = text_key.replace("text/", "");
    format!("audio/{}", stripped.replace(".txt", ".mp3"))
}

pub struct SpeechPipeline {
    store: Arc<dyn ObjectStore>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voice: String,
}

impl SpeechPipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        config: &SpeechConfig,
    ) -> Self {
        Self {
            store,
            synthesizer,
            voice: config.voice.clone(),
        }
    }

    /// Handle one storage notification (first record only).
    pub async fn handle(&self, event: &StorageEvent) -> Result<SynthesisOutcome> {
        let (bucket, key) = event
            .first_object()
            .ok_or_else(|| anyhow!("storage event has no records"))?;
        self.synthesize_object(bucket, key).await
    }

    /// Convert one stored text object to speech.
    pub async fn synthesize_object(&self, bucket: &str, key: &str) -> Result<SynthesisOutcome> {
        info!(bucket, key, "synthesizing stored text");

        let bytes = self
            .store
            .get_object(bucket, key)
            .await
            .with_context(|| format!("failed to read s3://{bucket}/{key}"))?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("s3://{bucket}/{key} is not UTF-8 text"))?;

        debug!(
            chars = text.chars().count(),
            voice = %self.voice,
            synthesizer = self.synthesizer.display_name(),
            "requesting speech synthesis"
        );

        let audio = self
            .synthesizer
            .synthesize(&text, &self.voice)
            .await
            .context("speech synthesis failed")?;

        let mut outcome = SynthesisOutcome {
            bucket: bucket.to_string(),
            source_key: key.to_string(),
            audio_key: None,
        };

        match audio {
            Some(audio) => {
                let audio_key = audio_key_for(key);
                debug!(bytes = audio.len(), audio_key = %audio_key, "writing audio");
                self.store
                    .put_object(bucket, &audio_key, audio)
                    .await
                    .with_context(|| format!("failed to write s3://{bucket}/{audio_key}"))?;
                info!(bucket, audio_key = %audio_key, "audio written");
                outcome.audio_key = Some(audio_key);
            }
            None => warn!(bucket, key, "synthesis returned no audio stream, nothing written"),
        }

        Ok(outcome)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
