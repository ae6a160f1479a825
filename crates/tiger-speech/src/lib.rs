//! Text-to-speech function for my-ai-tiger.
//!
//! Triggered by an object-storage "object created" notification: reads the
//! text object, synthesizes it to MP3 and writes the audio back under
//! `audio/` in the same bucket.
//!
//! - [`event`] — the notification payload
//! - [`pipeline`] — collaborator traits and the read → synthesize → write flow
//! - [`aws`] — S3 and Polly implementations of the collaborators

pub mod aws;
pub mod event;
pub mod pipeline;

pub use event::StorageEvent;
pub use pipeline::{audio_key_for, ObjectStore, SpeechPipeline, SpeechSynthesizer, SynthesisOutcome};
