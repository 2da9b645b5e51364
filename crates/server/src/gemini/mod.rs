//! Gemini API integration for AI content generation.
//!
//! Four independent generation operations back the content studio:
//!
//! - text (`generateContent` with an optional system instruction)
//! - image (`generateContent`, inline image part returned as a data URI)
//! - audio (`generateContent` with the AUDIO response modality, raw base64)
//! - video (`predictLongRunning` + bounded operation polling)
//!
//! Each call is a thin request/response wrapper: no retries, no request
//! coalescing, no caching of identical prompts. The only loop is the video
//! operation poll, which is bounded by configuration and cancellable.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
