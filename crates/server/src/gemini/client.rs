//! Gemini API client for content generation.
//!
//! Wraps the four generation operations used by the content studio. Every
//! call is independent and unretried; failures surface as [`GeminiError`]
//! and leave nothing behind. The video path is the only long-running
//! operation: submit, poll bounded, resolve to a signed URI.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, PrebuiltVoiceConfig,
    SpeechConfig, VideoInstance, VideoOperation, VideoParameters, VideoRequest, VoiceConfig,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Prebuilt voice used for text-to-speech generation.
const TTS_VOICE: &str = "Kore";

/// Gemini API client.
///
/// Provides text, image, audio, and video generation over the Generative
/// Language REST API.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_key: SecretString,
    text_model: String,
    image_model: String,
    tts_model: String,
    video_model: String,
    poll_interval: Duration,
    poll_max_attempts: u32,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini API configuration containing API key and model IDs
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_key: config.api_key.clone(),
                text_model: config.text_model.clone(),
                image_model: config.image_model.clone(),
                tts_model: config.tts_model.clone(),
                video_model: config.video_model.clone(),
                poll_interval: config.poll_interval,
                poll_max_attempts: config.poll_max_attempts,
            }),
        }
    }

    /// Generate plain text from a prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response carries
    /// no text part.
    #[instrument(skip(self, prompt, system_instruction), fields(model = %self.inner.text_model))]
    pub async fn generate_text(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::text_prompt(prompt, system_instruction);
        let response = self.generate_content(&self.inner.text_model, &request).await?;

        first_text(&response).ok_or(GeminiError::NoPayload("text"))
    }

    /// Generate an image from a prompt.
    ///
    /// Returns a `data:<mime>;base64,<payload>` URI, or `None` when the
    /// response contains no inline image part. The missing-image case is
    /// a resolved "no data" state, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request itself fails.
    #[instrument(skip(self, prompt), fields(model = %self.inner.image_model))]
    pub async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GeminiError> {
        let request = GenerateContentRequest::text_prompt(prompt, None);
        let response = self
            .generate_content(&self.inner.image_model, &request)
            .await?;

        Ok(inline_image_data_uri(&response))
    }

    /// Synthesize speech for a text.
    ///
    /// Returns the raw base64 audio payload; the caller is responsible for
    /// wrapping it in a playable data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no audio payload is
    /// present in the response.
    #[instrument(skip(self, text), fields(model = %self.inner.tts_model))]
    pub async fn generate_audio(&self, text: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![super::types::Content::text(text)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: TTS_VOICE.to_string(),
                        },
                    },
                }),
            }),
        };
        let response = self.generate_content(&self.inner.tts_model, &request).await?;

        inline_audio_base64(&response).ok_or(GeminiError::NoPayload("audio data"))
    }

    /// Generate a video from a prompt.
    ///
    /// Submits a long-running job and polls it on the configured interval
    /// until the completion flag is set, the poll bound is exhausted, or
    /// `cancel` fires. On completion, returns the signed video URI with the
    /// API key appended as a query parameter; the URI is never returned
    /// before the job reports done.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Timeout` if the job doesn't complete within
    /// the poll bound, `GeminiError::Cancelled` on cancellation, and
    /// `GeminiError::NoPayload` if a completed job carries no URI.
    #[instrument(skip(self, prompt, cancel), fields(model = %self.inner.video_model))]
    pub async fn generate_video(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, GeminiError> {
        let request = VideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
            }],
            parameters: VideoParameters::default(),
        };

        let url = format!(
            "{GEMINI_API_BASE}/models/{}:predictLongRunning",
            self.inner.video_model
        );
        let response = self.inner.client.post(url).json(&request).send().await?;
        let submitted: VideoOperation = self.handle_response(response).await?;

        let operation = poll_until_done(
            submitted,
            |name| self.get_operation(name),
            self.inner.poll_interval,
            self.inner.poll_max_attempts,
            cancel,
        )
        .await?;

        let uri = video_uri(&operation).ok_or(GeminiError::NoPayload("video uri"))?;
        Ok(with_key_param(&uri, self.inner.api_key.expose_secret()))
    }

    /// Fetch the current state of a long-running operation.
    async fn get_operation(&self, name: String) -> Result<VideoOperation, GeminiError> {
        let url = format!("{GEMINI_API_BASE}/{name}");
        let response = self.inner.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// POST a `generateContent` request for the given model.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{GEMINI_API_BASE}/models/{model}:generateContent");
        let response = self.inner.client.post(url).json(request).send().await?;
        self.handle_response(response).await
    }

    /// Handle a response, decoding either the payload or an API error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(handle_error_status(status, response).await)
        }
    }
}

/// Handle an error status code.
async fn handle_error_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> GeminiError {
    // Check for rate limiting
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return GeminiError::RateLimited(retry_after);
    }

    // Check for unauthorized
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return GeminiError::Unauthorized("Invalid API key".to_string());
    }

    // Try to parse API error response
    match response.text().await {
        Ok(body) => serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
            |_| GeminiError::Api {
                code: i32::from(status.as_u16()),
                status: status.to_string(),
                message: body,
            },
            |api_error| GeminiError::Api {
                code: api_error.error.code,
                status: api_error.error.status,
                message: api_error.error.message,
            },
        ),
        Err(e) => GeminiError::Http(e),
    }
}

/// Poll a long-running operation until its done flag is set.
///
/// Bounded by `max_attempts`; each wait races against the cancellation
/// token so a dismissed consumer stops the loop between polls.
async fn poll_until_done<F, Fut>(
    initial: VideoOperation,
    mut fetch: F,
    interval: Duration,
    max_attempts: u32,
    cancel: &CancellationToken,
) -> Result<VideoOperation, GeminiError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<VideoOperation, GeminiError>>,
{
    let mut operation = initial;
    let mut attempts: u32 = 0;

    while !operation.done {
        if attempts >= max_attempts {
            return Err(GeminiError::Timeout { attempts });
        }
        attempts += 1;

        tokio::select! {
            () = cancel.cancelled() => return Err(GeminiError::Cancelled),
            () = tokio::time::sleep(interval) => {}
        }

        operation = fetch(operation.name.clone()).await?;
    }

    Ok(operation)
}

/// Concatenated text parts of the first candidate, if any.
fn first_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.is_empty() { None } else { Some(text) }
}

/// First inline image part of the first candidate, formatted as a data URI.
fn inline_image_data_uri(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    content.parts.iter().find_map(|part| {
        part.inline_data
            .as_ref()
            .map(|inline| format!("data:{};base64,{}", inline.mime_type, inline.data))
    })
}

/// Raw base64 payload of the first inline audio part of the first candidate.
fn inline_audio_base64(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    content
        .parts
        .iter()
        .find_map(|part| part.inline_data.as_ref().map(|inline| inline.data.clone()))
}

/// Signed URI of the first generated video sample of a completed operation.
fn video_uri(operation: &VideoOperation) -> Option<String> {
    operation
        .response
        .as_ref()?
        .generate_video_response
        .as_ref()?
        .generated_samples
        .first()?
        .video
        .as_ref()?
        .uri
        .clone()
}

/// Append the API key as a query parameter to a signed media URI.
fn with_key_param(uri: &str, key: &str) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}key={key}")
}
