//! Types for the Gemini API.
//!
//! These types match the Generative Language REST API (`v1beta`) formats
//! for `generateContent` and the long-running video operations surface.

use serde::{Deserialize, Serialize};

// =============================================================================
// generateContent
// =============================================================================

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The prompt contents.
    pub contents: Vec<Content>,
    /// Optional system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Optional generation configuration (modalities, speech settings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A plain text prompt with no extra configuration.
    #[must_use]
    pub fn text_prompt(prompt: &str, system_instruction: Option<&str>) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            system_instruction: system_instruction.map(Content::text),
            generation_config: None,
        }
    }
}

/// A content entry: an ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The parts making up this content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Content holding a single text part.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.to_string()),
                inline_data: None,
            }],
        }
    }
}

/// A single part: text or inline binary data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload (base64 with a MIME type).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Inline binary data within a part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload (e.g., "image/png", "audio/wav").
    pub mime_type: String,
    /// Base64-encoded payload.
    pub data: String,
}

/// Generation configuration for modality and speech control.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested response modalities (e.g., `["AUDIO"]`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    /// Speech synthesis settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

/// Speech synthesis configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Voice selection.
    pub voice_config: VoiceConfig,
}

/// Voice selection wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Prebuilt voice selection.
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// A prebuilt voice, referenced by name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice name (e.g., "Kore").
    pub voice_name: String,
}

/// Response from the `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates; the first is the one used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A single generation candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content.
    pub content: Option<Content>,
}

// =============================================================================
// Video (long-running operations)
// =============================================================================

/// Request body for the `predictLongRunning` video endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    /// Prompt instances; one per requested video.
    pub instances: Vec<VideoInstance>,
    /// Generation parameters.
    pub parameters: VideoParameters,
}

/// A single video prompt instance.
#[derive(Debug, Clone, Serialize)]
pub struct VideoInstance {
    /// The prompt text.
    pub prompt: String,
}

/// Video generation parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    /// Number of videos to generate.
    pub sample_count: u32,
    /// Output resolution (e.g., "720p").
    pub resolution: String,
    /// Aspect ratio (e.g., "16:9").
    pub aspect_ratio: String,
}

impl Default for VideoParameters {
    fn default() -> Self {
        Self {
            sample_count: 1,
            resolution: "720p".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }
}

/// A long-running video generation operation.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoOperation {
    /// Operation resource name, polled until completion.
    pub name: String,
    /// Completion flag. The result is only readable once this is true.
    #[serde(default)]
    pub done: bool,
    /// Operation result, present once done.
    pub response: Option<VideoOperationResponse>,
}

/// Result payload of a completed video operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperationResponse {
    /// The nested video generation response.
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Generated video samples.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// The generated samples; one per requested video.
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

/// A single generated video sample.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSample {
    /// The video reference.
    pub video: Option<VideoRef>,
}

/// Reference to a generated video file.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRef {
    /// Signed URI of the video; requires the API key appended to fetch.
    pub uri: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_prompt_serialization() {
        let request = GenerateContentRequest::text_prompt("Write a caption", Some("Be concise"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Write a caption");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Be concise"
        );
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_inline_data_uses_camel_case() {
        let part = Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "image/png".to_string(),
                data: "aGVsbG8=".to_string(),
            }),
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
    }

    #[test]
    fn test_video_operation_deserializes_pending() {
        let json = r#"{"name": "operations/abc123"}"#;
        let op: VideoOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.name, "operations/abc123");
        assert!(!op.done);
        assert!(op.response.is_none());
    }

    #[test]
    fn test_video_operation_deserializes_completed() {
        let json = r#"{
            "name": "operations/abc123",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [
                        {"video": {"uri": "https://example.com/video.mp4?sig=abc"}}
                    ]
                }
            }
        }"#;
        let op: VideoOperation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        let uri = op
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .and_then(|v| v.uri)
            .unwrap();
        assert_eq!(uri, "https://example.com/video.mp4?sig=abc");
    }

    #[test]
    fn test_video_parameters_default() {
        let params = VideoParameters::default();
        assert_eq!(params.sample_count, 1);
        assert_eq!(params.resolution, "720p");
        assert_eq!(params.aspect_ratio, "16:9");
    }
}
