// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini adapter for the Gazette debate service.
//!
//! [`GeminiProvider`] implements [`TextGenerator`] (debate turns,
//! conclusions, consultations, character cards) and [`SpeechSynthesizer`]
//! (multi-speaker podcast audio) on top of `generateContent`. Consultation
//! replies stream through `streamGenerateContent`.

pub mod client;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use gazette_config::GazetteConfig;
use gazette_core::error::GazetteError;
use gazette_core::traits::{PluginAdapter, SpeechSynthesizer, TextGenerator, TextStream};
use gazette_core::types::{
    AdapterType, ChatRole, GenerationRequest, HealthStatus, SpeechRequest, StructuredRequest,
};
use tracing::{debug, info};

use crate::client::{CallKind, GeminiClient};
use crate::types::{
    Content, GenerateContentRequest, GenerationConfig, MultiSpeakerVoiceConfig,
    PrebuiltVoiceConfig, SpeakerVoiceConfig, SpeechConfig, VoiceConfig,
};

/// Environment variable consulted when `gemini.api_key` is unset.
pub const API_KEY_ENV: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

/// Gemini-backed text and speech adapter.
///
/// API key resolution order: config -> `GOOGLE_GENERATIVE_AI_API_KEY` -> error.
pub struct GeminiProvider {
    client: GeminiClient,
    text_model: String,
    tts_model: String,
}

impl GeminiProvider {
    pub fn new(config: &GazetteConfig) -> Result<Self, GazetteError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(
            &api_key,
            &config.gemini.base_url,
            Duration::from_secs(config.server.request_timeout_secs),
        )?;

        info!(
            text_model = %config.gemini.text_model,
            tts_model = %config.gemini.tts_model,
            "Gemini provider initialized"
        );

        Ok(Self {
            client,
            text_model: config.gemini.text_model.clone(),
            tts_model: config.gemini.tts_model.clone(),
        })
    }

    #[cfg(test)]
    fn with_client(client: GeminiClient) -> Self {
        Self {
            client,
            text_model: "gemini-2.0-flash".into(),
            tts_model: "gemini-2.5-flash-preview-tts".into(),
        }
    }

    /// Converts a [`GenerationRequest`] into a `generateContent` body.
    fn to_content_request(request: &GenerationRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request
            .history
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                };
                Content::text(Some(role), m.content.clone())
            })
            .collect();
        if !request.input_text.is_empty() {
            contents.push(Content::text(Some("user"), request.input_text.clone()));
        }

        let system_instruction = if request.steering_instruction.is_empty() {
            None
        } else {
            Some(Content::text(None, request.steering_instruction.clone()))
        };

        GenerateContentRequest {
            system_instruction,
            contents,
            generation_config: Some(GenerationConfig {
                temperature: Some(request.sampling.temperature),
                top_k: Some(request.sampling.top_k),
                max_output_tokens: Some(request.sampling.max_output_tokens),
                ..Default::default()
            }),
        }
    }

    fn to_speech_request(request: &SpeechRequest) -> GenerateContentRequest {
        let speaker_voice_configs = request
            .voices
            .iter()
            .map(|v| SpeakerVoiceConfig {
                speaker: v.speaker.clone(),
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: v.voice.clone(),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::text(None, request.script.clone())],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    multi_speaker_voice_config: MultiSpeakerVoiceConfig {
                        speaker_voice_configs,
                    },
                }),
                ..Default::default()
            }),
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TextGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        // No quota is spent on health checks; a built client is healthy.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GazetteError> {
        let model = request.model.as_deref().unwrap_or(&self.text_model);
        let body = Self::to_content_request(&request);
        let response = self
            .client
            .generate_content(model, &body, CallKind::Text)
            .await?;

        let text = response
            .text()
            .ok_or_else(|| CallKind::Text.error("model returned no text", None))?;
        debug!(model, chars = text.len(), "text generated");
        Ok(text.trim().to_string())
    }

    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, GazetteError> {
        let model = request.model.as_deref().unwrap_or(&self.text_model);
        let body = Self::to_content_request(&request);
        debug!(model, "opening text stream");
        self.client.stream_generate_content(model, &body).await
    }

    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, GazetteError> {
        let body = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::text(Some("user"), request.prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(request.schema),
                ..Default::default()
            }),
        };
        let response = self
            .client
            .generate_content(&self.text_model, &body, CallKind::Text)
            .await?;

        let text = response
            .text()
            .ok_or_else(|| CallKind::Text.error("model returned no JSON", None))?;
        serde_json::from_str(&text).map_err(|e| {
            CallKind::Text.error(format!("model returned invalid JSON: {e}"), Some(Box::new(e)))
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiProvider {
    async fn synthesize(&self, request: SpeechRequest) -> Result<Vec<u8>, GazetteError> {
        let body = Self::to_speech_request(&request);
        let response = self
            .client
            .generate_content(&self.tts_model, &body, CallKind::Speech)
            .await?;

        let encoded = response
            .inline_audio()
            .ok_or_else(|| CallKind::Speech.error("no audio data in TTS response", None))?;
        let pcm = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| {
                CallKind::Speech.error(
                    format!("audio payload is not base64: {e}"),
                    Some(Box::new(e)),
                )
            })?;
        if pcm.is_empty() {
            return Err(CallKind::Speech.error("TTS returned empty audio", None));
        }
        debug!(bytes = pcm.len(), "speech synthesized");
        Ok(pcm)
    }
}

/// Resolves the API key from config, then the environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, GazetteError> {
    if let Some(key) = config_key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            GazetteError::Config(format!(
                "Gemini API key not found. Set gemini.api_key in config or {API_KEY_ENV} environment variable."
            ))
        })
}
