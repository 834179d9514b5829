// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text-generation and speech adapters for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use gazette_core::traits::{PluginAdapter, SpeechSynthesizer, TextGenerator, TextStream};
use gazette_core::types::{
    AdapterType, GenerationRequest, HealthStatus, SpeechRequest, StructuredRequest,
};
use gazette_core::GazetteError;

/// A scripted reply: text, or a failure with the given message.
type Scripted = Result<String, String>;

/// A mock text generator that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" text is returned. Every request is recorded.
/// `generate_stream` yields the same reply one word at a time.
pub struct MockTextGenerator {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    structured: Arc<Mutex<VecDeque<serde_json::Value>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    structured_requests: Arc<Mutex<Vec<StructuredRequest>>>,
}

impl MockTextGenerator {
    /// Create a new mock generator with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            structured: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            structured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock generator pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            ..Self::new()
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure; the call that pops it returns `GenerationFailed`.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.replies.lock().await.push_back(Err(message.into()));
    }

    /// Add a value for the next `generate_structured` call.
    pub async fn add_structured(&self, value: serde_json::Value) {
        self.structured.lock().await.push_back(value);
    }

    /// Every `generate` request received so far, in order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn structured_requests(&self) -> Vec<StructuredRequest> {
        self.structured_requests.lock().await.clone()
    }

    async fn next_reply(&self) -> Scripted {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTextGenerator {
    fn name(&self) -> &str {
        "mock-text"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TextGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GazetteError> {
        self.requests.lock().await.push(request);
        self.next_reply()
            .await
            .map_err(|message| GazetteError::GenerationFailed {
                message,
                source: None,
            })
    }

    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, GazetteError> {
        let text = self.generate(request).await?;
        let chunks: Vec<Result<String, GazetteError>> = text
            .split_inclusive(' ')
            .map(|word| Ok(word.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, GazetteError> {
        self.structured_requests.lock().await.push(request);
        self.structured
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| GazetteError::GenerationFailed {
                message: "no structured response queued".to_string(),
                source: None,
            })
    }
}

/// A mock speech service returning fixed PCM, or failing every call.
pub struct MockSpeech {
    pcm: Vec<u8>,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl MockSpeech {
    /// Returns 0.1 s of 24 kHz mono silence.
    pub fn new() -> Self {
        Self::with_pcm(vec![0u8; 4800])
    }

    pub fn with_pcm(pcm: Vec<u8>) -> Self {
        Self {
            pcm,
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            pcm: Vec::new(),
            failure: Some(message.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockSpeech {
    fn name(&self) -> &str {
        "mock-speech"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Speech
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<Vec<u8>, GazetteError> {
        self.requests.lock().await.push(request);
        match &self.failure {
            Some(message) => Err(GazetteError::SynthesisFailed {
                message: message.clone(),
                source: None,
            }),
            None => Ok(self.pcm.clone()),
        }
    }
}
