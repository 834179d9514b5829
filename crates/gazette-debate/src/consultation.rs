// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-on-one questions to a single persona.

use std::sync::Arc;

use gazette_core::traits::{PersonaRepository, TextGenerator, TextStream};
use gazette_core::types::{ChatMessage, ChatRole, GenerationRequest, SamplingParams};
use gazette_core::GazetteError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::orchestrator::PersonaRef;

/// Sampling used when the caller does not override it.
pub const DEFAULT_CONSULT_SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.7,
    top_k: 40,
    max_output_tokens: 1024,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultRequest {
    #[serde(alias = "leader")]
    pub persona: PersonaRef,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default, alias = "top_k")]
    pub top_k: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, alias = "wallet_address")]
    pub wallet_address: Option<String>,
    #[serde(default, alias = "wallet_balance")]
    pub wallet_balance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultReply {
    pub persona_id: String,
    pub content: String,
}

/// A reply being generated; `chunks` concatenate to the full text.
pub struct ConsultStream {
    pub persona_id: String,
    pub chunks: TextStream,
}

#[derive(Clone)]
pub struct Consultant {
    text: Arc<dyn TextGenerator>,
    store: Arc<dyn PersonaRepository>,
}

impl Consultant {
    pub fn new(text: Arc<dyn TextGenerator>, store: Arc<dyn PersonaRepository>) -> Self {
        Self { text, store }
    }

    /// The last message must come from the user; earlier ones are history.
    pub async fn consult(&self, request: ConsultRequest) -> Result<ConsultReply, GazetteError> {
        let (persona_id, generation) = self.prepare(request).await?;
        let content = self.text.generate(generation).await?;
        Ok(ConsultReply {
            persona_id,
            content,
        })
    }

    /// Like [`consult`](Self::consult), but the reply arrives as text chunks.
    ///
    /// Validation and persona lookup happen before the stream is returned,
    /// so a bad request never opens one.
    pub async fn consult_stream(
        &self,
        request: ConsultRequest,
    ) -> Result<ConsultStream, GazetteError> {
        let (persona_id, generation) = self.prepare(request).await?;
        let chunks = self.text.generate_stream(generation).await?;
        Ok(ConsultStream { persona_id, chunks })
    }

    async fn prepare(
        &self,
        request: ConsultRequest,
    ) -> Result<(String, GenerationRequest), GazetteError> {
        let mut messages = request.messages;
        let question = match messages.pop() {
            Some(ChatMessage {
                role: ChatRole::User,
                content,
            }) if !content.trim().is_empty() => content,
            _ => {
                return Err(GazetteError::InvalidRequest(
                    "the last message must be a non-empty user message".into(),
                ));
            }
        };

        let temperature = request
            .temperature
            .unwrap_or(DEFAULT_CONSULT_SAMPLING.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(GazetteError::InvalidRequest(format!(
                "temperature must be within 0..=2, got {temperature}"
            )));
        }

        let persona = request.persona.resolve(self.store.as_ref()).await?;
        let mut generation = GenerationRequest::new(
            crate::prompts::consultation_instruction(
                &persona.prompt_text,
                request.wallet_address.as_deref(),
                request.wallet_balance.as_deref(),
            ),
            question,
            SamplingParams {
                temperature,
                top_k: request.top_k.unwrap_or(DEFAULT_CONSULT_SAMPLING.top_k),
                max_output_tokens: DEFAULT_CONSULT_SAMPLING.max_output_tokens,
            },
        );
        generation.history = messages;
        generation.model = request.model;

        debug!(persona = %persona.id, history = generation.history.len(), "consulting persona");
        Ok((persona.id, generation))
    }
}
