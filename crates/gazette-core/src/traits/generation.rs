// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text generation adapter (debate turns, conclusions, consultations).

use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::{self, Stream};

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerationRequest, StructuredRequest};

/// Incremental text of one generated reply, in order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, GazetteError>> + Send>>;

/// Adapter for a hosted large-language-model API.
#[async_trait]
pub trait TextGenerator: PluginAdapter {
    /// Generates one utterance. Any non-success response is
    /// [`GazetteError::GenerationFailed`].
    async fn generate(&self, request: GenerationRequest) -> Result<String, GazetteError>;

    /// Generates one utterance as a stream of text chunks.
    ///
    /// Errors before the first chunk are returned directly; later failures
    /// arrive as an `Err` item and end the stream. Adapters without a
    /// streaming endpoint yield the whole reply as a single chunk.
    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, GazetteError> {
        let text = self.generate(request).await?;
        Ok(Box::pin(stream::once(async move { Ok(text) })))
    }

    /// Generates a JSON value constrained by `request.schema`.
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, GazetteError>;
}
