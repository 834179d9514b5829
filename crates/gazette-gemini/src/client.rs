// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` and `streamGenerateContent`
//! endpoints.
//!
//! One request per call. Failures are returned to the caller as-is; nothing
//! is retried.

use std::time::Duration;

use gazette_core::error::BoxError;
use gazette_core::{GazetteError, TextStream};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::sse;
use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Which adapter operation a call serves; picks the error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Text,
    Speech,
}

impl CallKind {
    pub fn error(self, message: impl Into<String>, source: Option<BoxError>) -> GazetteError {
        let message = message.into();
        match self {
            CallKind::Text => GazetteError::GenerationFailed { message, source },
            CallKind::Speech => GazetteError::SynthesisFailed { message, source },
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Builds a client that authenticates with `x-goog-api-key`.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, GazetteError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                GazetteError::Config(format!("invalid Gemini API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GazetteError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        kind: CallKind,
    ) -> Result<GenerateContentResponse, GazetteError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let response = self.post(&url, request, kind).await?;

        let body = response.text().await.map_err(|e| {
            kind.error(format!("failed to read response body: {e}"), Some(Box::new(e)))
        })?;
        serde_json::from_str(&body).map_err(|e| {
            kind.error(format!("failed to parse API response: {e}"), Some(Box::new(e)))
        })
    }

    /// Opens a `streamGenerateContent` call and returns its text chunks.
    pub async fn stream_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<TextStream, GazetteError> {
        let url = format!("{}/models/{model}:streamGenerateContent?alt=sse", self.base_url);
        let response = self.post(&url, request, CallKind::Text).await?;
        Ok(sse::parse_text_stream(response))
    }

    /// Sends the request and turns a non-success status into an error.
    async fn post(
        &self,
        url: &str,
        request: &GenerateContentRequest,
        kind: CallKind,
    ) -> Result<reqwest::Response, GazetteError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| kind.error(format!("HTTP request failed: {e}"), Some(Box::new(e))))?;

        let status = response.status();
        debug!(status = %status, url, "Gemini response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({} {}): {}",
                    api_err.error.code, api_err.error.status, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(kind.error(message, None));
        }
        Ok(response)
    }
}
