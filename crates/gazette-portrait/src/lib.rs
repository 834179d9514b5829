// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portrait adapter for a text-to-image REST service.
//!
//! Each render draws a random guidance scale (2..=4) and step count (4..=11)
//! so repeated personas do not get identical portraits.

use std::time::Duration;

use async_trait::async_trait;
use gazette_config::GazetteConfig;
use gazette_core::error::GazetteError;
use gazette_core::traits::{PluginAdapter, PortraitGenerator};
use gazette_core::types::{AdapterType, HealthStatus};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const API_KEY_ENV: &str = "PORTRAIT_API_KEY";

/// Message returned whenever no image URL comes back.
pub const RENDER_FAILED: &str = "Failed to generate image";

#[derive(Debug, Clone, Serialize)]
pub struct TextToImageRequest {
    pub cfg_scale: u32,
    pub height: String,
    pub width: String,
    pub steps: u32,
    pub engine: String,
    pub text_prompts: Vec<TextPrompt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextPrompt {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextToImageResponse {
    #[serde(default)]
    pub signed_urls: Vec<String>,
}

pub struct PortraitClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine: String,
    size: u32,
}

impl PortraitClient {
    pub fn new(config: &GazetteConfig) -> Result<Self, GazetteError> {
        let api_key = config
            .portrait
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                GazetteError::Config(format!(
                    "portrait API key not found. Set portrait.api_key in config or {API_KEY_ENV} environment variable."
                ))
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .build()
            .map_err(|e| GazetteError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.portrait.endpoint.clone(),
            api_key,
            engine: config.portrait.engine.clone(),
            size: config.portrait.size,
        })
    }

    fn build_request(&self, prompt: &str) -> TextToImageRequest {
        let mut rng = rand::thread_rng();
        TextToImageRequest {
            cfg_scale: rng.gen_range(2..=4),
            height: self.size.to_string(),
            width: self.size.to_string(),
            steps: rng.gen_range(4..=11),
            engine: self.engine.clone(),
            text_prompts: vec![TextPrompt {
                text: prompt.to_string(),
            }],
        }
    }
}

fn portrait_err(source: Option<gazette_core::error::BoxError>) -> GazetteError {
    GazetteError::PortraitFailed {
        message: RENDER_FAILED.to_string(),
        source,
    }
}

#[async_trait]
impl PluginAdapter for PortraitClient {
    fn name(&self) -> &str {
        "portrait"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Portrait
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PortraitGenerator for PortraitClient {
    async fn render(&self, prompt: &str) -> Result<String, GazetteError> {
        let body = self.build_request(prompt);
        debug!(
            engine = %body.engine,
            cfg_scale = body.cfg_scale,
            steps = body.steps,
            "requesting portrait"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| portrait_err(Some(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "portrait service rejected request");
            return Err(portrait_err(None));
        }

        let parsed: TextToImageResponse = response
            .json()
            .await
            .map_err(|e| portrait_err(Some(Box::new(e))))?;
        parsed
            .signed_urls
            .into_iter()
            .next()
            .ok_or_else(|| portrait_err(None))
    }
}
