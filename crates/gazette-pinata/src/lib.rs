// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pinata adapter: uploads files with `pinFileToIPFS` and returns the
//! content address plus a gateway URL.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use gazette_config::GazetteConfig;
use gazette_core::error::GazetteError;
use gazette_core::traits::{PinningService, PluginAdapter};
use gazette_core::types::{AdapterType, HealthStatus, PinReceipt, PinRequest};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::types::{PinFileResponse, PinataOptions};

const API_KEY_ENV: &str = "PINATA_API_KEY";
const SECRET_KEY_ENV: &str = "PINATA_SECRET_API_KEY";

pub struct PinataPinner {
    client: reqwest::Client,
    base_url: String,
    gateway_url: String,
}

impl PinataPinner {
    /// Keys come from `[pinning]`, falling back to `PINATA_API_KEY` and
    /// `PINATA_SECRET_API_KEY`.
    pub fn new(config: &GazetteConfig) -> Result<Self, GazetteError> {
        let api_key = resolve_key(&config.pinning.api_key, API_KEY_ENV, "pinning.api_key")?;
        let secret = resolve_key(
            &config.pinning.secret_api_key,
            SECRET_KEY_ENV,
            "pinning.secret_api_key",
        )?;

        let mut headers = HeaderMap::new();
        headers.insert("pinata_api_key", header_value(&api_key)?);
        headers.insert("pinata_secret_api_key", header_value(&secret)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .build()
            .map_err(|e| GazetteError::Config(format!("failed to build HTTP client: {e}")))?;

        info!(base_url = %config.pinning.base_url, "Pinata pinner initialized");
        Ok(Self {
            client,
            base_url: config.pinning.base_url.trim_end_matches('/').to_string(),
            gateway_url: config.pinning.gateway_url.trim_end_matches('/').to_string(),
        })
    }

    /// Public gateway URL for a content address.
    pub fn gateway_url_for(&self, content_address: &str) -> String {
        format!("{}/{content_address}", self.gateway_url)
    }

    fn build_form(request: PinRequest) -> Result<Form, GazetteError> {
        let metadata =
            serde_json::to_string(&request.metadata).map_err(|e| archive_err(e.to_string()))?;
        let options = serde_json::to_string(&PinataOptions::default())
            .map_err(|e| archive_err(e.to_string()))?;
        let file = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.content_type)
            .map_err(|e| archive_err(format!("invalid content type: {e}")))?;

        Ok(Form::new()
            .part("file", file)
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options))
    }
}

fn archive_err(message: impl Into<String>) -> GazetteError {
    GazetteError::ArchiveFailed {
        message: message.into(),
        source: None,
    }
}

fn header_value(value: &str) -> Result<HeaderValue, GazetteError> {
    HeaderValue::from_str(value)
        .map_err(|e| GazetteError::Config(format!("invalid Pinata key header value: {e}")))
}

fn resolve_key(
    config_key: &Option<String>,
    env_var: &str,
    config_name: &str,
) -> Result<String, GazetteError> {
    if let Some(key) = config_key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    std::env::var(env_var)
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            GazetteError::Config(format!(
                "Pinata credentials not found. Set {config_name} in config or {env_var} environment variable."
            ))
        })
}

#[async_trait]
impl PluginAdapter for PinataPinner {
    fn name(&self) -> &str {
        "pinata"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Pinning
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PinningService for PinataPinner {
    async fn pin(&self, request: PinRequest) -> Result<PinReceipt, GazetteError> {
        let file_name = request.file_name.clone();
        let size = request.bytes.len();
        let form = Self::build_form(request)?;
        let url = format!("{}/pinning/pinFileToIPFS", self.base_url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GazetteError::ArchiveFailed {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, file = %file_name, body = %body, "Pinata upload rejected");
            return Err(archive_err(format!("failed to upload to Pinata: {status}")));
        }

        let pinned: PinFileResponse =
            response
                .json()
                .await
                .map_err(|e| GazetteError::ArchiveFailed {
                    message: format!("failed to parse Pinata response: {e}"),
                    source: Some(Box::new(e)),
                })?;

        debug!(
            file = %file_name,
            bytes = size,
            pin_size = pinned.pin_size,
            cid = %pinned.ipfs_hash,
            "file pinned"
        );
        Ok(PinReceipt {
            gateway_url: self.gateway_url_for(&pinned.ipfs_hash),
            content_address: pinned.ipfs_hash,
            timestamp: pinned.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use gazette_core::types::PinMetadata;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pinner(server: &MockServer) -> PinataPinner {
        let mut config = GazetteConfig::default();
        config.pinning.api_key = Some("pk".into());
        config.pinning.secret_api_key = Some("sk".into());
        config.pinning.base_url = server.uri();
        config.pinning.gateway_url = "https://gateway.example/ipfs/".into();
        PinataPinner::new(&config).unwrap()
    }

    fn request() -> PinRequest {
        let mut keyvalues = BTreeMap::new();
        keyvalues.insert("type".to_string(), "debate-transcript".to_string());
        PinRequest {
            file_name: "debate-Gandhi-vs-Churchill-1.json".into(),
            content_type: "application/json".into(),
            bytes: br#"{"format_version":"1.0"}"#.to_vec(),
            metadata: PinMetadata {
                name: "Debate: Should education be free?".into(),
                keyvalues,
            },
        }
    }

    #[tokio::test]
    async fn pin_posts_multipart_with_keys() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .and(header("pinata_api_key", "pk"))
            .and(header("pinata_secret_api_key", "sk"))
            .and(body_string_contains("pinataMetadata"))
            .and(body_string_contains("debate-transcript"))
            .and(body_string_contains(r#"{"cidVersion":0}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "IpfsHash": "QmDebate1",
                "PinSize": 24,
                "Timestamp": "2026-10-17T10:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = pinner(&server).pin(request()).await.unwrap();
        assert_eq!(receipt.content_address, "QmDebate1");
        assert_eq!(receipt.gateway_url, "https://gateway.example/ipfs/QmDebate1");
        assert_eq!(receipt.timestamp.as_deref(), Some("2026-10-17T10:00:00Z"));
    }

    #[tokio::test]
    async fn rejected_upload_is_archive_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid keys"))
            .expect(1)
            .mount(&server)
            .await;

        let err = pinner(&server).pin(request()).await.unwrap_err();
        assert!(matches!(err, GazetteError::ArchiveFailed { .. }));
        assert!(err.to_string().contains("401"), "got: {err}");
    }

    #[test]
    fn missing_credentials_are_config_errors() {
        let mut config = GazetteConfig::default();
        config.pinning.api_key = Some("pk".into());
        // Holds unless PINATA_SECRET_API_KEY is exported in the test env.
        if std::env::var(SECRET_KEY_ENV).is_err() {
            assert!(matches!(
                PinataPinner::new(&config),
                Err(GazetteError::Config(_))
            ));
        }
    }
}
