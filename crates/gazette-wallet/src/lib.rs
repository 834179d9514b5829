// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minting client for the wallet relay.
//!
//! The relay holds the signing session; this client only submits an entry
//! function call with the content address as its single argument. Without
//! a session token and sender address every mint is skipped.

use std::time::Duration;

use async_trait::async_trait;
use gazette_config::GazetteConfig;
use gazette_core::error::GazetteError;
use gazette_core::traits::{PluginAdapter, TokenMinter};
use gazette_core::types::{AdapterType, HealthStatus, MintOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub function: String,
    pub arguments: Vec<String>,
    pub sender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,
}

/// Token and sender of a connected wallet.
#[derive(Debug, Clone)]
struct WalletSession {
    token: String,
    sender: String,
}

pub struct WalletMinter {
    client: reqwest::Client,
    relay_url: String,
    function: String,
    session: Option<WalletSession>,
}

impl WalletMinter {
    pub fn new(config: &GazetteConfig) -> Result<Self, GazetteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .build()
            .map_err(|e| GazetteError::Config(format!("failed to build HTTP client: {e}")))?;

        let session = match (&config.wallet.session_token, &config.wallet.sender_address) {
            (Some(token), Some(sender)) if !token.is_empty() && !sender.is_empty() => {
                Some(WalletSession {
                    token: token.clone(),
                    sender: sender.clone(),
                })
            }
            _ => None,
        };
        info!(
            relay = %config.wallet.relay_url,
            connected = session.is_some(),
            "wallet minter initialized"
        );

        Ok(Self {
            client,
            relay_url: config.wallet.relay_url.trim_end_matches('/').to_string(),
            function: config.wallet.mint_function.clone(),
            session,
        })
    }
}

fn mint_err(
    message: impl Into<String>,
    source: Option<gazette_core::error::BoxError>,
) -> GazetteError {
    GazetteError::MintFailed {
        message: message.into(),
        source,
    }
}

#[async_trait]
impl PluginAdapter for WalletMinter {
    fn name(&self) -> &str {
        "wallet-relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Wallet
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        if self.session.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("no wallet session connected".into()))
        }
    }
}

#[async_trait]
impl TokenMinter for WalletMinter {
    fn has_session(&self) -> bool {
        self.session.is_some()
    }

    async fn mint(&self, content_address: &str) -> Result<MintOutcome, GazetteError> {
        let Some(session) = &self.session else {
            debug!(content_address, "mint skipped, no wallet session");
            return Ok(MintOutcome::Skipped {
                reason: "no wallet session connected".into(),
            });
        };
        if content_address.trim().is_empty() {
            return Err(GazetteError::InvalidRequest(
                "content address must not be empty".into(),
            ));
        }

        let body = TransactionRequest {
            function: self.function.clone(),
            arguments: vec![content_address.to_string()],
            sender: session.sender.clone(),
        };
        let response = self
            .client
            .post(format!("{}/transactions", self.relay_url))
            .bearer_auth(&session.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| mint_err(format!("HTTP request failed: {e}"), Some(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(mint_err(format!("relay returned {status}: {text}"), None));
        }

        let tx: TransactionResponse = response.json().await.map_err(|e| {
            mint_err(format!("failed to parse relay response: {e}"), Some(Box::new(e)))
        })?;
        info!(content_address, tx_hash = %tx.hash, "mint submitted");
        Ok(MintOutcome::Submitted { tx_hash: tx.hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connected(server: &MockServer) -> WalletMinter {
        let mut config = GazetteConfig::default();
        config.wallet.relay_url = server.uri();
        config.wallet.session_token = Some("session-1".into());
        config.wallet.sender_address = Some("0xabc".into());
        WalletMinter::new(&config).unwrap()
    }

    #[tokio::test]
    async fn mint_without_session_is_skipped() {
        let minter = WalletMinter::new(&GazetteConfig::default()).unwrap();
        assert!(!minter.has_session());
        let outcome = minter.mint("QmDebate1").await.unwrap();
        assert!(matches!(outcome, MintOutcome::Skipped { .. }));
        assert!(matches!(
            minter.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
    }

    #[tokio::test]
    async fn mint_submits_entry_function_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(header("authorization", "Bearer session-1"))
            .and(body_json(serde_json::json!({
                "function": "0x1::gazette::mint_commemorative",
                "arguments": ["QmDebate1"],
                "sender": "0xabc"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"hash": "0xtx"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = connected(&server).mint("QmDebate1").await.unwrap();
        assert_eq!(
            outcome,
            MintOutcome::Submitted {
                tx_hash: "0xtx".into()
            }
        );
    }

    #[tokio::test]
    async fn relay_rejection_is_mint_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("sequence mismatch"))
            .expect(1)
            .mount(&server)
            .await;

        let err = connected(&server).mint("QmDebate1").await.unwrap_err();
        assert!(matches!(err, GazetteError::MintFailed { .. }));
        assert!(err.to_string().contains("400"));
    }
}
