// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock pinning, portrait, wallet and news adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use gazette_core::traits::{NewsFeed, PinningService, PluginAdapter, PortraitGenerator, TokenMinter};
use gazette_core::types::{AdapterType, HealthStatus, MintOutcome, PinReceipt, PinRequest};
use gazette_core::GazetteError;

macro_rules! mock_adapter {
    ($ty:ty, $name:literal, $kind:expr) => {
        #[async_trait]
        impl PluginAdapter for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn version(&self) -> semver::Version {
                semver::Version::new(0, 1, 0)
            }

            fn adapter_type(&self) -> AdapterType {
                $kind
            }

            async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
                Ok(HealthStatus::Healthy)
            }
        }
    };
}

/// A pinning service that returns a fresh content address per upload.
///
/// Addresses are `QmMock1`, `QmMock2`, ... in call order.
#[derive(Default)]
pub struct MockPinner {
    counter: AtomicUsize,
    failing: AtomicBool,
    requests: Arc<Mutex<Vec<PinRequest>>>,
}

impl MockPinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail with `ArchiveFailed`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Uploads received so far, failed ones included.
    pub async fn requests(&self) -> Vec<PinRequest> {
        self.requests.lock().await.clone()
    }
}

mock_adapter!(MockPinner, "mock-pinner", AdapterType::Pinning);

#[async_trait]
impl PinningService for MockPinner {
    async fn pin(&self, request: PinRequest) -> Result<PinReceipt, GazetteError> {
        self.requests.lock().await.push(request);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GazetteError::ArchiveFailed {
                message: "pinning returned 500".to_string(),
                source: None,
            });
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let content_address = format!("QmMock{n}");
        Ok(PinReceipt {
            gateway_url: format!("https://ipfs.test/ipfs/{content_address}"),
            content_address,
            timestamp: None,
        })
    }
}

/// A portrait service that returns `https://img.test/<n>.png`, or fails.
#[derive(Default)]
pub struct MockPortrait {
    counter: AtomicUsize,
    failing: AtomicBool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockPortrait {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

mock_adapter!(MockPortrait, "mock-portrait", AdapterType::Portrait);

#[async_trait]
impl PortraitGenerator for MockPortrait {
    async fn render(&self, prompt: &str) -> Result<String, GazetteError> {
        self.prompts.lock().await.push(prompt.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(GazetteError::PortraitFailed {
                message: "Failed to generate image".to_string(),
                source: None,
            });
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://img.test/{n}.png"))
    }
}

/// A minter with or without a connected session.
pub struct MockMinter {
    session: bool,
    minted: Arc<Mutex<Vec<String>>>,
}

impl MockMinter {
    pub fn connected() -> Self {
        Self {
            session: true,
            minted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            session: false,
            minted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Content addresses submitted to the relay.
    pub async fn minted(&self) -> Vec<String> {
        self.minted.lock().await.clone()
    }
}

mock_adapter!(MockMinter, "mock-minter", AdapterType::Wallet);

#[async_trait]
impl TokenMinter for MockMinter {
    fn has_session(&self) -> bool {
        self.session
    }

    async fn mint(&self, content_address: &str) -> Result<MintOutcome, GazetteError> {
        if !self.session {
            return Ok(MintOutcome::Skipped {
                reason: "no wallet session".to_string(),
            });
        }
        let mut minted = self.minted.lock().await;
        minted.push(content_address.to_string());
        Ok(MintOutcome::Submitted {
            tx_hash: format!("0xmock{}", minted.len()),
        })
    }
}

/// A news feed echoing the query inside a fixed result set.
#[derive(Default)]
pub struct MockNews {
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockNews {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

mock_adapter!(MockNews, "mock-news", AdapterType::News);

#[async_trait]
impl NewsFeed for MockNews {
    async fn search(&self, query: &str) -> Result<serde_json::Value, GazetteError> {
        self.queries.lock().await.push(query.to_string());
        Ok(serde_json::json!({
            "search_parameters": { "q": query },
            "news_results": [
                { "title": "Summit ends without agreement", "source": { "name": "Gazette Wire" } }
            ]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::types::PinMetadata;

    fn upload() -> PinRequest {
        PinRequest {
            file_name: "debate.json".into(),
            content_type: "application/json".into(),
            bytes: b"{}".to_vec(),
            metadata: PinMetadata {
                name: "Debate: x".into(),
                keyvalues: Default::default(),
            },
        }
    }

    #[tokio::test]
    async fn pinner_hands_out_fresh_addresses() {
        let pinner = MockPinner::new();
        let first = pinner.pin(upload()).await.unwrap();
        let second = pinner.pin(upload()).await.unwrap();
        assert_eq!(first.content_address, "QmMock1");
        assert_ne!(first.content_address, second.content_address);
    }

    #[tokio::test]
    async fn disconnected_minter_skips() {
        let minter = MockMinter::disconnected();
        let outcome = minter.mint("QmMock1").await.unwrap();
        assert!(matches!(outcome, MintOutcome::Skipped { .. }));
        assert!(minter.minted().await.is_empty());
    }
}
