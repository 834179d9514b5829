// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end gateway testing.
//!
//! `TestHarness` assembles the full gateway state over mock adapters, a
//! temp SQLite persona store and a temp public directory. Requests are
//! driven through the router in-process with `tower::ServiceExt::oneshot`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gazette_config::model::StorageConfig;
use gazette_config::GazetteConfig;
use gazette_core::types::Persona;
use gazette_core::{GazetteError, PersonaRepository, PinningService, PluginAdapter};
use gazette_debate::{
    AudioSynthesizer, Consultant, DebateOrchestrator, DebatePolicy, PersonaGenerator,
    PodcastSettings, Publisher, TranscriptArchiver,
};
use gazette_gateway::{AuthConfig, GatewayState, HealthState, build_router};
use gazette_storage::SqlitePersonaStore;

use crate::mock_generation::{MockSpeech, MockTextGenerator};
use crate::mock_services::{MockMinter, MockNews, MockPinner, MockPortrait};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    personas: Vec<Persona>,
    bearer_token: Option<String>,
    speech: Option<MockSpeech>,
    wallet_session: bool,
    policy: DebatePolicy,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            personas: Vec::new(),
            bearer_token: None,
            speech: None,
            wallet_session: false,
            policy: DebatePolicy::default().without_delay(),
        }
    }

    /// Set mock text-generation replies, consumed in order.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Seed the persona store.
    pub fn with_personas(mut self, personas: Vec<Persona>) -> Self {
        self.personas = personas;
        self
    }

    /// Require this bearer token on `/api` routes.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Make every speech synthesis call fail.
    pub fn with_failing_speech(mut self, message: impl Into<String>) -> Self {
        self.speech = Some(MockSpeech::failing(message));
        self
    }

    pub fn with_wallet_session(mut self) -> Self {
        self.wallet_session = true;
        self
    }

    /// Override the debate policy. The default has no turn delay.
    pub fn with_policy(mut self, policy: DebatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, GazetteError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| GazetteError::Storage { source: e.into() })?;
        let public_dir = temp_dir.path().join("public");

        let mut config = GazetteConfig::default();
        config.server.public_dir = public_dir.to_string_lossy().into_owned();
        config.server.bearer_token = self.bearer_token.clone();
        config.storage = StorageConfig {
            database_path: temp_dir
                .path()
                .join("personas.db")
                .to_string_lossy()
                .into_owned(),
        };

        let store = Arc::new(SqlitePersonaStore::open(&config.storage).await?);
        for persona in &self.personas {
            store.append(persona).await?;
        }

        let text = Arc::new(MockTextGenerator::with_responses(self.responses));
        let speech = Arc::new(self.speech.unwrap_or_default());
        let pinner = Arc::new(MockPinner::new());
        let portraits = Arc::new(MockPortrait::new());
        let minter = Arc::new(if self.wallet_session {
            MockMinter::connected()
        } else {
            MockMinter::disconnected()
        });
        let news = Arc::new(MockNews::new());

        let archiver = TranscriptArchiver::new(pinner.clone());
        let synthesizer = AudioSynthesizer::new(
            speech.clone(),
            Some(pinner.clone() as Arc<dyn PinningService>),
            PodcastSettings::from_config(&config),
        );

        let state = GatewayState {
            personas: store.clone(),
            orchestrator: DebateOrchestrator::new(text.clone(), self.policy),
            consultant: Consultant::new(text.clone(), store.clone()),
            persona_generator: Some(PersonaGenerator::new(
                text.clone(),
                portraits.clone(),
                store.clone(),
            )),
            publisher: Some(Publisher::new(archiver.clone(), synthesizer.clone())),
            archiver: Some(archiver),
            synthesizer,
            minter: minter.clone(),
            news: news.clone(),
            event_buffer: config.server.event_buffer,
            auth: AuthConfig {
                bearer_token: self.bearer_token,
            },
            health: HealthState {
                start_time: std::time::Instant::now(),
                adapters: vec![
                    store.clone() as Arc<dyn PluginAdapter>,
                    text.clone(),
                    speech.clone(),
                    pinner.clone(),
                    portraits.clone(),
                    minter.clone(),
                    news.clone(),
                ],
            },
        };

        Ok(TestHarness {
            text,
            speech,
            pinner,
            portraits,
            minter,
            news,
            store,
            state,
            config,
            public_dir,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete gateway over mock adapters and temp storage.
pub struct TestHarness {
    pub text: Arc<MockTextGenerator>,
    pub speech: Arc<MockSpeech>,
    pub pinner: Arc<MockPinner>,
    pub portraits: Arc<MockPortrait>,
    pub minter: Arc<MockMinter>,
    pub news: Arc<MockNews>,
    /// SQLite persona store (temp DB, cleaned up on drop).
    pub store: Arc<SqlitePersonaStore>,
    pub state: GatewayState,
    pub config: GazetteConfig,
    public_dir: PathBuf,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

/// Status, content type and body text of one in-process response.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// The body parsed as JSON; `Null` when it is not JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    /// The JSON payloads of every `data:` line, in order.
    pub fn sse_frames(&self) -> Vec<serde_json::Value> {
        self.body
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .filter_map(|data| serde_json::from_str(data.trim_start()).ok())
            .collect()
    }
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.public_dir)
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Sends one request through a fresh router and reads the whole body.
    ///
    /// SSE responses are read until the server closes the stream.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<TestResponse, GazetteError> {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        if let Some(token) = bearer {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = builder
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .map_err(|e| GazetteError::Internal(format!("bad test request: {e}")))?;

        let response = self
            .router()
            .oneshot(request)
            .await
            .map_err(|e| GazetteError::Internal(format!("router error: {e}")))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| GazetteError::Internal(format!("failed to read body: {e}")))?
            .to_bytes();

        Ok(TestResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse, GazetteError> {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> Result<TestResponse, GazetteError> {
        self.send(Method::POST, uri, Some(body), None).await
    }
}
