// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use gazette_config::model::ServerConfig;
use gazette_core::traits::{NewsFeed, PersonaRepository, PluginAdapter, TokenMinter};
use gazette_core::GazetteError;
use gazette_debate::{
    AudioSynthesizer, Consultant, DebateOrchestrator, PersonaGenerator, Publisher,
    TranscriptArchiver,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;
use crate::sse;

/// Health state shared with the health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Server start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Adapters checked by `/health`.
    pub adapters: Vec<Arc<dyn PluginAdapter>>,
}

/// Shared state for all gateway handlers.
///
/// The `Option` services depend on credentials that may be absent; their
/// routes answer with a configuration error until they are set.
#[derive(Clone)]
pub struct GatewayState {
    pub personas: Arc<dyn PersonaRepository>,
    pub orchestrator: DebateOrchestrator,
    pub consultant: Consultant,
    pub synthesizer: AudioSynthesizer,
    pub persona_generator: Option<PersonaGenerator>,
    pub archiver: Option<TranscriptArchiver>,
    pub publisher: Option<Publisher>,
    pub minter: Arc<dyn TokenMinter>,
    pub news: Arc<dyn NewsFeed>,
    /// Capacity of each debate's event channel.
    pub event_buffer: usize,
    pub auth: AuthConfig,
    pub health: HealthState,
}

/// Builds the full application router.
///
/// `/health` is always public; `/api/*` sits behind the bearer-token layer
/// when one is configured. Anything else is looked up in `public_dir`.
pub fn build_router(state: GatewayState, public_dir: &Path) -> Router {
    let auth_state = state.auth.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let mut api_routes = Router::new()
        .route(
            "/api/personas",
            get(handlers::list_personas).post(handlers::create_persona),
        )
        .route("/api/personas/generate", post(handlers::generate_persona))
        .route("/api/debate", post(sse::stream_debate))
        .route("/api/consult", post(sse::stream_consultation))
        .route("/api/debates/archive", post(handlers::archive_transcript))
        .route("/api/debates/podcast", post(handlers::synthesize_podcast))
        .route("/api/debates/publish", post(handlers::publish_transcript))
        .route("/api/mint", post(handlers::mint))
        .route("/api/news", get(handlers::search_news));

    if auth_state.enabled() {
        api_routes = api_routes.route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));
    }

    Router::new()
        .merge(public_routes)
        .merge(api_routes.with_state(state))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds the configured address and serves until `shutdown` resolves.
///
/// Connections already open, debate streams included, run to completion.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), GazetteError> {
    let app = build_router(state, Path::new(&config.public_dir));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GazetteError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(public_dir = %config.public_dir, "gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| GazetteError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
