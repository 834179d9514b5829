// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON request handlers. The debate and consultation streams live in
//! [`crate::sse`].

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use gazette_core::types::{HealthStatus, MintOutcome, Persona, Transcript};
use gazette_core::GazetteError;
use gazette_debate::{ArchiveReceipt, PodcastReceipt, PublishOutcome};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, JsonBody};
use crate::server::GatewayState;

/// Health of one adapter as reported by `/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterHealth {
    pub name: String,
    pub kind: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" when every adapter is healthy, "degraded" otherwise.
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub adapters: Vec<AdapterHealth>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePersonaRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    #[serde(alias = "cid")]
    pub content_address: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /health
///
/// Checks every registered adapter. Always 200; degradation shows in the body.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let mut adapters = Vec::with_capacity(state.health.adapters.len());
    let mut all_healthy = true;

    for adapter in &state.health.adapters {
        let (status, detail) = match adapter.health_check().await {
            Ok(HealthStatus::Healthy) => ("healthy", None),
            Ok(HealthStatus::Degraded(reason)) => ("degraded", Some(reason)),
            Ok(HealthStatus::Unhealthy(reason)) => ("unhealthy", Some(reason)),
            Err(e) => ("unhealthy", Some(e.to_string())),
        };
        all_healthy &= status == "healthy";
        adapters.push(AdapterHealth {
            name: adapter.name().to_string(),
            kind: adapter.adapter_type().to_string(),
            status: status.to_string(),
            detail,
        });
    }

    Json(HealthResponse {
        status: if all_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        adapters,
    })
}

/// GET /api/personas
pub async fn list_personas(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Persona>>, ApiError> {
    Ok(Json(state.personas.list().await?))
}

/// POST /api/personas
pub async fn create_persona(
    State(state): State<GatewayState>,
    JsonBody(persona): JsonBody<Persona>,
) -> Result<(StatusCode, Json<Persona>), ApiError> {
    for (field, value) in [
        ("id", &persona.id),
        ("name", &persona.name),
        ("promptText", &persona.prompt_text),
    ] {
        if value.trim().is_empty() {
            return Err(GazetteError::InvalidRequest(format!("{field} is required")).into());
        }
    }
    state.personas.append(&persona).await?;
    tracing::info!(persona_id = %persona.id, "persona added");
    Ok((StatusCode::CREATED, Json(persona)))
}

/// POST /api/personas/generate
pub async fn generate_persona(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody<GeneratePersonaRequest>,
) -> Result<(StatusCode, Json<Persona>), ApiError> {
    let generator = state
        .persona_generator
        .as_ref()
        .ok_or_else(|| ApiError::not_configured("portrait generation"))?;
    let persona = generator.generate(&body.name).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

/// POST /api/debates/archive
pub async fn archive_transcript(
    State(state): State<GatewayState>,
    JsonBody(transcript): JsonBody<Transcript>,
) -> Result<Json<ArchiveReceipt>, ApiError> {
    let archiver = state
        .archiver
        .as_ref()
        .ok_or_else(|| ApiError::not_configured("pinning"))?;
    Ok(Json(archiver.archive(&transcript).await?))
}

/// POST /api/debates/podcast
pub async fn synthesize_podcast(
    State(state): State<GatewayState>,
    JsonBody(transcript): JsonBody<Transcript>,
) -> Result<Json<PodcastReceipt>, ApiError> {
    Ok(Json(state.synthesizer.synthesize(&transcript).await?))
}

/// POST /api/debates/publish
///
/// Archive failure is an error; synthesis failure is a 200 with warnings.
pub async fn publish_transcript(
    State(state): State<GatewayState>,
    JsonBody(transcript): JsonBody<Transcript>,
) -> Result<Json<PublishOutcome>, ApiError> {
    let publisher = state
        .publisher
        .as_ref()
        .ok_or_else(|| ApiError::not_configured("pinning"))?;
    Ok(Json(publisher.publish(transcript).await?))
}

/// POST /api/mint
pub async fn mint(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody<MintRequest>,
) -> Result<Json<MintOutcome>, ApiError> {
    let address = body.content_address.trim();
    if address.is_empty() {
        return Err(GazetteError::InvalidRequest("contentAddress is required".into()).into());
    }
    Ok(Json(state.minter.mint(address).await?))
}

/// GET /api/news?q=
pub async fn search_news(
    State(state): State<GatewayState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let q = query.q.unwrap_or_default();
    Ok(Json(state.news.search(&q).await?))
}
