// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gazette serve`: builds the adapters and runs the gateway.

use std::sync::Arc;

use gazette_config::GazetteConfig;
use gazette_core::{GazetteError, PinningService, PluginAdapter, TokenMinter};
use gazette_debate::{
    AudioSynthesizer, Consultant, DebateOrchestrator, DebatePolicy, PersonaGenerator,
    PodcastSettings, Publisher, TranscriptArchiver,
};
use gazette_gateway::{AuthConfig, GatewayState, HealthState};
use gazette_gemini::GeminiProvider;
use gazette_news::NewsClient;
use gazette_pinata::PinataPinner;
use gazette_portrait::PortraitClient;
use gazette_storage::SqlitePersonaStore;
use gazette_wallet::WalletMinter;
use tracing::{debug, info, warn};

/// Runs the gateway until SIGINT or SIGTERM.
pub async fn run_serve(config: GazetteConfig) -> Result<(), GazetteError> {
    info!("starting gazette serve");

    let state = build_state(&config).await?;
    gazette_gateway::start_server(&config.server, state, shutdown_signal()).await?;

    info!("gazette serve shutdown complete");
    Ok(())
}

/// Builds every adapter and service from configuration.
///
/// Text generation, the persona store, the wallet relay and news are
/// required. Pinning and portraits need credentials; without them their
/// routes are disabled and the rest of the gateway still starts.
pub async fn build_state(config: &GazetteConfig) -> Result<GatewayState, GazetteError> {
    let store = Arc::new(SqlitePersonaStore::open(&config.storage).await?);
    info!(
        path = %config.storage.database_path,
        personas = store.count().await?,
        "persona store opened"
    );

    let gemini = Arc::new(GeminiProvider::new(config)?);
    let minter = Arc::new(WalletMinter::new(config)?);
    let news = Arc::new(NewsClient::new(config)?);
    let pinner = optional("pinning", PinataPinner::new(config)).map(Arc::new);
    let portraits = optional("portrait generation", PortraitClient::new(config)).map(Arc::new);

    let mut adapters: Vec<Arc<dyn PluginAdapter>> = vec![
        store.clone() as Arc<dyn PluginAdapter>,
        gemini.clone(),
        minter.clone(),
        news.clone(),
    ];
    if let Some(pinner) = &pinner {
        adapters.push(pinner.clone());
    }
    if let Some(portraits) = &portraits {
        adapters.push(portraits.clone());
    }

    let synthesizer = AudioSynthesizer::new(
        gemini.clone(),
        pinner
            .clone()
            .map(|p| -> Arc<dyn PinningService> { p }),
        PodcastSettings::from_config(config),
    );
    let archiver = pinner.map(|p| TranscriptArchiver::new(p));
    let publisher = archiver
        .clone()
        .map(|archiver| Publisher::new(archiver, synthesizer.clone()));
    let persona_generator =
        portraits.map(|p| PersonaGenerator::new(gemini.clone(), p, store.clone()));

    if !minter.has_session() {
        debug!("no wallet session configured; mint requests will be skipped");
    }

    Ok(GatewayState {
        personas: store.clone(),
        orchestrator: DebateOrchestrator::new(
            gemini.clone(),
            DebatePolicy::from_config(&config.debate),
        ),
        consultant: Consultant::new(gemini, store),
        synthesizer,
        persona_generator,
        archiver,
        publisher,
        minter,
        news,
        event_buffer: config.server.event_buffer,
        auth: AuthConfig {
            bearer_token: config.server.bearer_token.clone(),
        },
        health: HealthState {
            start_time: std::time::Instant::now(),
            adapters,
        },
    })
}

/// Keeps an adapter whose construction succeeded; logs and drops it otherwise.
fn optional<T>(feature: &str, built: Result<T, GazetteError>) -> Option<T> {
    match built {
        Ok(adapter) => Some(adapter),
        Err(e) => {
            warn!(error = %e, "{feature} disabled");
            None
        }
    }
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                    _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                let _ = ctrl_c.await;
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(dir: &std::path::Path) -> GazetteConfig {
        let mut config = GazetteConfig::default();
        config.storage.database_path = dir.join("gazette.db").to_string_lossy().into_owned();
        config.server.public_dir = dir.join("public").to_string_lossy().into_owned();
        config.gemini.api_key = Some("gemini-key".into());
        config.pinning.api_key = Some("pin-key".into());
        config.pinning.secret_api_key = Some("pin-secret".into());
        config.portrait.api_key = Some("portrait-key".into());
        config.news.api_key = Some("news-key".into());
        config
    }

    #[tokio::test]
    async fn fully_configured_state_enables_every_route() {
        let dir = tempfile::tempdir().unwrap();
        let state = build_state(&configured(dir.path())).await.unwrap();

        assert!(state.archiver.is_some());
        assert!(state.publisher.is_some());
        assert!(state.persona_generator.is_some());
        assert_eq!(state.health.adapters.len(), 6);
        assert!(!state.auth.enabled());
        assert!(dir.path().join("gazette.db").exists());
    }

    #[test]
    fn optional_drops_failed_adapters() {
        let built: Result<u8, GazetteError> = Err(GazetteError::Config("missing key".into()));
        assert_eq!(optional("pinning", built), None);
        assert_eq!(optional("pinning", Ok::<u8, GazetteError>(7)), Some(7));
    }
}
