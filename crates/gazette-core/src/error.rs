// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by every Gazette crate.

use thiserror::Error;

/// Boxed source error carried by the upstream-failure variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across adapter traits and debate operations.
///
/// Each hosted-service boundary has its own variant so the HTTP layer can
/// report which step failed without parsing messages.
#[derive(Debug, Error)]
pub enum GazetteError {
    /// Configuration errors (invalid TOML, missing API keys, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Persona store errors (database open, query failure, row decoding).
    #[error("storage error: {source}")]
    Storage { source: BoxError },

    /// The caller sent a request that can never succeed as-is.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No persona with the given id exists in the store.
    #[error("persona not found: {0}")]
    PersonaNotFound(String),

    /// A persona with the given id is already stored.
    #[error("persona already exists: {0}")]
    PersonaExists(String),

    /// The text-generation service returned an error or an unusable response.
    #[error("generation failed: {message}")]
    GenerationFailed {
        message: String,
        source: Option<BoxError>,
    },

    /// The text-to-image service did not return a portrait.
    #[error("portrait generation failed: {message}")]
    PortraitFailed {
        message: String,
        source: Option<BoxError>,
    },

    /// The pinning service rejected or failed an upload.
    #[error("archive failed: {message}")]
    ArchiveFailed {
        message: String,
        source: Option<BoxError>,
    },

    /// The text-to-speech service failed or returned no audio.
    #[error("synthesis failed: {message}")]
    SynthesisFailed {
        message: String,
        source: Option<BoxError>,
    },

    /// The wallet relay rejected or failed a mint call.
    #[error("mint failed: {message}")]
    MintFailed {
        message: String,
        source: Option<BoxError>,
    },

    /// Any other hosted service (news search) failed.
    #[error("upstream request failed: {message}")]
    UpstreamFailed {
        message: String,
        source: Option<BoxError>,
    },

    /// The consumer of a debate stream went away before the final event.
    #[error("event channel closed after {delivered} events")]
    ChannelClosedEarly { delivered: usize },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GazetteError {
    /// True for failures caused by a hosted service rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GazetteError::GenerationFailed { .. }
                | GazetteError::PortraitFailed { .. }
                | GazetteError::ArchiveFailed { .. }
                | GazetteError::SynthesisFailed { .. }
                | GazetteError::MintFailed { .. }
                | GazetteError::UpstreamFailed { .. }
        )
    }
}
