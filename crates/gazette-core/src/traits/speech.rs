// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-speech adapter.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;
use crate::types::SpeechRequest;

/// Adapter for a hosted multi-speaker TTS API.
#[async_trait]
pub trait SpeechSynthesizer: PluginAdapter {
    /// Returns raw 16-bit little-endian PCM for the script.
    async fn synthesize(&self, request: SpeechRequest) -> Result<Vec<u8>, GazetteError>;
}
