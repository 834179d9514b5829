// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Commemorative token minting adapter.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;
use crate::types::MintOutcome;

/// Adapter for a wallet/contract call that takes one content address.
#[async_trait]
pub trait TokenMinter: PluginAdapter {
    /// True when a wallet session is connected.
    fn has_session(&self) -> bool;

    /// Mints a token referencing `content_address`.
    ///
    /// Returns [`MintOutcome::Skipped`] without any network traffic when no
    /// session is connected.
    async fn mint(&self, content_address: &str) -> Result<MintOutcome, GazetteError>;
}
