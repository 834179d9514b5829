// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decentralized storage (pinning) adapter.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{PinReceipt, PinRequest};

/// Adapter for a pinning service that returns content addresses.
///
/// No deduplication is promised: pinning the same bytes twice may yield two
/// different addresses.
#[async_trait]
pub trait PinningService: PluginAdapter {
    async fn pin(&self, request: PinRequest) -> Result<PinReceipt, GazetteError>;
}
