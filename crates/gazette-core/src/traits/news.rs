// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! News search adapter.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;

#[async_trait]
pub trait NewsFeed: PluginAdapter {
    /// Searches current news; the upstream JSON is returned untouched.
    async fn search(&self, query: &str) -> Result<serde_json::Value, GazetteError>;
}
