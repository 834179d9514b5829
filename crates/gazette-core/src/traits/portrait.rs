// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-image adapter used for persona portraits.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;

#[async_trait]
pub trait PortraitGenerator: PluginAdapter {
    /// Renders an image for the prompt and returns its URL.
    async fn render(&self, prompt: &str) -> Result<String, GazetteError>;
}
