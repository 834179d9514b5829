// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona repository.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Persona;

/// Ordered, append-only persona list.
#[async_trait]
pub trait PersonaRepository: PluginAdapter {
    /// All personas in creation order.
    async fn list(&self) -> Result<Vec<Persona>, GazetteError>;

    /// Appends a persona. Fails with [`GazetteError::PersonaExists`] when the
    /// id is taken.
    async fn append(&self, persona: &Persona) -> Result<(), GazetteError>;

    async fn get(&self, id: &str) -> Result<Option<Persona>, GazetteError>;
}
