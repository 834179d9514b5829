// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that every adapter implements.

use async_trait::async_trait;

use crate::error::GazetteError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and health reporting shared by all adapters.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of service this adapter fronts.
    fn adapter_type(&self) -> AdapterType;

    /// Reports whether the adapter can currently serve requests.
    ///
    /// Implementations must not spend quota (no generation calls).
    async fn health_check(&self) -> Result<HealthStatus, GazetteError>;
}
