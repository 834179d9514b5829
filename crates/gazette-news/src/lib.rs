// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! News search proxy. The upstream JSON is passed through untouched.

use std::time::Duration;

use async_trait::async_trait;
use gazette_config::GazetteConfig;
use gazette_core::error::GazetteError;
use gazette_core::traits::{NewsFeed, PluginAdapter};
use gazette_core::types::{AdapterType, HealthStatus};
use tracing::{debug, warn};

const API_KEY_ENV: &str = "SERPAPI_API_KEY";

/// Error message surfaced to clients on any upstream failure.
pub const FETCH_FAILED: &str = "Failed to fetch data";

pub struct NewsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    default_query: String,
    region: String,
    language: String,
}

impl NewsClient {
    pub fn new(config: &GazetteConfig) -> Result<Self, GazetteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .build()
            .map_err(|e| GazetteError::Config(format!("failed to build HTTP client: {e}")))?;

        let api_key = config
            .news
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()));

        Ok(Self {
            client,
            endpoint: config.news.endpoint.clone(),
            api_key,
            default_query: config.news.default_query.clone(),
            region: config.news.region.clone(),
            language: config.news.language.clone(),
        })
    }

    /// Search URL for `query`; an empty query falls back to the default.
    pub fn search_url(&self, query: &str) -> Result<reqwest::Url, GazetteError> {
        let query = if query.trim().is_empty() {
            self.default_query.as_str()
        } else {
            query
        };
        let api_key = self.api_key.as_deref().unwrap_or_default();
        reqwest::Url::parse_with_params(
            &self.endpoint,
            &[
                ("engine", "google_news"),
                ("q", query),
                ("gl", self.region.as_str()),
                ("hl", self.language.as_str()),
                ("api_key", api_key),
            ],
        )
        .map_err(|e| GazetteError::Config(format!("invalid news endpoint: {e}")))
    }
}

fn fetch_err(source: Option<gazette_core::error::BoxError>) -> GazetteError {
    GazetteError::UpstreamFailed {
        message: FETCH_FAILED.to_string(),
        source,
    }
}

#[async_trait]
impl PluginAdapter for NewsClient {
    fn name(&self) -> &str {
        "news"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::News
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        if self.api_key.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("news API key not configured".into()))
        }
    }
}

#[async_trait]
impl NewsFeed for NewsClient {
    async fn search(&self, query: &str) -> Result<serde_json::Value, GazetteError> {
        let url = self.search_url(query)?;
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "news fetch failed");
            fetch_err(Some(Box::new(e)))
        })?;

        let status = response.status();
        debug!(status = %status, "news response received");
        if !status.is_success() {
            warn!(status = %status, "news upstream returned an error");
            return Err(fetch_err(None));
        }
        response.json().await.map_err(|e| fetch_err(Some(Box::new(e))))
    }
}
