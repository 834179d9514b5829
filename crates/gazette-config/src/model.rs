// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Gazette debate service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup with a suggestion instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Gazette configuration.
///
/// Every section is optional and falls back to the defaults below. API keys
/// default to `None`; the adapters that need them report a configuration
/// error when they are built without one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GazetteConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log filter settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Text generation and TTS (Gemini) settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Debate round policy.
    #[serde(default)]
    pub debate: DebateConfig,

    /// Podcast synthesis settings.
    #[serde(default)]
    pub podcast: PodcastConfig,

    /// Pinning service settings.
    #[serde(default)]
    pub pinning: PinningConfig,

    /// Portrait (text-to-image) settings.
    #[serde(default)]
    pub portrait: PortraitConfig,

    /// Wallet relay settings for minting.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// News search settings.
    #[serde(default)]
    pub news: NewsConfig,

    /// Persona store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on `/api/*`. `None` leaves the API open.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Directory that synthesized podcasts are written to and served from.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Capacity of the per-debate event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Timeout applied to every outbound HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
            public_dir: default_public_dir(),
            event_buffer: default_event_buffer(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_event_buffer() -> usize {
    16
}

fn default_request_timeout_secs() -> u64 {
    120
}

/// Logging configuration. `RUST_LOG` wins when set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for the gazette crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration (text generation and TTS).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to the `GOOGLE_GENERATIVE_AI_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL, up to and including the version segment.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model used for debate turns, conclusions, and consultations.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for podcast speech.
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            text_model: default_text_model(),
            tts_model: default_tts_model(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

/// Debate round policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebateConfig {
    /// Rounds used when a request does not name a count.
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,

    /// Largest round count a request may ask for.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Number of recent turns included in each turn's context.
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Pause between turns, in milliseconds.
    #[serde(default = "default_turn_delay_ms")]
    pub turn_delay_ms: u64,

    #[serde(default = "default_turn_temperature")]
    pub turn_temperature: f32,

    #[serde(default = "default_top_k")]
    pub turn_top_k: u32,

    #[serde(default = "default_turn_max_tokens")]
    pub turn_max_tokens: u32,

    #[serde(default = "default_conclusion_temperature")]
    pub conclusion_temperature: f32,

    #[serde(default = "default_top_k")]
    pub conclusion_top_k: u32,

    #[serde(default = "default_conclusion_max_tokens")]
    pub conclusion_max_tokens: u32,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            default_rounds: default_rounds(),
            max_rounds: default_max_rounds(),
            context_window: default_context_window(),
            turn_delay_ms: default_turn_delay_ms(),
            turn_temperature: default_turn_temperature(),
            turn_top_k: default_top_k(),
            turn_max_tokens: default_turn_max_tokens(),
            conclusion_temperature: default_conclusion_temperature(),
            conclusion_top_k: default_top_k(),
            conclusion_max_tokens: default_conclusion_max_tokens(),
        }
    }
}

fn default_rounds() -> u32 {
    8
}

fn default_max_rounds() -> u32 {
    20
}

fn default_context_window() -> usize {
    4
}

fn default_turn_delay_ms() -> u64 {
    800
}

fn default_turn_temperature() -> f32 {
    0.8
}

fn default_top_k() -> u32 {
    40
}

fn default_turn_max_tokens() -> u32 {
    80
}

fn default_conclusion_temperature() -> f32 {
    0.5
}

fn default_conclusion_max_tokens() -> u32 {
    200
}

/// Podcast synthesis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PodcastConfig {
    /// Prebuilt voice for the first debater.
    #[serde(default = "default_voice_a")]
    pub voice_a: String,

    /// Prebuilt voice for the second debater.
    #[serde(default = "default_voice_b")]
    pub voice_b: String,

    /// PCM sample rate returned by the TTS model.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Bytes per sample.
    #[serde(default = "default_sample_width")]
    pub sample_width: u16,

    /// Also pin the WAV file after writing it.
    #[serde(default = "default_publish_audio")]
    pub publish_audio: bool,
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            voice_a: default_voice_a(),
            voice_b: default_voice_b(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            sample_width: default_sample_width(),
            publish_audio: default_publish_audio(),
        }
    }
}

fn default_voice_a() -> String {
    "Orus".to_string()
}

fn default_voice_b() -> String {
    "Algieba".to_string()
}

fn default_sample_rate() -> u32 {
    24_000
}

fn default_channels() -> u16 {
    1
}

fn default_sample_width() -> u16 {
    2
}

fn default_publish_audio() -> bool {
    true
}

/// Pinning service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PinningConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub secret_api_key: Option<String>,

    /// Upload endpoint base URL.
    #[serde(default = "default_pinning_base_url")]
    pub base_url: String,

    /// Public gateway that serves pinned content by address.
    #[serde(default = "default_pinning_gateway_url")]
    pub gateway_url: String,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_api_key: None,
            base_url: default_pinning_base_url(),
            gateway_url: default_pinning_gateway_url(),
        }
    }
}

fn default_pinning_base_url() -> String {
    "https://api.pinata.cloud".to_string()
}

fn default_pinning_gateway_url() -> String {
    "https://gateway.pinata.cloud/ipfs".to_string()
}

/// Portrait generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortraitConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_portrait_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_portrait_engine")]
    pub engine: String,

    /// Image edge length in pixels.
    #[serde(default = "default_portrait_size")]
    pub size: u32,
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_portrait_endpoint(),
            engine: default_portrait_engine(),
            size: default_portrait_size(),
        }
    }
}

fn default_portrait_endpoint() -> String {
    "https://api.corcel.io/v1/image/vision/text-to-image".to_string()
}

fn default_portrait_engine() -> String {
    "flux-schnell".to_string()
}

fn default_portrait_size() -> u32 {
    1024
}

/// Wallet relay configuration.
///
/// Minting only happens when both `session_token` and `sender_address` are
/// set; otherwise mint requests are skipped.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WalletConfig {
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Fully qualified contract entry function.
    #[serde(default = "default_mint_function")]
    pub mint_function: String,

    #[serde(default)]
    pub session_token: Option<String>,

    #[serde(default)]
    pub sender_address: Option<String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            mint_function: default_mint_function(),
            session_token: None,
            sender_address: None,
        }
    }
}

fn default_relay_url() -> String {
    "http://127.0.0.1:8090".to_string()
}

fn default_mint_function() -> String {
    "0x1::gazette::mint_commemorative".to_string()
}

/// News search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NewsConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_news_endpoint")]
    pub endpoint: String,

    /// Query used when the caller sends none.
    #[serde(default = "default_news_query")]
    pub default_query: String,

    /// Country code passed as `gl`.
    #[serde(default = "default_news_region")]
    pub region: String,

    /// Language code passed as `hl`.
    #[serde(default = "default_news_language")]
    pub language: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_news_endpoint(),
            default_query: default_news_query(),
            region: default_news_region(),
            language: default_news_language(),
        }
    }
}

fn default_news_endpoint() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_news_query() -> String {
    "india".to_string()
}

fn default_news_region() -> String {
    "in".to_string()
}

fn default_news_language() -> String {
    "en".to_string()
}

/// Persona store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("gazette").join("gazette.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("gazette.db"))
        .to_string_lossy()
        .into_owned()
}
