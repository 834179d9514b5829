// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./gazette.toml` > `~/.config/gazette/gazette.toml` >
//! `/etc/gazette/gazette.toml`, with `GAZETTE_*` environment overrides on top.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GazetteConfig;

/// Top-level sections, used to map `GAZETTE_SECTION_KEY` onto `section.key`.
const SECTIONS: &[&str] = &[
    "server", "logging", "gemini", "debate", "podcast", "pinning", "portrait", "wallet", "news",
    "storage",
];

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/gazette/gazette.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "gazette.toml";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/gazette/gazette.toml`
/// 3. `~/.config/gazette/gazette.toml`
/// 4. `./gazette.toml`
/// 5. `GAZETTE_*` environment variables
pub fn load_config() -> Result<GazetteConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<GazetteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GazetteConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GazetteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GazetteConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GazetteConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/gazette/gazette.toml`, when the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("gazette").join(LOCAL_CONFIG_FILE))
}

/// Environment provider mapping `GAZETTE_GEMINI_API_KEY` to `gemini.api_key`.
///
/// Only the section prefix is turned into a dot, so keys that contain
/// underscores (`api_key`, `turn_delay_ms`) stay intact.
fn env_provider() -> Env {
    Env::prefixed("GAZETTE_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}
