// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: bind address shape, round
//! limits, sampling ranges, and PCM layout.

use crate::diagnostic::ConfigError;
use crate::model::GazetteConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &GazetteConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.event_buffer == 0 {
        fail("server.event_buffer must be at least 1".to_string());
    }

    if config.server.public_dir.trim().is_empty() {
        fail("server.public_dir must not be empty".to_string());
    }

    let debate = &config.debate;
    if debate.max_rounds == 0 {
        fail("debate.max_rounds must be at least 1".to_string());
    }
    if debate.default_rounds > debate.max_rounds {
        fail(format!(
            "debate.default_rounds ({}) exceeds debate.max_rounds ({})",
            debate.default_rounds, debate.max_rounds
        ));
    }
    if debate.context_window == 0 {
        fail("debate.context_window must be at least 1".to_string());
    }
    for (key, value) in [
        ("debate.turn_temperature", debate.turn_temperature),
        ("debate.conclusion_temperature", debate.conclusion_temperature),
    ] {
        if !(0.0..=2.0).contains(&value) {
            fail(format!("{key} must be within 0.0..=2.0, got {value}"));
        }
    }
    for (key, value) in [
        ("debate.turn_max_tokens", debate.turn_max_tokens),
        ("debate.conclusion_max_tokens", debate.conclusion_max_tokens),
        ("debate.turn_top_k", debate.turn_top_k),
        ("debate.conclusion_top_k", debate.conclusion_top_k),
    ] {
        if value == 0 {
            fail(format!("{key} must be at least 1"));
        }
    }

    let podcast = &config.podcast;
    if podcast.sample_rate == 0 {
        fail("podcast.sample_rate must be positive".to_string());
    }
    if podcast.channels == 0 {
        fail("podcast.channels must be at least 1".to_string());
    }
    if !matches!(podcast.sample_width, 1..=4) {
        fail(format!(
            "podcast.sample_width must be 1, 2, 3 or 4 bytes, got {}",
            podcast.sample_width
        ));
    }
    if podcast.voice_a.trim().is_empty() || podcast.voice_b.trim().is_empty() {
        fail("podcast.voice_a and podcast.voice_b must not be empty".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.wallet.session_token.is_some() != config.wallet.sender_address.is_some() {
        fail(
            "wallet.session_token and wallet.sender_address must be set together".to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&GazetteConfig::default()).is_ok());
    }

    #[test]
    fn default_rounds_above_limit_fails() {
        let mut config = GazetteConfig::default();
        config.debate.default_rounds = 30;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("default_rounds")));
    }

    #[test]
    fn zero_context_window_fails() {
        let mut config = GazetteConfig::default();
        config.debate.context_window = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("context_window")));
    }

    #[test]
    fn out_of_range_temperature_fails() {
        let mut config = GazetteConfig::default();
        config.debate.turn_temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("turn_temperature")));
    }

    #[test]
    fn bad_sample_width_fails() {
        let mut config = GazetteConfig::default();
        config.podcast.sample_width = 5;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("sample_width")));
    }

    #[test]
    fn half_configured_wallet_fails() {
        let mut config = GazetteConfig::default();
        config.wallet.session_token = Some("token".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("wallet")));
    }

    #[test]
    fn collects_every_error() {
        let mut config = GazetteConfig::default();
        config.server.host = String::new();
        config.storage.database_path = " ".into();
        config.debate.max_rounds = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "got {errors:?}");
    }
}
