// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Round limits, pacing and sampling for a debate run.

use std::time::Duration;

use gazette_config::model::DebateConfig;
use gazette_core::GazetteError;
use gazette_core::types::SamplingParams;

#[derive(Debug, Clone, PartialEq)]
pub struct DebatePolicy {
    pub default_rounds: u32,
    pub max_rounds: u32,
    /// Number of most recent turns shown to the next speaker.
    pub context_window: usize,
    /// Pause between two turns; never applied after the last one.
    pub turn_delay: Duration,
    pub turn_sampling: SamplingParams,
    pub conclusion_sampling: SamplingParams,
}

impl DebatePolicy {
    pub fn from_config(config: &DebateConfig) -> Self {
        Self {
            default_rounds: config.default_rounds,
            max_rounds: config.max_rounds,
            context_window: config.context_window,
            turn_delay: Duration::from_millis(config.turn_delay_ms),
            turn_sampling: SamplingParams {
                temperature: config.turn_temperature,
                top_k: config.turn_top_k,
                max_output_tokens: config.turn_max_tokens,
            },
            conclusion_sampling: SamplingParams {
                temperature: config.conclusion_temperature,
                top_k: config.conclusion_top_k,
                max_output_tokens: config.conclusion_max_tokens,
            },
        }
    }

    /// Same policy without pacing, for tests and batch runs.
    pub fn without_delay(mut self) -> Self {
        self.turn_delay = Duration::ZERO;
        self
    }

    /// Rounds to run for a request: the default when unset, rejected above
    /// the limit.
    pub fn resolve_rounds(&self, requested: Option<u32>) -> Result<u32, GazetteError> {
        let rounds = requested.unwrap_or(self.default_rounds);
        if rounds > self.max_rounds {
            return Err(GazetteError::InvalidRequest(format!(
                "rounds must be at most {}, got {rounds}",
                self.max_rounds
            )));
        }
        Ok(rounds)
    }
}

impl Default for DebatePolicy {
    fn default() -> Self {
        Self::from_config(&DebateConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_policy() {
        let policy = DebatePolicy::default();
        assert_eq!(policy.default_rounds, 8);
        assert_eq!(policy.max_rounds, 20);
        assert_eq!(policy.context_window, 4);
        assert_eq!(policy.turn_delay, Duration::from_millis(800));
        assert_eq!(policy.turn_sampling.max_output_tokens, 80);
        assert_eq!(policy.conclusion_sampling.max_output_tokens, 200);
        assert!((policy.conclusion_sampling.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn rounds_resolution() {
        let policy = DebatePolicy::default();
        assert_eq!(policy.resolve_rounds(None).unwrap(), 8);
        assert_eq!(policy.resolve_rounds(Some(0)).unwrap(), 0);
        assert_eq!(policy.resolve_rounds(Some(20)).unwrap(), 20);
        assert!(matches!(
            policy.resolve_rounds(Some(21)),
            Err(GazetteError::InvalidRequest(_))
        ));
    }
}
