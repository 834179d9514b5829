// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Gazette integration tests.
//!
//! Provides mock adapters and a gateway harness for fast, deterministic,
//! CI-runnable tests without any hosted service.
//!
//! # Components
//!
//! - [`MockTextGenerator`] / [`MockSpeech`] - scripted generation and TTS
//! - [`MockPinner`] - pinning service handing out fresh content addresses
//! - [`MockPortrait`], [`MockMinter`], [`MockNews`] - the remaining adapters
//! - [`TestHarness`] - a full gateway router over the mocks and a temp store

pub mod harness;
pub mod mock_generation;
pub mod mock_services;

pub use harness::{TestHarness, TestHarnessBuilder, TestResponse};
pub use mock_generation::{MockSpeech, MockTextGenerator};
pub use mock_services::{MockMinter, MockNews, MockPinner, MockPortrait};

use gazette_core::types::Persona;

/// A persona with a predictable id, prompt and portrait.
pub fn persona(id: &str, name: &str) -> Persona {
    Persona {
        id: id.to_string(),
        name: name.to_string(),
        prompt_text: format!("You are {name}."),
        portrait_uri: format!("https://img.test/{id}.png"),
    }
}
