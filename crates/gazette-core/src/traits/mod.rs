// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the hosted services Gazette talks to.
//!
//! Every adapter extends [`PluginAdapter`] and uses `#[async_trait]` so the
//! gateway can hold them as `Arc<dyn Trait>`.

pub mod adapter;
pub mod generation;
pub mod minting;
pub mod news;
pub mod persona;
pub mod pinning;
pub mod portrait;
pub mod speech;

pub use adapter::PluginAdapter;
pub use generation::{TextGenerator, TextStream};
pub use minting::TokenMinter;
pub use news::NewsFeed;
pub use persona::PersonaRepository;
pub use pinning::PinningService;
pub use portrait::PortraitGenerator;
pub use speech::SpeechSynthesizer;
