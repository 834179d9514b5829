// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Gazette debate service.
//!
//! This crate holds the shared error type, the debate domain model
//! (personas, turns, transcripts, events), and the adapter traits that the
//! hosted-service clients implement. Everything else in the workspace
//! depends on it; it depends on nothing but serde and friends.

pub mod error;
pub mod traits;
pub mod types;

pub use error::GazetteError;
pub use types::{
    AdapterType, ArchivedRecord, DebateEvent, HealthStatus, Participants, Persona, SpeakerSlot,
    Transcript, Turn,
};

pub use traits::{
    NewsFeed, PersonaRepository, PinningService, PluginAdapter, PortraitGenerator,
    SpeechSynthesizer, TextGenerator, TextStream, TokenMinter,
};
