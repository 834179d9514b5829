// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Debate services for the Gazette.
//!
//! - [`orchestrator`]: the alternating round loop as a lazy event stream.
//! - [`transport`]: producer task and bounded channel feeding SSE.
//! - [`archiver`], [`synthesizer`], [`publisher`]: what happens to a
//!   finished transcript.
//! - [`personas`], [`consultation`]: persona creation and one-on-one chat.
//!
//! Every service talks to hosted APIs only through the adapter traits in
//! `gazette-core`, so tests run against in-process mocks.

pub mod archiver;
pub mod consultation;
pub mod orchestrator;
pub mod personas;
pub mod policy;
pub mod prompts;
pub mod publisher;
pub mod synthesizer;
pub mod transport;

pub use archiver::{ArchiveReceipt, TranscriptArchiver};
pub use consultation::{ConsultReply, ConsultRequest, ConsultStream, Consultant};
pub use orchestrator::{DebateOrchestrator, DebateSetup, PersonaRef, collect_transcript};
pub use personas::PersonaGenerator;
pub use policy::DebatePolicy;
pub use publisher::{PublishOutcome, Publisher};
pub use synthesizer::{AudioSynthesizer, PodcastReceipt, PodcastSettings};
pub use transport::{Relay, receiver_stream, spawn_relay};
