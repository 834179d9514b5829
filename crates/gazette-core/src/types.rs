// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapters, the orchestrator, and the gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::GazetteError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter works but something is off (missing optional credentials).
    Degraded(String),
    /// Adapter cannot serve requests.
    Unhealthy(String),
}

/// Identifies the kind of hosted service an adapter talks to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    TextGeneration,
    Speech,
    Pinning,
    Portrait,
    Wallet,
    News,
    Storage,
}

// --- Personas ---

/// A named character profile whose prompt steers generated text.
///
/// Accepts the browser's legacy field names (`prompt`, `image`) on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: String,
    pub name: String,
    #[serde(alias = "prompt")]
    pub prompt_text: String,
    #[serde(default, alias = "image")]
    pub portrait_uri: String,
}

// --- Debates ---

/// Which side of a debate a turn belongs to. A always opens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum SpeakerSlot {
    A,
    B,
}

impl SpeakerSlot {
    /// Slot that speaks in the given 1-based round: odd rounds are A.
    pub fn for_round(round: u32) -> Self {
        if round % 2 == 1 {
            SpeakerSlot::A
        } else {
            SpeakerSlot::B
        }
    }
}

/// One persona's utterance within a debate round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub speaker_slot: SpeakerSlot,
    pub text: String,
    pub round_number: u32,
}

/// Display names of the two debaters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participants {
    pub a: String,
    pub b: String,
}

impl Participants {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn name_of(&self, slot: SpeakerSlot) -> &str {
        match slot {
            SpeakerSlot::A => &self.a,
            SpeakerSlot::B => &self.b,
        }
    }
}

/// Ordered record of one debate session.
///
/// Built incrementally through [`Transcript::push_turn`] and
/// [`Transcript::conclude`], which keep the alternation and round-number
/// invariants. Transcripts that arrive over HTTP are checked with
/// [`Transcript::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub topic: String,
    pub participants: Participants,
    #[serde(default)]
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl Transcript {
    pub fn new(topic: impl Into<String>, participants: Participants) -> Self {
        Self {
            topic: topic.into(),
            participants,
            turns: Vec::new(),
            conclusion: None,
        }
    }

    /// Round number the next pushed turn will carry.
    pub fn next_round(&self) -> u32 {
        self.turns.len() as u32 + 1
    }

    /// Appends the next turn; the slot and round are derived, never supplied.
    pub fn push_turn(&mut self, text: impl Into<String>) -> Result<&Turn, GazetteError> {
        if self.conclusion.is_some() {
            return Err(GazetteError::InvalidRequest(
                "cannot add a turn to a concluded transcript".to_string(),
            ));
        }
        let round_number = self.next_round();
        self.turns.push(Turn {
            speaker_slot: SpeakerSlot::for_round(round_number),
            text: text.into(),
            round_number,
        });
        Ok(&self.turns[self.turns.len() - 1])
    }

    /// Sets the conclusion. Fails if one is already present.
    pub fn conclude(&mut self, text: impl Into<String>) -> Result<(), GazetteError> {
        if self.conclusion.is_some() {
            return Err(GazetteError::InvalidRequest(
                "transcript already has a conclusion".to_string(),
            ));
        }
        self.conclusion = Some(text.into());
        Ok(())
    }

    /// The most recent `k` turns, oldest first.
    pub fn recent_turns(&self, k: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(k);
        &self.turns[start..]
    }

    /// Checks the structural invariants of a transcript built elsewhere.
    pub fn validate(&self) -> Result<(), GazetteError> {
        if self.topic.trim().is_empty() {
            return Err(GazetteError::InvalidRequest(
                "transcript topic must not be empty".to_string(),
            ));
        }
        for (i, turn) in self.turns.iter().enumerate() {
            let expected_round = i as u32 + 1;
            if turn.round_number != expected_round {
                return Err(GazetteError::InvalidRequest(format!(
                    "turn {i} has round {} but expected {expected_round}",
                    turn.round_number
                )));
            }
            if turn.speaker_slot != SpeakerSlot::for_round(expected_round) {
                return Err(GazetteError::InvalidRequest(format!(
                    "round {expected_round} must be spoken by slot {}",
                    SpeakerSlot::for_round(expected_round)
                )));
            }
        }
        Ok(())
    }

    /// Turn texts grouped by speaker name, in round order.
    pub fn dialogue(&self) -> BTreeMap<String, Vec<String>> {
        let mut dialogue: BTreeMap<String, Vec<String>> = BTreeMap::new();
        dialogue.entry(self.participants.a.clone()).or_default();
        dialogue.entry(self.participants.b.clone()).or_default();
        for turn in &self.turns {
            dialogue
                .entry(self.participants.name_of(turn.speaker_slot).to_string())
                .or_default()
                .push(turn.text.clone());
        }
        dialogue
    }
}

/// A transcript after it has been handed to the pinning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedRecord {
    pub content_address: String,
    pub transcript: Transcript,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_address: Option<String>,
}

/// Events emitted by the debate orchestrator, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebateEvent {
    TurnProduced(Turn),
    ConclusionProduced(String),
    Completed,
    Error(String),
}

impl DebateEvent {
    /// True for the events after which the stream ends.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateEvent::Completed | DebateEvent::Error(_))
    }
}

// --- Text generation ---

/// Sampling controls forwarded to the text model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// Who said a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior message of a consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A single text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System-level instruction that steers the model.
    pub steering_instruction: String,
    /// Earlier messages, oldest first. Empty for debate turns.
    pub history: Vec<ChatMessage>,
    /// The user input the model responds to.
    pub input_text: String,
    pub sampling: SamplingParams,
    /// Overrides the adapter's default model.
    pub model: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        steering_instruction: impl Into<String>,
        input_text: impl Into<String>,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            steering_instruction: steering_instruction.into(),
            history: Vec::new(),
            input_text: input_text.into(),
            sampling,
            model: None,
        }
    }
}

/// A generation call whose output must match a JSON schema.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub prompt: String,
    /// Response schema in the OpenAPI subset the model accepts.
    pub schema: serde_json::Value,
}

// --- Speech ---

/// Maps a speaker label in the script to a prebuilt voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAssignment {
    pub speaker: String,
    pub voice: String,
}

/// A text-to-speech call for a multi-speaker script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub script: String,
    pub voices: Vec<VoiceAssignment>,
}

// --- Pinning ---

/// Descriptive metadata stored next to a pinned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMetadata {
    pub name: String,
    pub keyvalues: BTreeMap<String, String>,
}

/// A file to be pinned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub metadata: PinMetadata,
}

/// What the pinning service returned for an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinReceipt {
    pub content_address: String,
    pub gateway_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

// --- Minting ---

/// Result of a mint attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MintOutcome {
    /// The relay accepted the transaction.
    Submitted {
        #[serde(rename = "txHash")]
        tx_hash: String,
    },
    /// No wallet session is connected; nothing was sent.
    Skipped { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gandhi_vs_churchill() -> Transcript {
        Transcript::new(
            "Should education be free?",
            Participants::new("Gandhi", "Churchill"),
        )
    }

    #[test]
    fn slots_alternate_starting_with_a() {
        assert_eq!(SpeakerSlot::for_round(1), SpeakerSlot::A);
        assert_eq!(SpeakerSlot::for_round(2), SpeakerSlot::B);
        assert_eq!(SpeakerSlot::for_round(7), SpeakerSlot::A);
    }

    #[test]
    fn push_turn_derives_slot_and_round() {
        let mut transcript = gandhi_vs_churchill();
        let first = transcript.push_turn("Truth first.").unwrap().clone();
        let second = transcript.push_turn("Never surrender.").unwrap().clone();

        assert_eq!(first.round_number, 1);
        assert_eq!(first.speaker_slot, SpeakerSlot::A);
        assert_eq!(second.round_number, 2);
        assert_eq!(second.speaker_slot, SpeakerSlot::B);
        assert!(transcript.validate().is_ok());
    }

    #[test]
    fn conclusion_is_set_once() {
        let mut transcript = gandhi_vs_churchill();
        transcript.conclude("Both agree on literacy.").unwrap();
        assert!(transcript.conclude("again").is_err());
        assert!(transcript.push_turn("late").is_err());
    }

    #[test]
    fn recent_turns_keeps_newest() {
        let mut transcript = gandhi_vs_churchill();
        for i in 1..=6 {
            transcript.push_turn(format!("turn {i}")).unwrap();
        }
        let recent = transcript.recent_turns(4);
        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].round_number, 3);
        assert_eq!(recent[3].round_number, 6);
        assert_eq!(transcript.recent_turns(10).len(), 6);
    }

    #[test]
    fn validate_rejects_broken_alternation() {
        let mut transcript = gandhi_vs_churchill();
        transcript.turns.push(Turn {
            speaker_slot: SpeakerSlot::B,
            text: "out of order".into(),
            round_number: 1,
        });
        let err = transcript.validate().unwrap_err();
        assert!(err.to_string().contains("slot A"), "got: {err}");
    }

    #[test]
    fn validate_rejects_round_gaps() {
        let mut transcript = gandhi_vs_churchill();
        transcript.push_turn("one").unwrap();
        transcript.turns.push(Turn {
            speaker_slot: SpeakerSlot::B,
            text: "skipped".into(),
            round_number: 3,
        });
        assert!(transcript.validate().is_err());
    }

    #[test]
    fn dialogue_groups_by_speaker() {
        let mut transcript = gandhi_vs_churchill();
        transcript.push_turn("a1").unwrap();
        transcript.push_turn("b1").unwrap();
        transcript.push_turn("a2").unwrap();
        let dialogue = transcript.dialogue();
        assert_eq!(dialogue["Gandhi"], vec!["a1", "a2"]);
        assert_eq!(dialogue["Churchill"], vec!["b1"]);
    }

    #[test]
    fn persona_accepts_legacy_field_names() {
        let json = r#"{"id":"gandhi","name":"Mahatma Gandhi","prompt":"Speak softly.","image":"https://img/1.png"}"#;
        let persona: Persona = serde_json::from_str(json).unwrap();
        assert_eq!(persona.prompt_text, "Speak softly.");
        assert_eq!(persona.portrait_uri, "https://img/1.png");

        let out = serde_json::to_value(&persona).unwrap();
        assert_eq!(out["promptText"], "Speak softly.");
        assert_eq!(out["portraitUri"], "https://img/1.png");
    }

    #[test]
    fn transcript_deserializes_from_camel_case() {
        let json = r#"{
            "topic": "Trade",
            "participants": {"a": "Lincoln", "b": "Nehru"},
            "turns": [{"speakerSlot": "A", "text": "Hi", "roundNumber": 1}]
        }"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.turns.len(), 1);
        assert!(transcript.conclusion.is_none());
        assert!(transcript.validate().is_ok());
    }

    #[test]
    fn mint_outcome_wire_shape() {
        let submitted = MintOutcome::Submitted {
            tx_hash: "0xabc".into(),
        };
        let json = serde_json::to_value(&submitted).unwrap();
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["txHash"], "0xabc");

        let skipped = MintOutcome::Skipped {
            reason: "no wallet session".into(),
        };
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["status"], "skipped");
    }

    #[test]
    fn terminal_events() {
        assert!(DebateEvent::Completed.is_terminal());
        assert!(DebateEvent::Error("x".into()).is_terminal());
        assert!(!DebateEvent::ConclusionProduced("x".into()).is_terminal());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pushed_turns_always_validate(
                texts in proptest::collection::vec("[a-z ]{1,12}", 0..20),
                k in 0usize..25,
            ) {
                let mut transcript = gandhi_vs_churchill();
                for text in &texts {
                    transcript.push_turn(text.as_str()).unwrap();
                }
                prop_assert!(transcript.validate().is_ok());
                prop_assert_eq!(transcript.recent_turns(k).len(), texts.len().min(k));

                let spoken: usize = transcript.dialogue().values().map(Vec::len).sum();
                prop_assert_eq!(spoken, texts.len());
            }
        }
    }
}
