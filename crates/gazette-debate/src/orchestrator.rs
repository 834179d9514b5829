// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The debate round loop.
//!
//! [`DebateOrchestrator::run`] returns a lazy stream: nothing is generated
//! until the stream is polled, and each round's generation call completes
//! before the next one starts. The stream is a small state machine driven
//! by [`futures::stream::unfold`]:
//!
//! ```text
//! Rounds(r) --turn--> Rounds(r+1) ... --> Conclusion --> Completing --> Finished
//!     \______________________ error ______________________/
//! ```

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use gazette_core::traits::{PersonaRepository, TextGenerator};
use gazette_core::types::{
    DebateEvent, GenerationRequest, Participants, Persona, SpeakerSlot, Transcript,
};
use gazette_core::GazetteError;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::policy::DebatePolicy;
use crate::prompts;

/// A persona given either by store id or inline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PersonaRef {
    Id(String),
    Inline(Persona),
}

impl PersonaRef {
    pub async fn resolve(self, store: &dyn PersonaRepository) -> Result<Persona, GazetteError> {
        match self {
            PersonaRef::Inline(persona) => Ok(persona),
            PersonaRef::Id(id) => store
                .get(&id)
                .await?
                .ok_or(GazetteError::PersonaNotFound(id)),
        }
    }
}

/// A validated debate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateSetup {
    pub topic: String,
    pub persona_a: Persona,
    pub persona_b: Persona,
    pub max_rounds: u32,
}

impl DebateSetup {
    /// Rejects an empty topic and a persona debating itself.
    ///
    /// Display names key the dialogue and the speaker voices, so two
    /// personas sharing a name are rejected as well.
    pub fn new(
        topic: impl Into<String>,
        persona_a: Persona,
        persona_b: Persona,
        max_rounds: u32,
    ) -> Result<Self, GazetteError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(GazetteError::InvalidRequest("Topic is required".into()));
        }
        if persona_a.id == persona_b.id {
            return Err(GazetteError::InvalidRequest(format!(
                "a persona cannot debate itself: {}",
                persona_a.id
            )));
        }
        if persona_a.name.trim().eq_ignore_ascii_case(persona_b.name.trim()) {
            return Err(GazetteError::InvalidRequest(format!(
                "both personas are named {}",
                persona_a.name.trim()
            )));
        }
        Ok(Self {
            topic: topic.trim().to_string(),
            persona_a,
            persona_b,
            max_rounds,
        })
    }

    pub fn participants(&self) -> Participants {
        Participants::new(self.persona_a.name.clone(), self.persona_b.name.clone())
    }

    fn persona(&self, slot: SpeakerSlot) -> &Persona {
        match slot {
            SpeakerSlot::A => &self.persona_a,
            SpeakerSlot::B => &self.persona_b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Rounds,
    Conclusion,
    Completing,
    Finished,
}

struct RunState {
    generator: Arc<dyn TextGenerator>,
    policy: DebatePolicy,
    setup: DebateSetup,
    transcript: Transcript,
    phase: Phase,
}

impl RunState {
    async fn next_event(&mut self) -> Option<DebateEvent> {
        loop {
            match self.phase {
                Phase::Rounds => {
                    if self.transcript.turns.len() as u32 >= self.setup.max_rounds {
                        self.phase = Phase::Conclusion;
                        continue;
                    }
                    return Some(self.play_round().await);
                }
                Phase::Conclusion => return Some(self.conclude().await),
                Phase::Completing => {
                    self.phase = Phase::Finished;
                    info!(
                        topic = %self.setup.topic,
                        rounds = self.transcript.turns.len(),
                        "debate completed"
                    );
                    return Some(DebateEvent::Completed);
                }
                Phase::Finished => return None,
            }
        }
    }

    async fn play_round(&mut self) -> DebateEvent {
        let round = self.transcript.next_round();
        if round > 1 && !self.policy.turn_delay.is_zero() {
            tokio::time::sleep(self.policy.turn_delay).await;
        }

        let slot = SpeakerSlot::for_round(round);
        let persona = self.setup.persona(slot);
        let request = GenerationRequest::new(
            prompts::debate_instruction(slot, &self.setup.topic, &persona.prompt_text),
            prompts::turn_context(&self.transcript, self.policy.context_window),
            self.policy.turn_sampling,
        );
        debug!(round, speaker = %persona.name, "requesting turn");

        let text = match self.generator.generate(request).await {
            Ok(text) => text,
            Err(e) => return self.fail(round, e),
        };
        match self.transcript.push_turn(text).cloned() {
            Ok(turn) => {
                info!(round, slot = %turn.speaker_slot, chars = turn.text.len(), "turn produced");
                DebateEvent::TurnProduced(turn)
            }
            Err(e) => self.fail(round, e),
        }
    }

    async fn conclude(&mut self) -> DebateEvent {
        let request = GenerationRequest::new(
            prompts::MODERATOR_INSTRUCTION,
            prompts::conclusion_prompt(&self.transcript),
            self.policy.conclusion_sampling,
        );
        let round = self.transcript.next_round();

        match self.generator.generate(request).await {
            Ok(text) => match self.transcript.conclude(text.clone()) {
                Ok(()) => {
                    self.phase = Phase::Completing;
                    DebateEvent::ConclusionProduced(text)
                }
                Err(e) => self.fail(round, e),
            },
            Err(e) => self.fail(round, e),
        }
    }

    fn fail(&mut self, round: u32, error: GazetteError) -> DebateEvent {
        warn!(round, topic = %self.setup.topic, error = %error, "debate aborted");
        self.phase = Phase::Finished;
        DebateEvent::Error(error.to_string())
    }
}

/// Runs debates against a text generator.
#[derive(Clone)]
pub struct DebateOrchestrator {
    generator: Arc<dyn TextGenerator>,
    policy: DebatePolicy,
}

impl DebateOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: DebatePolicy) -> Self {
        Self { generator, policy }
    }

    pub fn policy(&self) -> &DebatePolicy {
        &self.policy
    }

    /// Event stream for one debate: `max_rounds` turns, a conclusion and a
    /// completion, or everything up to the first failure followed by
    /// [`DebateEvent::Error`].
    pub fn run(&self, setup: DebateSetup) -> BoxStream<'static, DebateEvent> {
        info!(
            topic = %setup.topic,
            a = %setup.persona_a.name,
            b = %setup.persona_b.name,
            rounds = setup.max_rounds,
            "debate started"
        );
        let state = RunState {
            generator: Arc::clone(&self.generator),
            policy: self.policy.clone(),
            transcript: Transcript::new(setup.topic.clone(), setup.participants()),
            setup,
            phase: Phase::Rounds,
        };

        stream::unfold(state, |mut state| async move {
            let event = state.next_event().await?;
            Some((event, state))
        })
        .boxed()
    }

    /// Drives a debate to the end and returns its transcript.
    pub async fn run_to_transcript(&self, setup: DebateSetup) -> Result<Transcript, GazetteError> {
        let participants = setup.participants();
        let topic = setup.topic.clone();
        collect_transcript(topic, participants, self.run(setup)).await
    }
}

/// Rebuilds a transcript from an event stream.
///
/// Fails with [`GazetteError::GenerationFailed`] when the stream ends in an
/// error or stops before [`DebateEvent::Completed`].
pub async fn collect_transcript(
    topic: String,
    participants: Participants,
    mut events: BoxStream<'static, DebateEvent>,
) -> Result<Transcript, GazetteError> {
    let mut transcript = Transcript::new(topic, participants);
    while let Some(event) = events.next().await {
        match event {
            DebateEvent::TurnProduced(turn) => {
                transcript.push_turn(turn.text)?;
            }
            DebateEvent::ConclusionProduced(text) => transcript.conclude(text)?,
            DebateEvent::Completed => return Ok(transcript),
            DebateEvent::Error(message) => {
                return Err(GazetteError::GenerationFailed {
                    message,
                    source: None,
                });
            }
        }
    }
    Err(GazetteError::GenerationFailed {
        message: "debate stream ended before completion".into(),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use async_trait::async_trait;
    use gazette_core::traits::PluginAdapter;
    use gazette_core::types::{AdapterType, HealthStatus, StructuredRequest};
    use tracing_test::traced_test;

    /// Replays canned replies and records every request.
    struct Scripted {
        replies: Mutex<VecDeque<Result<String, String>>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PluginAdapter for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::TextGeneration
        }
        async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
            Ok(HealthStatus::Healthy)
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, request: GenerationRequest) -> Result<String, GazetteError> {
            self.seen.lock().unwrap().push(request);
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(GazetteError::GenerationFailed {
                    message,
                    source: None,
                }),
                None => Err(GazetteError::GenerationFailed {
                    message: "no scripted reply left".into(),
                    source: None,
                }),
            }
        }

        async fn generate_structured(
            &self,
            _request: StructuredRequest,
        ) -> Result<serde_json::Value, GazetteError> {
            unreachable!("debates never ask for structured output")
        }
    }

    fn persona(id: &str, name: &str) -> Persona {
        Persona {
            id: id.into(),
            name: name.into(),
            prompt_text: format!("You are {name}."),
            portrait_uri: String::new(),
        }
    }

    fn setup(rounds: u32) -> DebateSetup {
        DebateSetup::new(
            "Should education be free?",
            persona("gandhi", "Gandhi"),
            persona("churchill", "Churchill"),
            rounds,
        )
        .unwrap()
    }

    #[test]
    fn setup_rejects_self_debate_and_empty_topic() {
        let gandhi = persona("gandhi", "Gandhi");
        assert!(matches!(
            DebateSetup::new("x", gandhi.clone(), gandhi.clone(), 2),
            Err(GazetteError::InvalidRequest(_))
        ));
        assert!(matches!(
            DebateSetup::new("  ", gandhi, persona("churchill", "Churchill"), 2),
            Err(GazetteError::InvalidRequest(_))
        ));
    }

    #[test]
    fn setup_rejects_shared_display_names() {
        let err = DebateSetup::new(
            "Empire",
            persona("napoleon-1", "Napoleon"),
            persona("napoleon-2", " napoleon "),
            2,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            GazetteError::InvalidRequest("both personas are named Napoleon".into()).to_string()
        );
    }

    #[tokio::test]
    async fn zero_rounds_only_concludes() {
        let generator = Scripted::new(vec![Ok("Nothing was said.")]);
        let orchestrator =
            DebateOrchestrator::new(generator.clone(), DebatePolicy::default().without_delay());
        let events: Vec<_> = orchestrator.run(setup(0)).collect().await;
        assert_eq!(
            events,
            vec![
                DebateEvent::ConclusionProduced("Nothing was said.".into()),
                DebateEvent::Completed
            ]
        );
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].steering_instruction, prompts::MODERATOR_INSTRUCTION);
    }

    #[tokio::test]
    async fn conclusion_uses_moderator_sampling() {
        let generator = Scripted::new(vec![Ok("t1"), Ok("t2"), Ok("done")]);
        let policy = DebatePolicy::default().without_delay();
        let orchestrator = DebateOrchestrator::new(generator.clone(), policy.clone());
        let transcript = orchestrator.run_to_transcript(setup(2)).await.unwrap();

        assert_eq!(transcript.conclusion.as_deref(), Some("done"));
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].sampling, policy.turn_sampling);
        assert_eq!(seen[2].sampling, policy.conclusion_sampling);
        assert!(seen[2].input_text.contains("Gandhi: t1\nChurchill: t2"));
    }

    #[tokio::test]
    async fn stream_is_lazy() {
        let generator = Scripted::new(vec![]);
        let orchestrator = DebateOrchestrator::new(generator.clone(), DebatePolicy::default());
        let _events = orchestrator.run(setup(3));
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn failure_ends_stream_without_completion() {
        let generator = Scripted::new(vec![Err("quota exhausted")]);
        let orchestrator =
            DebateOrchestrator::new(generator, DebatePolicy::default().without_delay());
        let events: Vec<_> = orchestrator.run(setup(4)).collect().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], DebateEvent::Error(m) if m.contains("quota exhausted")));
        assert!(logs_contain("debate aborted"));
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_applies_between_turns_only() {
        let generator = Scripted::new(vec![Ok("t1"), Ok("t2"), Ok("c")]);
        let orchestrator = DebateOrchestrator::new(generator, DebatePolicy::default());
        let started = tokio::time::Instant::now();
        let events: Vec<_> = orchestrator.run(setup(2)).collect().await;
        assert_eq!(events.len(), 4);
        assert_eq!(started.elapsed(), std::time::Duration::from_millis(800));
    }
}
