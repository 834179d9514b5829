// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gazette debate`: runs one debate against the configured services and
//! prints it as it happens.

use futures::StreamExt;
use gazette_config::GazetteConfig;
use gazette_core::types::{DebateEvent, MintOutcome, Participants};
use gazette_core::GazetteError;
use gazette_debate::{DebateSetup, PersonaRef, collect_transcript};
use tracing::info;

use crate::DebateArgs;
use crate::serve::build_state;

pub async fn run_debate(config: GazetteConfig, args: DebateArgs) -> Result<(), GazetteError> {
    let state = build_state(&config).await?;

    let rounds = state.orchestrator.policy().resolve_rounds(args.rounds)?;
    let persona_a = PersonaRef::Id(args.persona_a)
        .resolve(state.personas.as_ref())
        .await?;
    let persona_b = PersonaRef::Id(args.persona_b)
        .resolve(state.personas.as_ref())
        .await?;
    let setup = DebateSetup::new(args.topic, persona_a, persona_b, rounds)?;
    let participants = setup.participants();
    let topic = setup.topic.clone();

    println!("{topic}\n{} vs {}\n", participants.a, participants.b);

    let printer = participants.clone();
    let events = state
        .orchestrator
        .run(setup)
        .inspect(move |event| {
            if let Some(line) = render_event(event, &printer) {
                println!("{line}");
            }
        })
        .boxed();
    let transcript = collect_transcript(topic, participants, events).await?;

    if !args.publish {
        return Ok(());
    }

    let publisher = state.publisher.as_ref().ok_or_else(|| {
        GazetteError::Config("pinning is not configured; cannot publish".into())
    })?;
    let outcome = publisher.publish(transcript).await?;
    println!("archived: {}", outcome.archive.gateway_url);
    if let Some(podcast) = &outcome.podcast {
        println!("podcast:  {}", podcast.file_name);
    }
    for warning in &outcome.warnings {
        println!("warning:  {warning}");
    }

    match state.minter.mint(&outcome.record.content_address).await? {
        MintOutcome::Submitted { tx_hash } => {
            info!(tx_hash = %tx_hash, "mint submitted");
            println!("minted:   {tx_hash}");
        }
        MintOutcome::Skipped { reason } => println!("mint skipped: {reason}"),
    }
    Ok(())
}

/// Terminal rendering of one event; `None` for the completion marker.
fn render_event(event: &DebateEvent, participants: &Participants) -> Option<String> {
    match event {
        DebateEvent::TurnProduced(turn) => Some(format!(
            "[{}] {}: {}\n",
            turn.round_number,
            participants.name_of(turn.speaker_slot),
            turn.text
        )),
        DebateEvent::ConclusionProduced(text) => Some(format!("Moderator: {text}")),
        DebateEvent::Completed => None,
        DebateEvent::Error(detail) => Some(format!("debate stopped: {detail}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::types::{SpeakerSlot, Turn};

    #[test]
    fn turns_are_labelled_with_round_and_speaker() {
        let participants = Participants::new("Gandhi", "Churchill");
        let event = DebateEvent::TurnProduced(Turn {
            speaker_slot: SpeakerSlot::B,
            text: "Never give in.".into(),
            round_number: 2,
        });
        assert_eq!(
            render_event(&event, &participants).as_deref(),
            Some("[2] Churchill: Never give in.\n")
        );
        assert_eq!(render_event(&DebateEvent::Completed, &participants), None);
    }
}
