// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events for POST /api/debate and POST /api/consult.
//!
//! Each debate event becomes one `data:` frame carrying a JSON object:
//! ```text
//! data: {"type":"message","speaker":"bot1","speakerName":"Gandhi","content":"...","round":1}
//!
//! data: {"type":"conclusion","content":"..."}
//!
//! data: {"type":"complete"}
//! ```
//!
//! A consultation streams its reply the same way:
//! ```text
//! data: {"type":"chunk","content":"Be the "}
//!
//! data: {"type":"chunk","content":"change."}
//!
//! data: {"type":"done","personaId":"gandhi"}
//! ```
//!
//! Requests are validated before the stream opens, so a bad topic or an
//! unknown persona is a plain JSON error, not an SSE frame.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream, StreamExt};
use gazette_core::TextStream;
use gazette_core::types::{DebateEvent, Participants, SpeakerSlot};
use gazette_debate::prompts::{CONSULT_ERROR_MESSAGE, DEBATE_ERROR_MESSAGE};
use gazette_debate::{ConsultRequest, DebateSetup, PersonaRef, receiver_stream, spawn_relay};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, JsonBody};
use crate::server::GatewayState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateRequest {
    pub topic: String,
    #[serde(alias = "leader1")]
    pub persona_a: PersonaRef,
    #[serde(alias = "leader2")]
    pub persona_b: PersonaRef,
    #[serde(default)]
    pub rounds: Option<u32>,
}

/// JSON carried in each SSE frame.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DebateFrame<'a> {
    Message {
        speaker: &'static str,
        #[serde(rename = "speakerName")]
        speaker_name: &'a str,
        content: &'a str,
        round: u32,
    },
    Conclusion {
        content: &'a str,
    },
    Complete,
    Error {
        message: &'a str,
    },
}

/// Wire name of a slot; the browser client keys its layout on these.
fn speaker_tag(slot: SpeakerSlot) -> &'static str {
    match slot {
        SpeakerSlot::A => "bot1",
        SpeakerSlot::B => "bot2",
    }
}

/// Builds the frame for one event. Error details stay in the log.
pub fn frame_for<'a>(event: &'a DebateEvent, participants: &'a Participants) -> DebateFrame<'a> {
    match event {
        DebateEvent::TurnProduced(turn) => DebateFrame::Message {
            speaker: speaker_tag(turn.speaker_slot),
            speaker_name: participants.name_of(turn.speaker_slot),
            content: &turn.text,
            round: turn.round_number,
        },
        DebateEvent::ConclusionProduced(text) => DebateFrame::Conclusion { content: text },
        DebateEvent::Completed => DebateFrame::Complete,
        DebateEvent::Error(detail) => {
            tracing::warn!(error = %detail, "debate ended with an error");
            DebateFrame::Error {
                message: DEBATE_ERROR_MESSAGE,
            }
        }
    }
}

/// Encodes a frame; if that fails, an error frame carrying `fallback`.
fn encode_frame(frame: &impl Serialize, fallback: &str) -> Event {
    match Event::default().json_data(frame) {
        Ok(sse) => sse,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode SSE frame");
            Event::default().data(format!(r#"{{"type":"error","message":"{fallback}"}}"#))
        }
    }
}

fn to_sse_event(event: &DebateEvent, participants: &Participants) -> Event {
    encode_frame(&frame_for(event, participants), DEBATE_ERROR_MESSAGE)
}

/// POST /api/debate
///
/// Resolves both personas, starts the producer task and streams its events.
pub async fn stream_debate(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody<DebateRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let rounds = state.orchestrator.policy().resolve_rounds(body.rounds)?;
    let persona_a = body.persona_a.resolve(state.personas.as_ref()).await?;
    let persona_b = body.persona_b.resolve(state.personas.as_ref()).await?;
    let setup = DebateSetup::new(body.topic, persona_a, persona_b, rounds)?;
    let participants = setup.participants();
    let debate_id = uuid::Uuid::new_v4().to_string();

    tracing::debug!(
        debate_id = %debate_id,
        persona_a = %setup.persona_a.id,
        persona_b = %setup.persona_b.id,
        buffer = state.event_buffer,
        "opening debate stream"
    );

    let relay = spawn_relay(state.orchestrator.run(setup), state.event_buffer);
    let producer = relay.producer;
    tokio::spawn(async move {
        if let Err(e) = producer.await {
            tracing::error!(debate_id = %debate_id, error = %e, "debate producer task panicked");
        }
    });

    let stream = receiver_stream(relay.events)
        .map(move |event| Ok::<_, Infallible>(to_sse_event(&event, &participants)));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// JSON carried in each consultation frame.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConsultFrame {
    Chunk {
        content: String,
    },
    Done {
        #[serde(rename = "personaId")]
        persona_id: String,
    },
    Error {
        message: &'static str,
    },
}

/// Frames for one streamed reply: a chunk per item, then `done`. The first
/// failed item becomes an `error` frame and ends the stream.
pub fn consult_frames(
    persona_id: String,
    chunks: TextStream,
) -> impl Stream<Item = ConsultFrame> + Send {
    stream::unfold(Some(chunks), move |state| {
        let persona_id = persona_id.clone();
        async move {
            let mut chunks = state?;
            match chunks.next().await {
                Some(Ok(content)) => Some((ConsultFrame::Chunk { content }, Some(chunks))),
                Some(Err(e)) => {
                    tracing::warn!(persona_id = %persona_id, error = %e, "consultation aborted");
                    Some((
                        ConsultFrame::Error {
                            message: CONSULT_ERROR_MESSAGE,
                        },
                        None,
                    ))
                }
                None => Some((ConsultFrame::Done { persona_id }, None)),
            }
        }
    })
}

/// POST /api/consult
///
/// Validates the request and resolves the persona, then streams the reply.
pub async fn stream_consultation(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody<ConsultRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let reply = state.consultant.consult_stream(body).await?;
    tracing::debug!(persona_id = %reply.persona_id, "opening consultation stream");

    let stream = consult_frames(reply.persona_id, reply.chunks)
        .map(|frame| Ok::<_, Infallible>(encode_frame(&frame, CONSULT_ERROR_MESSAGE)));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
