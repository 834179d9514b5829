// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relays a debate stream through a bounded channel.
//!
//! A spawned producer polls the orchestrator and pushes each event into an
//! mpsc channel; the HTTP layer drains the receiver. The sender is dropped
//! exactly once, after a terminal event or when the receiver is gone. A
//! generation call already in flight when the client leaves runs to
//! completion; the producer only notices on its next send.

use futures::stream::{self, BoxStream, Stream, StreamExt};
use gazette_core::types::DebateEvent;
use gazette_core::GazetteError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle to a running relay.
pub struct Relay {
    pub events: mpsc::Receiver<DebateEvent>,
    /// Resolves to the number of delivered events, or
    /// [`GazetteError::ChannelClosedEarly`] if the consumer went away.
    pub producer: JoinHandle<Result<usize, GazetteError>>,
}

/// Spawns the producer task for `events` with a channel of `capacity`.
pub fn spawn_relay(events: BoxStream<'static, DebateEvent>, capacity: usize) -> Relay {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let producer = tokio::spawn(produce(events, tx));
    Relay {
        events: rx,
        producer,
    }
}

async fn produce(
    mut events: BoxStream<'static, DebateEvent>,
    tx: mpsc::Sender<DebateEvent>,
) -> Result<usize, GazetteError> {
    let mut delivered = 0usize;
    while let Some(event) = events.next().await {
        let terminal = event.is_terminal();
        if tx.send(event).await.is_err() {
            let err = GazetteError::ChannelClosedEarly { delivered };
            warn!(error = %err, "debate consumer disconnected");
            return Err(err);
        }
        delivered += 1;
        if terminal {
            break;
        }
    }
    debug!(delivered, "debate relay finished");
    Ok(delivered)
}

/// Adapts a receiver into a stream that ends when the sender is dropped.
pub fn receiver_stream(rx: mpsc::Receiver<DebateEvent>) -> impl Stream<Item = DebateEvent> + Send {
    stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((event, rx))
    })
}
