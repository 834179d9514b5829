// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializes finished transcripts and pins them.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use gazette_core::traits::PinningService;
use gazette_core::types::{Participants, PinMetadata, PinRequest, Transcript};
use gazette_core::GazetteError;
use serde::Serialize;
use tracing::info;

pub const FORMAT_VERSION: &str = "1.0";

/// The pinned JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveDocument {
    pub metadata: ArchiveMetadata,
    pub dialogue: BTreeMap<String, Vec<String>>,
    pub conclusion: Option<String>,
    pub format_version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveMetadata {
    pub topic: String,
    pub participants: [String; 2],
    pub timestamp: String,
    pub total_messages: usize,
}

impl ArchiveDocument {
    pub fn new(transcript: &Transcript, at: DateTime<Utc>) -> Self {
        Self {
            metadata: ArchiveMetadata {
                topic: transcript.topic.clone(),
                participants: [
                    transcript.participants.a.clone(),
                    transcript.participants.b.clone(),
                ],
                timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
                total_messages: transcript.turns.len(),
            },
            dialogue: transcript.dialogue(),
            conclusion: transcript.conclusion.clone(),
            format_version: FORMAT_VERSION,
        }
    }
}

/// What an archive call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveReceipt {
    pub content_address: String,
    pub gateway_url: String,
    pub file_name: String,
    /// Size of the pinned document in bytes.
    pub size: usize,
}

/// `{prefix}-{a}-vs-{b}-{millis}.{ext}` with whitespace runs turned into `-`.
pub fn artifact_file_name(
    prefix: &str,
    participants: &Participants,
    at: DateTime<Utc>,
    ext: &str,
) -> String {
    let pair = format!("{}-vs-{}", participants.a, participants.b);
    let pair = pair.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{prefix}-{pair}-{}.{ext}", at.timestamp_millis())
}

/// Key-values attached to every pinned debate artifact.
pub fn pin_keyvalues(
    kind: &str,
    transcript: &Transcript,
    at: DateTime<Utc>,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("type".to_string(), kind.to_string()),
        (
            "participants".to_string(),
            format!("{}, {}", transcript.participants.a, transcript.participants.b),
        ),
        ("topic".to_string(), transcript.topic.clone()),
        ("date".to_string(), at.format("%Y-%m-%d").to_string()),
    ])
}

#[derive(Clone)]
pub struct TranscriptArchiver {
    pinner: Arc<dyn PinningService>,
}

impl TranscriptArchiver {
    pub fn new(pinner: Arc<dyn PinningService>) -> Self {
        Self { pinner }
    }

    /// Pins `transcript` as a JSON document. No deduplication: every call
    /// uploads a new file.
    pub async fn archive(&self, transcript: &Transcript) -> Result<ArchiveReceipt, GazetteError> {
        transcript.validate()?;
        let now = Utc::now();
        let document = ArchiveDocument::new(transcript, now);
        let bytes = serde_json::to_vec_pretty(&document).map_err(|e| GazetteError::ArchiveFailed {
            message: format!("failed to serialize transcript: {e}"),
            source: Some(Box::new(e)),
        })?;
        let size = bytes.len();
        let file_name = artifact_file_name("debate", &transcript.participants, now, "json");

        let receipt = self
            .pinner
            .pin(PinRequest {
                file_name: file_name.clone(),
                content_type: "application/json".into(),
                bytes,
                metadata: PinMetadata {
                    name: format!("Debate: {}", transcript.topic),
                    keyvalues: pin_keyvalues("debate-transcript", transcript, now),
                },
            })
            .await?;

        info!(
            file = %file_name,
            size,
            content_address = %receipt.content_address,
            "transcript archived"
        );
        Ok(ArchiveReceipt {
            content_address: receipt.content_address,
            gateway_url: receipt.gateway_url,
            file_name,
            size,
        })
    }
}
