// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Archive plus podcast in one call.
//!
//! The archive is required; the podcast is best effort. A synthesis failure
//! becomes a warning on an otherwise successful result.

use gazette_core::types::{ArchivedRecord, Transcript};
use gazette_core::GazetteError;
use serde::Serialize;
use tracing::warn;

use crate::archiver::{ArchiveReceipt, TranscriptArchiver};
use crate::synthesizer::{AudioSynthesizer, PodcastReceipt};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub record: ArchivedRecord,
    pub archive: ArchiveReceipt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast: Option<PodcastReceipt>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct Publisher {
    archiver: TranscriptArchiver,
    synthesizer: AudioSynthesizer,
}

impl Publisher {
    pub fn new(archiver: TranscriptArchiver, synthesizer: AudioSynthesizer) -> Self {
        Self {
            archiver,
            synthesizer,
        }
    }

    /// Archives and synthesizes `transcript`, which is consumed so a value
    /// can only become one record.
    ///
    /// The record's audio address is the pinned WAV's content address when
    /// there is one, otherwise the public URL of the local file.
    pub async fn publish(&self, transcript: Transcript) -> Result<PublishOutcome, GazetteError> {
        let archive = self.archiver.archive(&transcript).await?;

        let mut warnings = Vec::new();
        let podcast = match self.synthesizer.synthesize(&transcript).await {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                warn!(
                    content_address = %archive.content_address,
                    error = %e,
                    "podcast synthesis failed after archiving"
                );
                warnings.push(format!("audio synthesis failed: {e}"));
                None
            }
        };

        let audio_address = podcast
            .as_ref()
            .map(|p| p.content_address.clone().unwrap_or_else(|| p.public_url.clone()));

        Ok(PublishOutcome {
            record: ArchivedRecord {
                content_address: archive.content_address.clone(),
                transcript,
                audio_address,
            },
            archive,
            podcast,
            warnings,
        })
    }
}
