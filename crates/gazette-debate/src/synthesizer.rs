// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a transcript into a two-voice podcast WAV file.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use gazette_config::GazetteConfig;
use gazette_core::traits::{PinningService, SpeechSynthesizer};
use gazette_core::types::{PinMetadata, PinRequest, SpeechRequest, Transcript, VoiceAssignment};
use gazette_core::GazetteError;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::archiver::pin_keyvalues;
use crate::prompts;

/// Audio format and voice settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastSettings {
    pub voice_a: String,
    pub voice_b: String,
    pub sample_rate: u32,
    pub channels: u16,
    /// Bytes per sample in the PCM returned by the speech service.
    pub sample_width: u16,
    pub public_dir: PathBuf,
    pub publish_audio: bool,
}

impl PodcastSettings {
    pub fn from_config(config: &GazetteConfig) -> Self {
        Self {
            voice_a: config.podcast.voice_a.clone(),
            voice_b: config.podcast.voice_b.clone(),
            sample_rate: config.podcast.sample_rate,
            channels: config.podcast.channels,
            sample_width: config.podcast.sample_width,
            public_dir: PathBuf::from(&config.server.public_dir),
            publish_audio: config.podcast.publish_audio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastReceipt {
    pub file_name: String,
    /// Path under which the gateway serves the file.
    pub public_url: String,
    /// Size of the raw PCM returned by the speech service.
    pub audio_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_url: Option<String>,
}

#[derive(Clone)]
pub struct AudioSynthesizer {
    speech: Arc<dyn SpeechSynthesizer>,
    pinner: Option<Arc<dyn PinningService>>,
    settings: PodcastSettings,
}

impl AudioSynthesizer {
    pub fn new(
        speech: Arc<dyn SpeechSynthesizer>,
        pinner: Option<Arc<dyn PinningService>>,
        settings: PodcastSettings,
    ) -> Self {
        Self {
            speech,
            pinner,
            settings,
        }
    }

    pub fn settings(&self) -> &PodcastSettings {
        &self.settings
    }

    /// Synthesizes, writes the WAV under the public directory and, when
    /// enabled, pins it. A failed pin is logged and leaves the receipt
    /// without a content address.
    pub async fn synthesize(
        &self,
        transcript: &Transcript,
    ) -> Result<PodcastReceipt, GazetteError> {
        transcript.validate()?;
        let a = &transcript.participants.a;
        let b = &transcript.participants.b;
        let script = prompts::podcast_script(transcript);
        debug!(chars = script.len(), "podcast script built");

        let pcm = self
            .speech
            .synthesize(SpeechRequest {
                script: prompts::podcast_tts_prompt(&script, a, b),
                voices: vec![
                    VoiceAssignment {
                        speaker: a.clone(),
                        voice: self.settings.voice_a.clone(),
                    },
                    VoiceAssignment {
                        speaker: b.clone(),
                        voice: self.settings.voice_b.clone(),
                    },
                ],
            })
            .await?;
        if pcm.is_empty() {
            return Err(synthesis_err("speech service returned no audio"));
        }

        let wav = encode_wav(&pcm, &self.settings)?;
        let now = Utc::now();
        let file_name = format!("debate-podcast-{}.wav", now.timestamp_millis());
        tokio::fs::create_dir_all(&self.settings.public_dir)
            .await
            .map_err(|e| synthesis_io_err("failed to create public directory", e))?;
        let path = self.settings.public_dir.join(&file_name);
        tokio::fs::write(&path, &wav)
            .await
            .map_err(|e| synthesis_io_err("failed to write WAV file", e))?;
        info!(path = %path.display(), pcm_bytes = pcm.len(), "podcast written");

        let mut receipt = PodcastReceipt {
            public_url: format!("/{file_name}"),
            file_name,
            audio_size: pcm.len(),
            content_address: None,
            gateway_url: None,
        };

        if self.settings.publish_audio {
            if let Some(pinner) = &self.pinner {
                let request = PinRequest {
                    file_name: crate::archiver::artifact_file_name(
                        "debate-podcast",
                        &transcript.participants,
                        now,
                        "wav",
                    ),
                    content_type: "audio/wav".into(),
                    bytes: wav,
                    metadata: PinMetadata {
                        name: format!("Podcast: {}", transcript.topic),
                        keyvalues: {
                            let mut kv = pin_keyvalues("debate-podcast", transcript, now);
                            kv.insert("format".into(), "wav".into());
                            kv
                        },
                    },
                };
                match pinner.pin(request).await {
                    Ok(pinned) => {
                        info!(content_address = %pinned.content_address, "podcast pinned");
                        receipt.content_address = Some(pinned.content_address);
                        receipt.gateway_url = Some(pinned.gateway_url);
                    }
                    Err(e) => warn!(error = %e, "podcast pinning failed, keeping local file only"),
                }
            }
        }

        Ok(receipt)
    }
}

fn synthesis_err(message: impl Into<String>) -> GazetteError {
    GazetteError::SynthesisFailed {
        message: message.into(),
        source: None,
    }
}

fn synthesis_io_err(message: &str, e: std::io::Error) -> GazetteError {
    GazetteError::SynthesisFailed {
        message: format!("{message}: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Wraps little-endian PCM in a WAV container.
///
/// 8-bit input is unsigned as in WAV itself; wider samples are signed. A
/// trailing partial sample is dropped.
pub fn encode_wav(pcm: &[u8], settings: &PodcastSettings) -> Result<Vec<u8>, GazetteError> {
    let width = settings.sample_width as usize;
    if !(1..=4).contains(&width) {
        return Err(synthesis_err(format!("unsupported sample width {width}")));
    }
    let spec = hound::WavSpec {
        channels: settings.channels,
        sample_rate: settings.sample_rate,
        bits_per_sample: settings.sample_width * 8,
        sample_format: hound::SampleFormat::Int,
    };
    let wav_err = |e: hound::Error| GazetteError::SynthesisFailed {
        message: format!("failed to encode WAV: {e}"),
        source: Some(Box::new(e)),
    };

    let mut cursor = Cursor::new(Vec::with_capacity(pcm.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(wav_err)?;
        for chunk in pcm.chunks_exact(width) {
            let written = match width {
                1 => writer.write_sample((chunk[0] as i16 - 128) as i8),
                2 => writer.write_sample(i16::from_le_bytes([chunk[0], chunk[1]])),
                3 => {
                    writer.write_sample(i32::from_le_bytes([0, chunk[0], chunk[1], chunk[2]]) >> 8)
                }
                _ => writer.write_sample(i32::from_le_bytes([
                    chunk[0], chunk[1], chunk[2], chunk[3],
                ])),
            };
            written.map_err(wav_err)?;
        }
        writer.finalize().map_err(wav_err)?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(dir: PathBuf) -> PodcastSettings {
        let mut config = GazetteConfig::default();
        config.server.public_dir = dir.display().to_string();
        PodcastSettings::from_config(&config)
    }

    #[test]
    fn wav_header_matches_settings() {
        let pcm: Vec<u8> = [0i16, 1000, -1000, i16::MAX]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let wav = encode_wav(&pcm, &settings(PathBuf::from("public"))).unwrap();

        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 24000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![0, 1000, -1000, i16::MAX]);
    }

    #[test]
    fn odd_trailing_byte_is_dropped() {
        let wav = encode_wav(&[1, 0, 7], &settings(PathBuf::from("public"))).unwrap();
        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn zero_sample_width_is_rejected() {
        let mut settings = settings(PathBuf::from("public"));
        settings.sample_width = 0;
        assert!(matches!(
            encode_wav(&[0, 0], &settings),
            Err(GazetteError::SynthesisFailed { .. })
        ));
    }
}
