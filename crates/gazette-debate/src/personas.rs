// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Creates personas from a bare name.

use std::sync::Arc;

use gazette_core::traits::{PersonaRepository, PortraitGenerator, TextGenerator};
use gazette_core::types::{GenerationRequest, Persona, StructuredRequest};
use gazette_core::GazetteError;
use serde::Deserialize;
use tracing::{debug, info};

use crate::prompts;

/// The structured reply to a character-card prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterCard {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub prompt: String,
}

/// Lowercase, dash-separated id derived from a name.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Clone)]
pub struct PersonaGenerator {
    text: Arc<dyn TextGenerator>,
    portraits: Arc<dyn PortraitGenerator>,
    store: Arc<dyn PersonaRepository>,
}

impl PersonaGenerator {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        portraits: Arc<dyn PortraitGenerator>,
        store: Arc<dyn PersonaRepository>,
    ) -> Self {
        Self {
            text,
            portraits,
            store,
        }
    }

    /// Character card, then portrait prompt, then portrait, then append.
    ///
    /// Nothing is stored unless every step succeeds.
    pub async fn generate(&self, name: &str) -> Result<Persona, GazetteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GazetteError::InvalidRequest("name is required".into()));
        }

        let value = self
            .text
            .generate_structured(StructuredRequest {
                prompt: prompts::character_card_prompt(name),
                schema: prompts::character_card_schema(),
            })
            .await?;
        let card: CharacterCard =
            serde_json::from_value(value).map_err(|e| GazetteError::GenerationFailed {
                message: format!("character card did not match schema: {e}"),
                source: Some(Box::new(e)),
            })?;
        let id = match slugify(&card.id) {
            id if id.is_empty() => slugify(name),
            id => id,
        };
        debug!(id = %id, "character card generated");

        let image_prompt = self
            .text
            .generate(GenerationRequest::new(
                prompts::image_prompt_instruction(name),
                prompts::image_prompt_request(name),
                prompts::IMAGE_PROMPT_SAMPLING,
            ))
            .await?;
        let portrait_uri = self.portraits.render(&image_prompt).await?;

        let persona = Persona {
            id,
            name: card.name,
            prompt_text: card.prompt,
            portrait_uri,
        };
        self.store.append(&persona).await?;
        info!(id = %persona.id, name = %persona.name, "persona generated");
        Ok(persona)
    }
}
