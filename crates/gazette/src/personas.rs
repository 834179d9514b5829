// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gazette personas list`.

use gazette_config::GazetteConfig;
use gazette_core::types::Persona;
use gazette_core::{GazetteError, PersonaRepository};
use gazette_storage::SqlitePersonaStore;

pub async fn list(config: &GazetteConfig) -> Result<(), GazetteError> {
    let store = SqlitePersonaStore::open(&config.storage).await?;
    let personas = store.list().await?;
    if personas.is_empty() {
        println!("no personas stored in {}", config.storage.database_path);
        return Ok(());
    }
    print!("{}", render_table(&personas));
    Ok(())
}

/// One `id  name  portrait` row per persona, id column padded.
fn render_table(personas: &[Persona]) -> String {
    let width = personas.iter().map(|p| p.id.len()).max().unwrap_or(0);
    personas
        .iter()
        .map(|p| {
            let portrait = if p.portrait_uri.is_empty() {
                "-"
            } else {
                p.portrait_uri.as_str()
            };
            format!("{:<width$}  {}  {}\n", p.id, p.name, portrait)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_ids() {
        let personas = vec![
            Persona {
                id: "gandhi".into(),
                name: "Gandhi".into(),
                prompt_text: "x".into(),
                portrait_uri: String::new(),
            },
            Persona {
                id: "lee-kuan-yew".into(),
                name: "Lee Kuan Yew".into(),
                prompt_text: "x".into(),
                portrait_uri: "https://img.test/lky.png".into(),
            },
        ];
        let table = render_table(&personas);
        assert_eq!(
            table,
            "gandhi        Gandhi  -\nlee-kuan-yew  Lee Kuan Yew  https://img.test/lky.png\n"
        );
    }
}
