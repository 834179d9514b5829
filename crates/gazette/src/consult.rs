// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gazette consult`: one question to one stored persona.

use gazette_config::GazetteConfig;
use gazette_core::GazetteError;
use gazette_core::types::{ChatMessage, ChatRole};
use gazette_debate::{ConsultRequest, PersonaRef};

use crate::ConsultArgs;
use crate::serve::build_state;

pub async fn run_consult(config: GazetteConfig, args: ConsultArgs) -> Result<(), GazetteError> {
    let state = build_state(&config).await?;
    let reply = state.consultant.consult(request_for(args)).await?;
    println!("{}", reply.content);
    Ok(())
}

fn request_for(args: ConsultArgs) -> ConsultRequest {
    ConsultRequest {
        persona: PersonaRef::Id(args.persona),
        messages: vec![ChatMessage {
            role: ChatRole::User,
            content: args.question,
        }],
        temperature: args.temperature,
        top_k: None,
        model: None,
        wallet_address: None,
        wallet_balance: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_becomes_the_only_user_message() {
        let request = request_for(ConsultArgs {
            persona: "lincoln".into(),
            question: "Is a house divided doomed?".into(),
            temperature: None,
        });
        assert_eq!(request.persona, PersonaRef::Id("lincoln".into()));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert_eq!(request.temperature, None);
    }
}
