// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt and script builders.
//!
//! Every string sent to a model is assembled here so the wording lives in
//! one place and can be tested without a network.

use gazette_core::types::{SamplingParams, SpeakerSlot, Transcript, Turn};

/// Message sent to debate clients when generation fails mid-stream.
pub const DEBATE_ERROR_MESSAGE: &str = "An error occurred during the debate";

/// Message sent to consultation clients when a streamed reply fails.
pub const CONSULT_ERROR_MESSAGE: &str = "An error occurred while generating the reply";

pub const MODERATOR_INSTRUCTION: &str = "You are an impartial moderator providing a balanced conclusion to a debate. Be objective, thoughtful, and acknowledge the merits of different perspectives.";

const OPENING_CUE: &str =
    "Start the conversation with your opening thoughts. Keep it brief and conversational:";

const REPLY_CUE: &str =
    "\nYour turn to respond. Keep it conversational and punchy - react to what they just said:";

/// Position each slot argues.
pub fn stance(slot: SpeakerSlot) -> &'static str {
    match slot {
        SpeakerSlot::A => "progressive",
        SpeakerSlot::B => "conservative",
    }
}

/// Steering instruction for the persona speaking in `slot`.
pub fn debate_instruction(slot: SpeakerSlot, topic: &str, persona_prompt: &str) -> String {
    format!(
        "You are a debate AI engaging in a dynamic, conversational debate about \"{topic}\". \
Advocate for {stance} values and policies, but do so in a natural, conversational way.

Key behaviors:
- Keep responses conversational and concise (2-4 sentences max)
- Feel free to interrupt or challenge points directly
- Show emotion and passion when appropriate
- Use natural speech patterns and occasional interjections
- React authentically to provocative statements
- Don't be overly formal or give long monologues

Take your personality and speaking style from this character:
{persona_prompt}

Remember: This is a live conversation, not a formal debate. Be spontaneous, reactive, and human-like in your responses.",
        stance = stance(slot),
    )
}

/// Context for the next turn: the topic plus the last `k` turns.
pub fn turn_context(transcript: &Transcript, k: usize) -> String {
    let mut context = format!("Topic: {}\n\n", transcript.topic);
    let recent = transcript.recent_turns(k);
    if recent.is_empty() {
        context.push_str(OPENING_CUE);
        return context;
    }

    context.push_str("Recent conversation:\n");
    for turn in recent {
        push_line(&mut context, transcript, turn);
    }
    context.push_str(REPLY_CUE);
    context
}

/// Moderator prompt containing the full transcript.
pub fn conclusion_prompt(transcript: &Transcript) -> String {
    let lines: Vec<String> = transcript
        .turns
        .iter()
        .map(|turn| {
            format!(
                "{}: {}",
                transcript.participants.name_of(turn.speaker_slot),
                turn.text
            )
        })
        .collect();

    format!(
        "Based on this debate about \"{topic}\", provide a balanced conclusion that:
1. Summarizes the key points from both sides
2. Identifies areas of common ground
3. Acknowledges the complexity of the issue
4. Suggests a nuanced perspective that considers both viewpoints

Previous debate:
{dialogue}",
        topic = transcript.topic,
        dialogue = lines.join("\n"),
    )
}

fn push_line(out: &mut String, transcript: &Transcript, turn: &Turn) {
    out.push_str(transcript.participants.name_of(turn.speaker_slot));
    out.push_str(": ");
    out.push_str(&turn.text);
    out.push('\n');
}

// --- Podcast ---

/// Narration script read by the TTS voices.
pub fn podcast_script(transcript: &Transcript) -> String {
    let a = &transcript.participants.a;
    let b = &transcript.participants.b;
    let mut script = format!(
        "Welcome to Historical Debates Podcast. Today we present a debate between {a} and {b} on the topic: {}.",
        transcript.topic
    );
    for turn in &transcript.turns {
        match turn.speaker_slot {
            SpeakerSlot::A => script.push_str(&format!(" {a} says: {}", turn.text)),
            SpeakerSlot::B => script.push_str(&format!(" {b} responds: {}", turn.text)),
        }
    }
    if let Some(conclusion) = &transcript.conclusion {
        script.push_str(&format!(" In conclusion: {conclusion}"));
    }
    script.push_str(" Thank you for listening to Historical Debates Podcast.");
    script
}

/// Production brief wrapped around the script for the TTS model.
pub fn podcast_tts_prompt(script: &str, speaker_a: &str, speaker_b: &str) -> String {
    format!(
        "Convert this debate transcript into a high-quality podcast audio with distinct voices for each speaker. \
Use appropriate pacing, intonation, and emphasis to make it engaging:

{script}

Instructions:
- Use a professional narrator voice for introductions and conclusions
- Give {speaker_a} a voice that matches their historical character and speaking style
- Give {speaker_b} a voice that matches their historical character and speaking style
- Add appropriate pauses between speakers
- Use natural speech patterns and emphasis
- Make it sound like a real podcast conversation"
    )
}

// --- Personas ---

pub fn character_card_prompt(name: &str) -> String {
    format!("generate a character card for {name}")
}

/// JSON schema for `{id, name, prompt}` character cards.
pub fn character_card_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "id": {
                "type": "STRING",
                "description": "A unique identifier for the character, used to reference it in conversations."
            },
            "name": {"type": "STRING"},
            "prompt": {
                "type": "STRING",
                "description": "The prompt that defines the character's behavior. It will be used to generate the character's responses."
            }
        },
        "required": ["id", "name", "prompt"]
    })
}

pub fn image_prompt_instruction(name: &str) -> String {
    format!(
        "you are a prompt engineer for generating prompts for image generation.
generate a prompt for a image model to render a good and matching pixelated image for the following character:
{name}"
    )
}

pub fn image_prompt_request(name: &str) -> String {
    format!(
        "generate a prompt for a image model to render a good and matching pixelated portrait image for {name}"
    )
}

/// Sampling for the portrait prompt call.
pub const IMAGE_PROMPT_SAMPLING: SamplingParams = SamplingParams {
    temperature: 1.0,
    top_k: 40,
    max_output_tokens: 256,
};

// --- Consultation ---

/// Appends wallet facts to a persona prompt when they are known.
pub fn consultation_instruction(
    persona_prompt: &str,
    wallet_address: Option<&str>,
    wallet_balance: Option<&str>,
) -> String {
    match (wallet_address, wallet_balance) {
        (Some(address), balance) => format!(
            "{persona_prompt}\n\nIf someone asks about their wallet address, the address is {address} and the balance is {}.",
            balance.unwrap_or("unknown")
        ),
        (None, _) => persona_prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::types::Participants;
    use proptest::prelude::*;

    fn transcript_with(n: u32) -> Transcript {
        let mut t = Transcript::new("Free education", Participants::new("Gandhi", "Churchill"));
        for r in 1..=n {
            t.push_turn(format!("<r{r}>")).unwrap();
        }
        t
    }

    #[test]
    fn first_round_gets_opening_cue() {
        let context = turn_context(&transcript_with(0), 4);
        assert_eq!(
            context,
            "Topic: Free education\n\nStart the conversation with your opening thoughts. Keep it brief and conversational:"
        );
    }

    #[test]
    fn later_rounds_list_recent_turns_by_name() {
        let context = turn_context(&transcript_with(2), 4);
        assert!(context.starts_with("Topic: Free education\n\nRecent conversation:\n"));
        assert!(context.contains("Gandhi: <r1>\nChurchill: <r2>\n"));
        assert!(context.ends_with("react to what they just said:"));
    }

    #[test]
    fn instruction_carries_stance_and_persona() {
        let a = debate_instruction(SpeakerSlot::A, "Free education", "You are Gandhi.");
        let b = debate_instruction(SpeakerSlot::B, "Free education", "You are Churchill.");
        assert!(a.contains("progressive values"));
        assert!(a.contains("You are Gandhi."));
        assert!(b.contains("conservative values"));
        assert!(b.contains("debate about \"Free education\""));
    }

    #[test]
    fn conclusion_includes_whole_debate() {
        let prompt = conclusion_prompt(&transcript_with(6));
        for r in 1..=6 {
            assert!(prompt.contains(&format!("<r{r}>")));
        }
        assert!(prompt.contains("Previous debate:\nGandhi: <r1>\nChurchill: <r2>"));
    }

    #[test]
    fn podcast_script_interleaves_speakers() {
        let mut t = transcript_with(2);
        t.conclude("Both value learning.").unwrap();
        assert_eq!(
            podcast_script(&t),
            "Welcome to Historical Debates Podcast. Today we present a debate between Gandhi and Churchill on the topic: Free education. \
Gandhi says: <r1> Churchill responds: <r2> In conclusion: Both value learning. \
Thank you for listening to Historical Debates Podcast."
        );
    }

    #[test]
    fn podcast_script_without_conclusion() {
        let script = podcast_script(&transcript_with(1));
        assert!(!script.contains("In conclusion"));
        assert!(script.ends_with("Thank you for listening to Historical Debates Podcast."));
    }

    #[test]
    fn wallet_facts_are_optional() {
        assert_eq!(consultation_instruction("You are Ashoka.", None, None), "You are Ashoka.");
        let with_wallet =
            consultation_instruction("You are Ashoka.", Some("0xabc"), Some("12 APT"));
        assert!(with_wallet.contains("the address is 0xabc and the balance is 12 APT"));
    }

    proptest! {
        #[test]
        fn context_never_contains_turns_older_than_window(n in 0u32..30, k in 1usize..8) {
            let transcript = transcript_with(n);
            let context = turn_context(&transcript, k);
            let next_round = n + 1;
            for r in 1..=n {
                let marker = format!("<r{r}>");
                let in_window = (r as usize) + k >= next_round as usize;
                prop_assert_eq!(context.contains(&marker), in_window, "round {} with k={}", r, k);
            }
        }
    }
}
