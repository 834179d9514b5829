// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the HTTP surface over mock adapters.

use axum::http::{Method, StatusCode};
use gazette_debate::prompts::DEBATE_ERROR_MESSAGE;
use gazette_test_utils::{TestHarness, persona};
use serde_json::json;

async fn harness_with(responses: &[&str]) -> TestHarness {
    TestHarness::builder()
        .with_personas(vec![
            persona("gandhi", "Gandhi"),
            persona("churchill", "Churchill"),
        ])
        .with_mock_responses(responses.iter().map(|s| s.to_string()).collect())
        .build()
        .await
        .unwrap()
}

fn two_round_transcript() -> serde_json::Value {
    json!({
        "topic": "Should education be free?",
        "participants": { "a": "Gandhi", "b": "Churchill" },
        "turns": [
            { "speakerSlot": "A", "text": "Knowledge belongs to all.", "roundNumber": 1 },
            { "speakerSlot": "B", "text": "Someone must pay the teachers.", "roundNumber": 2 }
        ],
        "conclusion": "Both raise fair points."
    })
}

// --- Health and auth ---

#[tokio::test]
async fn health_is_public_and_lists_adapters() {
    let harness = TestHarness::builder()
        .with_bearer_token("s3cret")
        .build()
        .await
        .unwrap();

    let resp = harness.get("/health").await.unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["adapters"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn api_requires_bearer_token_when_configured() {
    let harness = TestHarness::builder()
        .with_bearer_token("s3cret")
        .build()
        .await
        .unwrap();

    let anonymous = harness.get("/api/personas").await.unwrap();
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let wrong = harness
        .send(Method::GET, "/api/personas", None, Some("guess"))
        .await
        .unwrap();
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let authorized = harness
        .send(Method::GET, "/api/personas", None, Some("s3cret"))
        .await
        .unwrap();
    assert_eq!(authorized.status, StatusCode::OK);
}

// --- Personas ---

#[tokio::test]
async fn personas_append_in_order_and_reject_duplicates() {
    let harness = harness_with(&[]).await;

    let created = harness
        .post(
            "/api/personas",
            json!({ "id": "ashoka", "name": "Ashoka", "promptText": "You are Ashoka." }),
        )
        .await
        .unwrap();
    assert_eq!(created.status, StatusCode::CREATED);

    let duplicate = harness
        .post(
            "/api/personas",
            json!({ "id": "gandhi", "name": "Gandhi", "prompt": "again" }),
        )
        .await
        .unwrap();
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let blank = harness
        .post(
            "/api/personas",
            json!({ "id": "nobody", "name": " ", "promptText": "x" }),
        )
        .await
        .unwrap();
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let list = harness.get("/api/personas").await.unwrap().json();
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["gandhi", "churchill", "ashoka"]);
}

#[tokio::test]
async fn generated_persona_is_stored_with_portrait() {
    let harness = harness_with(&["a stern emperor in marble"]).await;
    harness
        .text
        .add_structured(json!({ "id": "ashoka", "name": "Ashoka", "prompt": "You are Ashoka." }))
        .await;

    let resp = harness
        .post("/api/personas/generate", json!({ "name": "Ashoka" }))
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["id"], "ashoka");
    assert_eq!(body["portraitUri"], "https://img.test/1.png");
    assert_eq!(
        harness.portraits.prompts().await,
        ["a stern emperor in marble"]
    );
    assert_eq!(harness.store.count().await.unwrap(), 3);
}

// --- Debate stream ---

#[tokio::test]
async fn debate_streams_turns_conclusion_and_completion() {
    let harness = harness_with(&[
        "Education frees the soul.",
        "Free things are rarely valued.",
        "Both speakers value learning.",
    ])
    .await;

    let resp = harness
        .post(
            "/api/debate",
            json!({
                "topic": "Should education be free?",
                "leader1": "gandhi",
                "leader2": "churchill",
                "rounds": 2
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    assert!(
        resp.content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("text/event-stream")
    );

    let frames = resp.sse_frames();
    assert_eq!(
        frames,
        vec![
            json!({
                "type": "message",
                "speaker": "bot1",
                "speakerName": "Gandhi",
                "content": "Education frees the soul.",
                "round": 1
            }),
            json!({
                "type": "message",
                "speaker": "bot2",
                "speakerName": "Churchill",
                "content": "Free things are rarely valued.",
                "round": 2
            }),
            json!({ "type": "conclusion", "content": "Both speakers value learning." }),
            json!({ "type": "complete" }),
        ]
    );
}

#[tokio::test]
async fn failed_round_ends_stream_with_generic_error() {
    let harness = harness_with(&["Education frees the soul."]).await;
    harness.text.add_failure("429 quota exceeded").await;

    let resp = harness
        .post(
            "/api/debate",
            json!({
                "topic": "Should education be free?",
                "personaA": "gandhi",
                "personaB": "churchill",
                "rounds": 4
            }),
        )
        .await
        .unwrap();

    let frames = resp.sse_frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["round"], 1);
    assert_eq!(
        frames[1],
        json!({ "type": "error", "message": DEBATE_ERROR_MESSAGE })
    );
    assert!(!resp.body.contains("quota"));
}

#[tokio::test]
async fn bad_debate_requests_are_rejected_before_streaming() {
    let harness = harness_with(&[]).await;

    let unknown = harness
        .post(
            "/api/debate",
            json!({ "topic": "Tariffs", "personaA": "gandhi", "personaB": "napoleon" }),
        )
        .await
        .unwrap();
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.json()["error"], "persona not found: napoleon");

    let no_topic = harness
        .post(
            "/api/debate",
            json!({ "topic": "  ", "personaA": "gandhi", "personaB": "churchill" }),
        )
        .await
        .unwrap();
    assert_eq!(no_topic.status, StatusCode::BAD_REQUEST);
    assert!(no_topic.json()["error"]
        .as_str()
        .unwrap()
        .contains("Topic is required"));

    let too_long = harness
        .post(
            "/api/debate",
            json!({
                "topic": "Tariffs",
                "personaA": "gandhi",
                "personaB": "churchill",
                "rounds": 999
            }),
        )
        .await
        .unwrap();
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let same_name = harness
        .post(
            "/api/debate",
            json!({
                "topic": "Tariffs",
                "personaA": "gandhi",
                "personaB": { "id": "gandhi-2", "name": "Gandhi", "prompt": "You are Gandhi." }
            }),
        )
        .await
        .unwrap();
    assert_eq!(same_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(same_name.json()["error"], "invalid request: both personas are named Gandhi");
    assert!(harness.text.requests().await.is_empty());
}

#[tokio::test]
async fn missing_fields_are_json_bad_requests() {
    let harness = harness_with(&[]).await;

    let missing_topic = harness
        .post(
            "/api/debate",
            json!({ "personaA": "gandhi", "personaB": "churchill" }),
        )
        .await
        .unwrap();
    assert_eq!(missing_topic.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_topic.content_type.as_deref(), Some("application/json"));
    assert!(missing_topic.json()["error"]
        .as_str()
        .unwrap()
        .contains("topic"));

    let wrong_type = harness
        .post("/api/mint", json!({ "contentAddress": 42 }))
        .await
        .unwrap();
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert!(wrong_type.json()["error"].is_string());
    assert!(harness.text.requests().await.is_empty());
}

// --- Consultation ---

#[tokio::test]
async fn consult_streams_reply_as_persona() {
    let harness = harness_with(&["Be the change you wish to see."]).await;

    let resp = harness
        .post(
            "/api/consult",
            json!({
                "leader": "gandhi",
                "messages": [{ "role": "user", "content": "How do I start?" }]
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.content_type.as_deref(), Some("text/event-stream"));
    let frames = resp.sse_frames();
    let (last, chunks) = frames.split_last().unwrap();
    assert_eq!(last, &json!({ "type": "done", "personaId": "gandhi" }));
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|f| f["type"] == "chunk"));
    let text: String = chunks
        .iter()
        .map(|f| f["content"].as_str().unwrap())
        .collect();
    assert_eq!(text, "Be the change you wish to see.");

    let bad = harness
        .post(
            "/api/consult",
            json!({
                "persona": "gandhi",
                "messages": [{ "role": "assistant", "content": "Hello" }]
            }),
        )
        .await
        .unwrap();
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.json()["error"].is_string());
}

#[tokio::test]
async fn consult_refused_upstream_is_bad_gateway_before_streaming() {
    let harness = harness_with(&[]).await;
    harness.text.add_failure("503 model overloaded").await;

    let resp = harness
        .post(
            "/api/consult",
            json!({
                "persona": "churchill",
                "messages": [{ "role": "user", "content": "Should I fight on?" }]
            }),
        )
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert_eq!(resp.content_type.as_deref(), Some("application/json"));
    assert!(resp.json()["error"].as_str().unwrap().contains("overloaded"));
}

// --- Archive, podcast, publish ---

#[tokio::test]
async fn archiving_twice_yields_distinct_addresses() {
    let harness = harness_with(&[]).await;

    let first = harness
        .post("/api/debates/archive", two_round_transcript())
        .await
        .unwrap();
    let second = harness
        .post("/api/debates/archive", two_round_transcript())
        .await
        .unwrap();
    assert_eq!(first.status, StatusCode::OK);
    assert_ne!(
        first.json()["contentAddress"],
        second.json()["contentAddress"]
    );
    assert_eq!(harness.pinner.requests().await.len(), 2);
}

#[tokio::test]
async fn podcast_is_written_and_served() {
    let harness = harness_with(&[]).await;

    let resp = harness
        .post("/api/debates/podcast", two_round_transcript())
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    let public_url = body["publicUrl"].as_str().unwrap().to_string();
    assert!(public_url.starts_with("/debate-podcast-"));
    assert_eq!(body["contentAddress"], "QmMock1");

    let file = harness.get(&public_url).await.unwrap();
    assert_eq!(file.status, StatusCode::OK);
    assert!(file.body.starts_with("RIFF"));
}

#[tokio::test]
async fn publish_survives_synthesis_failure() {
    let harness = TestHarness::builder()
        .with_failing_speech("no audio returned")
        .build()
        .await
        .unwrap();

    let resp = harness
        .post("/api/debates/publish", two_round_transcript())
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["record"]["contentAddress"], "QmMock1");
    assert!(body["record"].get("audioAddress").is_none());
    assert!(body.get("podcast").is_none());
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_transcript_is_rejected() {
    let harness = harness_with(&[]).await;
    let mut transcript = two_round_transcript();
    transcript["turns"][1]["speakerSlot"] = json!("A");

    let resp = harness
        .post("/api/debates/archive", transcript)
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(harness.pinner.requests().await.is_empty());
}

// --- Mint and news ---

#[tokio::test]
async fn mint_skips_without_session_and_submits_with_one() {
    let offline = harness_with(&[]).await;
    let skipped = offline
        .post("/api/mint", json!({ "contentAddress": "QmMock1" }))
        .await
        .unwrap();
    assert_eq!(skipped.status, StatusCode::OK);
    assert_eq!(skipped.json()["status"], "skipped");

    let online = TestHarness::builder()
        .with_wallet_session()
        .build()
        .await
        .unwrap();
    let submitted = online
        .post("/api/mint", json!({ "cid": "QmMock1" }))
        .await
        .unwrap();
    assert_eq!(
        submitted.json(),
        json!({ "status": "submitted", "txHash": "0xmock1" })
    );
    assert_eq!(online.minter.minted().await, ["QmMock1"]);

    let empty = online
        .post("/api/mint", json!({ "contentAddress": "" }))
        .await
        .unwrap();
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn news_proxies_query() {
    let harness = harness_with(&[]).await;
    let resp = harness.get("/api/news?q=summit").await.unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["search_parameters"]["q"], "summit");
    assert_eq!(harness.news.queries().await, ["summit"]);
}
