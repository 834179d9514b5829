// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parser for `streamGenerateContent?alt=sse` responses.
//!
//! Every event carries a partial `GenerateContentResponse`; the text parts
//! of its first candidate are the next chunk. Events without text (the
//! trailing usage-only chunk, safety ratings) are skipped.

use eventsource_stream::Eventsource;
use futures::stream::StreamExt;
use gazette_core::TextStream;

use crate::client::CallKind;
use crate::types::GenerateContentResponse;

/// Converts a streaming response body into a stream of text chunks.
pub fn parse_text_stream(response: reqwest::Response) -> TextStream {
    let events = response.bytes_stream().eventsource();

    let chunks = events.filter_map(|result| async move {
        match result {
            Ok(event) => match serde_json::from_str::<GenerateContentResponse>(&event.data) {
                Ok(partial) => partial.delta_text().map(Ok),
                Err(e) => Some(Err(CallKind::Text.error(
                    format!("failed to parse stream chunk: {e}"),
                    Some(Box::new(e)),
                ))),
            },
            Err(e) => Some(Err(CallKind::Text.error(format!("SSE stream error: {e}"), None))),
        }
    });

    Box::pin(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::GazetteError;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn sse_response(body: &str) -> reqwest::Response {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body.to_string()),
            )
            .mount(&server)
            .await;
        reqwest::get(&server.uri()).await.unwrap()
    }

    #[tokio::test]
    async fn text_parts_become_chunks_in_order() {
        let body = concat!(
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Be the \"}],\"role\":\"model\"}}]}\r\n\r\n",
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"change.\"}],\"role\":\"model\"}}]}\r\n\r\n",
            "data: {\"candidates\":[{\"finishReason\":\"STOP\"}],\"usageMetadata\":{\"totalTokenCount\":9}}\r\n\r\n",
        );
        let chunks: Vec<String> = parse_text_stream(sse_response(body).await)
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(chunks, ["Be the ", "change."]);
    }

    #[tokio::test]
    async fn malformed_chunk_is_a_generation_failure() {
        let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"ok\"}]}}]}\n\ndata: not json\n\n";
        let items: Vec<_> = parse_text_stream(sse_response(body).await).collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().unwrap(), "ok");
        assert!(matches!(
            items[1],
            Err(GazetteError::GenerationFailed { .. })
        ));
    }
}
