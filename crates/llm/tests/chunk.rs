//! Tests for StreamChunk parsing and accessors.

use weft_llm::{FinishReason, StreamChunk};

#[test]
fn parses_openai_content_chunk() {
    let data = r#"{
        "id": "chatcmpl-123",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [{"index": 0, "delta": {"content": "Hello"}, "finish_reason": null}]
    }"#;
    let chunk: StreamChunk = serde_json::from_str(data).expect("parse chunk");
    assert_eq!(chunk.content(), Some("Hello"));
    assert_eq!(chunk.reason(), None);
    assert_eq!(chunk.meta.model, "gpt-4o-mini");
}

#[test]
fn parses_finish_reason_length() {
    let data = r#"{"choices": [{"index": 0, "delta": {}, "finish_reason": "length"}]}"#;
    let chunk: StreamChunk = serde_json::from_str(data).expect("parse chunk");
    assert_eq!(chunk.reason(), Some(FinishReason::Length));
    assert_eq!(chunk.content(), None);
}

#[test]
fn parses_finish_reason_stop_with_usage() {
    let data = r#"{
        "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    }"#;
    let chunk: StreamChunk = serde_json::from_str(data).expect("parse chunk");
    assert_eq!(chunk.reason(), Some(FinishReason::Stop));
    assert_eq!(chunk.usage.expect("usage").total_tokens, 30);
}

#[test]
fn empty_content_reads_as_none() {
    let chunk = StreamChunk::text("");
    assert_eq!(chunk.content(), None);
}

#[test]
fn constructors_round_trip_accessors() {
    assert_eq!(StreamChunk::text("hi").content(), Some("hi"));
    assert_eq!(
        StreamChunk::finish(FinishReason::ToolCalls).reason(),
        Some(FinishReason::ToolCalls)
    );
}
