//! Tests for the shared OpenAI-compatible Request type.

use weft_llm::{General, Message, Request, ToolChoice};

#[test]
fn request_from_general_sets_model_and_stream() {
    let general = General {
        model: "gpt-4o".into(),
        ..General::default()
    };
    let req = Request::from(general);
    assert_eq!(req.model, "gpt-4o");
    assert!(req.stream);
    assert!(req.messages.is_empty());
}

#[test]
fn request_from_general_propagates_max_tokens() {
    let general = General {
        max_tokens: Some(4096),
        ..General::default()
    };
    let req = Request::from(general);
    assert_eq!(req.max_tokens, Some(4096));
}

#[test]
fn request_with_tool_choice_none() {
    let general = General {
        tool_choice: Some(ToolChoice::None),
        ..General::default()
    };
    let req = Request::from(general);
    assert_eq!(
        req.tool_choice.expect("tool_choice"),
        serde_json::json!("none")
    );
}

#[test]
fn request_with_tool_choice_auto() {
    let general = General {
        tool_choice: Some(ToolChoice::Auto),
        ..General::default()
    };
    let req = Request::from(general);
    assert_eq!(
        req.tool_choice.expect("tool_choice"),
        serde_json::json!("auto")
    );
}

#[test]
fn request_without_tool_choice_omits_field() {
    let req = Request::from(General::default());
    assert!(req.tool_choice.is_none());

    let body = serde_json::to_value(&req).expect("serialize");
    assert!(body.get("tool_choice").is_none());
    assert!(body.get("max_tokens").is_none());
}

#[test]
fn request_messages_attach_in_order() {
    let messages = vec![
        Message::system("be brief"),
        Message::user("hi"),
        Message::assistant("hello"),
    ];
    let req = Request::from(General::default()).messages(&messages);
    assert_eq!(req.messages, messages);

    let body = serde_json::to_value(&req).expect("serialize");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "hi");
}
