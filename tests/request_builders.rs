use glik_ox::{
    ChatRequest, CompletionRequest, FileDescriptor, FileSource, Rating, ResponseMode,
    SegmentInput, WorkflowRunRequest,
};
use serde_json::{Map, Value, json};

#[test]
fn test_chat_request_builder() {
    let request = ChatRequest::builder()
        .input("context", "Hello")
        .query("How are you?")
        .user("user123")
        .build();

    assert_eq!(request.query, "How are you?");
    assert_eq!(request.user, "user123");
    assert_eq!(request.response_mode, ResponseMode::Blocking);
    assert!(request.conversation_id.is_none());
    assert_eq!(request.inputs["context"], "Hello");
}

#[test]
fn test_chat_request_serialization() {
    let request = ChatRequest::builder()
        .input("context", "Hello")
        .query("How are you?")
        .user("user123")
        .conversation_id("conv-1")
        .response_mode(ResponseMode::Streaming)
        .build();

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["query"], "How are you?");
    assert_eq!(value["user"], "user123");
    assert_eq!(value["response_mode"], "streaming");
    assert_eq!(value["conversation_id"], "conv-1");
    assert_eq!(value["inputs"], json!({"context": "Hello"}));
}

#[test]
fn test_chat_request_omits_unset_optionals() {
    let request = ChatRequest::builder()
        .query("Hi")
        .user("user123")
        .build();

    let value = serde_json::to_value(&request).unwrap();
    assert!(value.get("conversation_id").is_none());
    assert!(value.get("files").is_none());
    assert_eq!(value["response_mode"], "blocking");
}

#[test]
fn test_inputs_mapping_round_trips() {
    let mut inputs = Map::new();
    inputs.insert("name".to_string(), json!("panda"));
    inputs.insert("count".to_string(), json!(3));
    inputs.insert("nested".to_string(), json!({"deep": [1, 2, 3]}));

    let request = CompletionRequest::builder()
        .inputs(inputs.clone())
        .user("user123")
        .build();

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["inputs"], Value::Object(inputs));
}

#[test]
fn test_extra_fields_pass_through_at_top_level() {
    let request = ChatRequest::builder()
        .query("Hi")
        .user("user123")
        .extra_field("auto_generate_name", json!(false))
        .build();

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["auto_generate_name"], json!(false));
}

#[test]
fn test_completion_request_with_files() {
    let request = CompletionRequest::builder()
        .input("query", "Describe the picture.")
        .user("user123")
        .files(vec![FileDescriptor::image_url(
            "https://example.com/cat.png",
        )])
        .build();

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["files"][0]["type"], "image");
    assert_eq!(value["files"][0]["transfer_method"], "remote_url");
    assert_eq!(value["files"][0]["url"], "https://example.com/cat.png");
}

#[test]
fn test_remote_url_descriptor_never_carries_upload_id() {
    let descriptor = FileDescriptor::image_url("https://example.com/cat.png");

    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(value["transfer_method"], "remote_url");
    assert!(value.get("url").is_some());
    assert!(value.get("upload_file_id").is_none());
}

#[test]
fn test_local_file_descriptor_never_carries_url() {
    let descriptor = FileDescriptor::image_upload("file-abc123");

    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(value["transfer_method"], "local_file");
    assert_eq!(value["upload_file_id"], "file-abc123");
    assert!(value.get("url").is_none());
}

#[test]
fn test_file_descriptor_round_trip() {
    for descriptor in [
        FileDescriptor::image_url("https://example.com/cat.png"),
        FileDescriptor::image_upload("file-abc123"),
    ] {
        let value = serde_json::to_value(&descriptor).unwrap();
        let back: FileDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(back, descriptor);
    }
}

#[test]
fn test_file_descriptor_rejects_mismatched_field() {
    // local_file must carry upload_file_id, not url
    let result: Result<FileDescriptor, _> = serde_json::from_value(json!({
        "type": "image",
        "transfer_method": "local_file",
        "url": "https://example.com/cat.png",
    }));
    assert!(result.is_err());

    let back: FileDescriptor = serde_json::from_value(json!({
        "type": "image",
        "transfer_method": "local_file",
        "upload_file_id": "file-abc123",
    }))
    .unwrap();
    assert!(matches!(back.source, FileSource::LocalFile { .. }));
}

#[test]
fn test_workflow_request_defaults_to_streaming() {
    let request = WorkflowRunRequest::builder()
        .input("task", "process_data")
        .user("user123")
        .build();

    assert_eq!(request.response_mode, ResponseMode::Streaming);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["response_mode"], "streaming");
    assert_eq!(value["inputs"]["task"], "process_data");
}

#[test]
fn test_rating_serialization() {
    assert_eq!(serde_json::to_value(Rating::Like).unwrap(), json!("like"));
    assert_eq!(
        serde_json::to_value(Rating::Dislike).unwrap(),
        json!("dislike")
    );
}

#[test]
fn test_segment_input_builder() {
    let segment = SegmentInput::builder()
        .content("test text segment 1")
        .keywords(vec!["a".to_string()])
        .build();

    let value = serde_json::to_value(&segment).unwrap();
    assert_eq!(value["content"], "test text segment 1");
    assert_eq!(value["keywords"], json!(["a"]));
    assert!(value.get("answer").is_none());
    assert!(value.get("enabled").is_none());
}
