use glik_ox::{ChatRequest, Glik, GlikChat, GlikCompletion, GlikDatasets, GlikWorkflow};

#[test]
fn test_client_holds_credentials() {
    let client = Glik::new("app-test-key");

    assert_eq!(client.api_key(), "app-test-key");
    assert_eq!(client.base_url(), "https://api.glik.ai/v1");
}

#[test]
fn test_client_builder_with_custom_base_url() {
    let client = Glik::builder()
        .api_key("app-test-key")
        .base_url("https://glik.example.com/v1")
        .build();

    assert_eq!(client.base_url(), "https://glik.example.com/v1");
}

#[test]
fn test_debug_redacts_api_key() {
    let client = Glik::new("app-secret-key");

    let debug = format!("{client:?}");
    assert!(debug.contains("[REDACTED]"));
    assert!(!debug.contains("app-secret-key"));
}

#[test]
fn test_facades_deref_to_core_client() {
    let chat = GlikChat::new("app-test-key");
    let completion = GlikCompletion::new("app-test-key");
    let workflow = GlikWorkflow::new("app-test-key");

    assert_eq!(chat.api_key(), "app-test-key");
    assert_eq!(completion.base_url(), "https://api.glik.ai/v1");
    assert_eq!(workflow.api_key(), "app-test-key");
}

#[test]
fn test_facade_from_shared_core() {
    let core = Glik::builder()
        .api_key("app-test-key")
        .base_url("https://glik.example.com/v1")
        .build();

    let chat = GlikChat::from(core.clone());
    let completion = GlikCompletion::from(core);

    assert_eq!(chat.base_url(), "https://glik.example.com/v1");
    assert_eq!(completion.base_url(), "https://glik.example.com/v1");
}

#[test]
fn test_datasets_scope() {
    let datasets = GlikDatasets::new("app-test-key");
    assert!(datasets.dataset_id().is_none());

    let scoped = datasets.with_dataset_id("ds-1");
    assert_eq!(scoped.dataset_id(), Some("ds-1"));
}

#[test]
fn test_building_a_stream_never_mutates_credentials() {
    let chat = GlikChat::new("app-test-key");
    let request = ChatRequest::builder()
        .query("Hello, World!")
        .user("test_user")
        .build();

    // Stream construction is lazy; nothing is sent until first poll.
    let stream = chat.stream_chat_message(&request);
    drop(stream);

    assert_eq!(chat.api_key(), "app-test-key");
    assert_eq!(chat.base_url(), "https://api.glik.ai/v1");
}
