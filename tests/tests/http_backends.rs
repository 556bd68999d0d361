use application::session_manager::SessionManager;
use domain::error::{BackendError, ChatError};
use infrastructure::config::Config;
use infrastructure::provider::connect_backend;
use mockito::{Matcher, Server};

fn ollama_config(url: &str) -> Config {
    let url = url.to_string();
    Config::from_lookup(move |key| match key {
        "OLLAMA_BASE_URL" => Some(url.clone()),
        "OLLAMA_MODEL" => Some("qwen3:8b".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn chat_over_local_backend() {
    let mut server = Server::new_async().await;
    let _tags = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"qwen3:8b"}]}"#)
        .create_async()
        .await;
    let generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Regex("What is 2\\+2\\?".to_string()))
        .with_status(200)
        .with_body(r#"{"response":"4","done":true}"#)
        .create_async()
        .await;

    let backend = connect_backend(&ollama_config(&server.url()), false).await.unwrap();
    let manager = SessionManager::new(backend);
    let id = manager.create_session(Some("s1")).await;

    let reply = manager.submit(&id, "What is 2+2?").await.unwrap();
    assert_eq!(reply.content(), "4");
    assert_eq!(manager.backend_name(), "ollama:qwen3:8b");
    generate.assert_async().await;
}

#[tokio::test]
async fn server_error_is_reported_and_history_kept() {
    let mut server = Server::new_async().await;
    let _tags = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"qwen3:8b"}]}"#)
        .create_async()
        .await;
    let _generate = server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body(r#"{"error":"out of memory"}"#)
        .create_async()
        .await;

    let backend = connect_backend(&ollama_config(&server.url()), false).await.unwrap();
    let manager = SessionManager::new(backend);
    let id = manager.create_session(None).await;

    match manager.submit(&id, "hello").await {
        Err(ChatError::Backend(BackendError::Invocation(msg))) => assert!(msg.contains("out of memory")),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(manager.get_history(&id).await.unwrap().len(), 1);
}
