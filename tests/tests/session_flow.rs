use application::session_manager::SessionManager;
use domain::error::{BackendError, ChatError};
use domain::session::Role;
use std::sync::Arc;
use tests::ScriptedBackend;

#[tokio::test]
async fn arithmetic_scenario() {
    let manager = SessionManager::new(Arc::new(ScriptedBackend::replying("4")));
    manager.create_session(Some("s1")).await;
    manager.submit("s1", "What is 2+2?").await.unwrap();

    let history = manager.get_history("s1").await.unwrap();
    let view: Vec<(Role, &str, u64)> = history
        .iter()
        .map(|t| (t.role(), t.content(), t.sequence()))
        .collect();
    assert_eq!(view, vec![(Role::User, "What is 2+2?", 0), (Role::Assistant, "4", 1)]);
}

#[tokio::test]
async fn failed_call_keeps_user_turn() {
    let backend = ScriptedBackend::new(vec![Err(BackendError::Invocation("model crashed".to_string()))]);
    let manager = SessionManager::new(Arc::new(backend));
    manager.create_session(Some("s2")).await;

    let err = manager.submit("s2", "Tell me a joke").await.unwrap_err();
    assert!(matches!(err, ChatError::Backend(_)));

    let history = manager.get_history("s2").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role(), Role::User);
    assert_eq!(history[0].content(), "Tell me a joke");
    assert_eq!(history[0].sequence(), 0);
}

#[tokio::test]
async fn retry_after_failure_sees_both_user_turns() {
    let backend = Arc::new(ScriptedBackend::new(vec![
        Err(BackendError::Unavailable("connection refused".to_string())),
        Ok("Hi Ada".to_string()),
    ]));
    let manager = SessionManager::new(backend.clone());
    let id = manager.create_session(None).await;

    assert!(manager.submit(&id, "I am Ada").await.is_err());
    let reply = manager.submit(&id, "Hello?").await.unwrap();
    assert_eq!(reply.content(), "Hi Ada");
    assert_eq!(reply.sequence(), 2);

    let prompts = backend.prompts();
    assert!(prompts[1].starts_with("User: I am Ada\nUser: Hello?\n"));
}

#[tokio::test]
async fn sequences_stay_gap_free_across_sessions() {
    let manager = SessionManager::new(Arc::new(ScriptedBackend::replying("ok")));
    let a = manager.create_session(Some("a")).await;
    let b = manager.create_session(Some("b")).await;

    for i in 0..4 {
        manager.submit(&a, &format!("a{}", i)).await.unwrap();
        if i % 2 == 0 {
            manager.submit(&b, &format!("b{}", i)).await.unwrap();
        }
    }

    for id in [&a, &b] {
        let sequences: Vec<u64> = manager
            .get_history(id)
            .await
            .unwrap()
            .iter()
            .map(|t| t.sequence())
            .collect();
        let expected: Vec<u64> = (0..sequences.len() as u64).collect();
        assert_eq!(sequences, expected);
    }
    assert_eq!(manager.get_history(&a).await.unwrap().len(), 8);
    assert_eq!(manager.get_history(&b).await.unwrap().len(), 4);
}

#[tokio::test]
async fn reset_then_history_is_empty() {
    let manager = SessionManager::new(Arc::new(ScriptedBackend::replying("ok")));
    let id = manager.create_session(Some("r")).await;
    manager.submit(&id, "remember 42").await.unwrap();

    manager.reset_session(&id).await.unwrap();
    assert!(manager.get_history(&id).await.unwrap().is_empty());
    assert_eq!(manager.list_sessions().await, vec!["r".to_string()]);
}

#[tokio::test]
async fn prompt_is_identical_for_identical_history() {
    let first = Arc::new(ScriptedBackend::replying("same"));
    let second = Arc::new(ScriptedBackend::replying("same"));
    for backend in [&first, &second] {
        let manager = SessionManager::new(backend.clone());
        let id = manager.create_session(Some("det")).await;
        manager.submit(&id, "one").await.unwrap();
        manager.submit(&id, "two").await.unwrap();
    }
    assert_eq!(first.prompts(), second.prompts());
}
