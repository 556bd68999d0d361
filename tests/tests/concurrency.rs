use application::session_manager::SessionManager;
use domain::session::Role;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tests::SlowBackend;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_session_submits_serialize() {
    let backend = Arc::new(SlowBackend::new(Duration::from_millis(40)));
    let manager = Arc::new(SessionManager::new(backend.clone()));
    let id = manager.create_session(Some("busy")).await;

    let tasks = (0..2).map(|i| {
        let manager = manager.clone();
        let id = id.clone();
        tokio::spawn(async move { manager.submit(&id, &format!("question {}", i)).await })
    });
    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let history = manager.get_history(&id).await.unwrap();
    assert_eq!(history.len(), 4);
    let sequences: Vec<u64> = history.iter().map(|t| t.sequence()).collect();
    assert_eq!(sequences, vec![0, 1, 2, 3]);

    // Each user turn is immediately followed by the reply to it.
    for pair in history.chunks(2) {
        assert_eq!(pair[0].role(), Role::User);
        assert_eq!(pair[1].role(), Role::Assistant);
        assert_eq!(pair[1].content(), format!("re: User: {}", pair[0].content()));
    }
    assert_eq!(backend.max_in_flight(), 1);
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn different_sessions_run_independently() {
    let backend = Arc::new(SlowBackend::new(Duration::from_millis(40)));
    let manager = SessionManager::new(backend.clone());
    let a = manager.create_session(Some("a")).await;
    let b = manager.create_session(Some("b")).await;

    let (ra, rb) = tokio::join!(manager.submit(&a, "left"), manager.submit(&b, "right"));
    assert_eq!(ra.unwrap().content(), "re: User: left");
    assert_eq!(rb.unwrap().content(), "re: User: right");
    assert_eq!(backend.max_in_flight(), 2);
}

#[tokio::test]
async fn user_turn_visible_while_reply_pending() {
    let backend = Arc::new(SlowBackend::new(Duration::from_millis(100)));
    let manager = Arc::new(SessionManager::new(backend));
    let id = manager.create_session(Some("pending")).await;

    let submit = {
        let manager = manager.clone();
        let id = id.clone();
        tokio::spawn(async move { manager.submit(&id, "slow question").await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    let during = manager.get_history(&id).await.unwrap();
    assert_eq!(during.len(), 1);
    assert_eq!(during[0].role(), Role::User);

    submit.await.unwrap().unwrap();
    assert_eq!(manager.get_history(&id).await.unwrap().len(), 2);
}
