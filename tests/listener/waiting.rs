//! Projection wait tests

use crate::*;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test]
async fn wait_completes_when_projection_is_committed_later() {
    init_tracing();
    let listener = CommitListener::new("waiting");
    let started = Instant::now();
    let waiting = listener.spawn_wait_for_projection(|f: &Foo| f.id == 7, None);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let mut session = FakeSession::new(Arc::new(listener.clone()));
    session.store(Document::identified(Foo::new(7)));
    session.save_changes();

    let outcome = waiting.await.unwrap();
    assert!(started.elapsed() < commitwatch::DEFAULT_WAIT_TIMEOUT);

    let found = outcome.into_result().unwrap();
    assert_eq!(found.id, 7);
}

#[tokio::test(start_paused = true)]
async fn wait_for_missing_projection_honors_caller_cancellation() {
    let listener = CommitListener::new("waiting");
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        cancel.cancel();
    });

    let started = Instant::now();
    let outcome = listener
        .wait_for_projection(|_: &NeverWritten| true, Some(token))
        .await;
    let elapsed = started.elapsed();

    assert!(matches!(outcome, WaitOutcome::Cancelled { .. }));
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_millis(1250));
}

#[tokio::test(start_paused = true)]
async fn wait_without_token_times_out_after_default_deadline() {
    let listener = CommitListener::new("waiting");

    let started = Instant::now();
    let outcome = listener.wait_for_projection(|_: &NeverWritten| true, None).await;
    let elapsed = started.elapsed();

    match outcome {
        WaitOutcome::TimedOut { attempts, .. } => {
            // one scan per 200ms over 10s
            assert!((49..=51).contains(&attempts), "attempts = {}", attempts);
        }
        other => panic!("expected TimedOut, got {:?}", other),
    }
    assert!(elapsed >= Duration::from_secs(10));
    assert!(elapsed < Duration::from_millis(10_250));
}

#[tokio::test]
async fn wait_finds_second_document_after_evaluating_first() {
    let listener = CommitListener::builder()
        .category("waiting")
        .poll_interval(Duration::from_millis(20))
        .build()
        .unwrap();
    let mut session = FakeSession::new(Arc::new(listener.clone()));

    let evaluated = Arc::new(Seen::default());
    let seen = Arc::clone(&evaluated);
    let waiting = listener.spawn_wait_for_projection(
        move |f: &Foo| {
            seen.push(f.id);
            f.id == 2
        },
        None,
    );

    session.store(Document::new(Foo::new(1)));
    session.save_changes();
    tokio::time::sleep(Duration::from_millis(60)).await;
    session.store(Document::new(Foo::new(2)));
    session.save_changes();

    let outcome = waiting.await.unwrap();
    match outcome {
        WaitOutcome::Found { index, document } => {
            assert_eq!(index, 1);
            assert_eq!(document.id, 2);
        }
        other => panic!("expected Found, got {:?}", other),
    }
    assert_eq!(evaluated.ids(), vec![1, 2]);
}

#[tokio::test]
async fn wait_only_matches_exact_type() {
    let listener = CommitListener::builder()
        .poll_interval(Duration::from_millis(10))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let mut session = FakeSession::new(Arc::new(listener.clone()));

    session.store(Document::new(Box::new(Foo::new(1))));
    session.store(Document::new(Arc::new(Foo::new(1))));
    session.save_changes();

    let outcome = listener.wait_for_projection(|_: &Foo| true, None).await;
    assert!(matches!(outcome, WaitOutcome::TimedOut { .. }));
}

#[tokio::test]
async fn wait_returns_first_match_in_commit_order() {
    let listener = CommitListener::new("waiting");
    let mut session = FakeSession::new(Arc::new(listener.clone()));

    session.store(Document::new(Foo::new(3)));
    session.store(Document::new(NeverWritten));
    session.store(Document::new(Foo::new(4)));
    session.save_changes();

    let outcome = listener.wait_for_projection(|f: &Foo| f.id > 2, None).await;
    match outcome {
        WaitOutcome::Found { index, document } => {
            assert_eq!(index, 0);
            assert_eq!(document.id, 3);
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn concurrent_waits_resolve_independently() {
    let listener = CommitListener::builder()
        .poll_interval(Duration::from_millis(10))
        .build()
        .unwrap();

    let first = listener.spawn_wait_for_projection(|f: &Foo| f.id == 1, None);
    let second = listener.spawn_wait_for_projection(|f: &Foo| f.id == 2, None);

    let mut session = FakeSession::new(Arc::new(listener.clone()));
    session.store(Document::new(Foo::new(2)));
    session.save_changes();
    session.store(Document::new(Foo::new(1)));
    session.save_changes();

    assert_eq!(first.await.unwrap().into_result().unwrap().id, 1);
    assert_eq!(second.await.unwrap().into_result().unwrap().id, 2);
}

/// Order-preserving record of predicate calls
#[derive(Default)]
struct Seen(Mutex<Vec<u32>>);

impl Seen {
    fn push(&self, id: u32) {
        self.0.lock().unwrap().push(id);
    }

    fn ids(&self) -> Vec<u32> {
        self.0.lock().unwrap().clone()
    }
}
