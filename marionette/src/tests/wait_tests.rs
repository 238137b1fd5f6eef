//! Wait semantics under a paused tokio clock: timing here is deterministic,
//! advanced only by the runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::fake::{FakeNode, FakeSession};
use crate::matcher::TextQuery;
use crate::wait::{WaitConfig, WaitCoordinator};

fn screen_with(text: &str) -> FakeNode {
    FakeNode::container().with_child(FakeNode::button(text))
}

#[tokio::test(start_paused = true)]
async fn wait_finds_element_that_appears_later() {
    super::init_tracing();
    let session = Arc::new(FakeSession::new());
    session.set_root(FakeNode::container());
    let coordinator = WaitCoordinator::new(session.clone());

    let screen_updater = {
        let session = session.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(450)).await;
            session.set_root(screen_with("X"));
        })
    };

    let started = tokio::time::Instant::now();
    let hit = coordinator
        .wait_for_match(&TextQuery::containing("X"), Duration::from_millis(1000))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    let hit = hit.expect("element appeared within the timeout");
    assert_eq!(hit.attributes().text, "X");
    // Found within one poll tick of appearance.
    assert!(
        elapsed >= Duration::from_millis(400) && elapsed <= Duration::from_millis(700),
        "elapsed {elapsed:?}"
    );

    drop(hit);
    assert!(session.counters().balanced());
    screen_updater.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn wait_times_out_when_element_never_appears() {
    let session = Arc::new(FakeSession::new());
    session.set_root(screen_with("something else"));
    let coordinator = WaitCoordinator::new(session.clone());

    let started = tokio::time::Instant::now();
    let hit = coordinator
        .wait_for_match(&TextQuery::containing("X"), Duration::from_millis(500))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(hit.is_none());
    assert!(
        elapsed >= Duration::from_millis(500) && elapsed < Duration::from_millis(700),
        "elapsed {elapsed:?}"
    );
    assert!(session.counters().balanced());
}

#[tokio::test(start_paused = true)]
async fn wait_returns_immediately_when_element_is_present() {
    let session = Arc::new(FakeSession::new());
    session.set_root(screen_with("X"));
    let coordinator = WaitCoordinator::new(session.clone());

    let started = tokio::time::Instant::now();
    let hit = coordinator
        .wait_for_match(&TextQuery::containing("X"), Duration::from_secs(5))
        .await
        .unwrap();

    assert!(hit.is_some());
    assert!(started.elapsed() < Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn wait_without_root_polls_until_timeout() {
    let session = Arc::new(FakeSession::new());
    let coordinator = WaitCoordinator::new(session.clone());

    let hit = coordinator
        .wait_for_match(&TextQuery::containing("X"), Duration::from_millis(400))
        .await
        .unwrap();
    assert!(hit.is_none());
}

#[tokio::test(start_paused = true)]
async fn cancellation_ends_the_wait_early() {
    let session = Arc::new(FakeSession::new());
    session.set_root(FakeNode::container());
    let coordinator = WaitCoordinator::new(session.clone());

    let cancel = CancellationToken::new();
    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            cancel.cancel();
        })
    };

    let started = tokio::time::Instant::now();
    let hit = coordinator
        .wait_for_match_with_cancel(
            &TextQuery::containing("X"),
            Duration::from_secs(30),
            &cancel,
        )
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(hit.is_none());
    assert!(
        elapsed < Duration::from_millis(400),
        "cancelled wait returned after {elapsed:?}"
    );
    canceller.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn poll_interval_is_configurable() {
    let session = Arc::new(FakeSession::new());
    session.set_root(FakeNode::container());
    let coordinator = WaitCoordinator::with_config(
        session.clone(),
        WaitConfig {
            poll_interval: Duration::from_millis(50),
            ..Default::default()
        },
    );

    let screen_updater = {
        let session = session.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(120)).await;
            session.set_root(screen_with("X"));
        })
    };

    let started = tokio::time::Instant::now();
    let hit = coordinator
        .wait_for_match(&TextQuery::containing("X"), Duration::from_secs(1))
        .await
        .unwrap();

    assert!(hit.is_some());
    assert!(started.elapsed() <= Duration::from_millis(200));
    screen_updater.await.unwrap();
}
