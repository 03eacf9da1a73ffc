//! Planner feed paging: page 1 replaces the cards, later pages append.
//!
//! These tests verify:
//! 1. A refresh loads the first feed page
//! 2. Load-more appends the next page and tracks the remaining count
//! 3. Load-more is gated once everything is loaded or a fetch is in flight
//! 4. Feed failures surface on the feed and leave the cards alone
//! 5. The feed ignores the board's filters
//! 6. A refresh restarts the feed from page 1

use std::sync::Arc;

use bountyboard::config::Config;
use bountyboard::data::BountyStatus;
use bountyboard::store::memory::{MemoryStore, StoreCall};
use bountyboard::tui::{App, Message};

const WS: &str = "ws-lightning-tools";

fn test_app() -> (App, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    let app = App::new(Config::default(), store.clone(), WS.to_string());
    (app, store)
}

/// Let spawned fetch tasks finish, then apply their events.
async fn settle(app: &mut App) {
    for _ in 0..4 {
        tokio::task::yield_now().await;
        app.poll_store_events();
    }
}

#[tokio::test]
async fn first_page_fills_the_feed() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;

    assert_eq!(app.feed.cards.len(), 5);
    assert_eq!(app.feed.total, 9);
    assert_eq!(app.feed.current_page, 1);
    assert!(app.feed.has_more());
    assert!(!app.feed.loading);
    assert_eq!(app.feed.error, None);
}

#[tokio::test]
async fn load_more_appends_the_next_page() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    store.clear_calls().await;

    app.update(Message::LoadMore).await.unwrap();
    assert!(app.feed.loading);
    settle(&mut app).await;

    assert_eq!(app.feed.cards.len(), 9, "page two lands after page one");
    assert_eq!(app.feed.current_page, 2);
    assert!(!app.feed.has_more());
    assert_eq!(app.feed.cards[5].title, "Relay health dashboard");
    assert_eq!(app.feed.cards[8].title, "Rate limit middleware");

    let calls = store.calls().await;
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        StoreCall::GetBounties { query, .. } => {
            assert_eq!(query.page, 2);
            assert!(!query.reset_page);
            assert!(!query.status.any(), "the feed never filters");
            assert_eq!(query.language, None);
        }
        other => panic!("unexpected call: {other:?}"),
    }
}

#[tokio::test]
async fn load_more_stops_at_the_end() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;
    assert!(!app.feed.has_more());
    store.clear_calls().await;

    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;

    assert!(store.calls().await.is_empty(), "nothing left to fetch");
    assert_eq!(app.feed.cards.len(), 9);
}

#[tokio::test]
async fn load_more_does_not_stack_requests() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    store.clear_calls().await;

    app.update(Message::LoadMore).await.unwrap();
    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;

    assert_eq!(store.calls().await.len(), 1, "second press waits for the first");
    assert_eq!(app.feed.cards.len(), 9);
}

#[tokio::test]
async fn load_more_before_the_first_page_is_a_noop() {
    let (mut app, store) = test_app();
    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;
    assert!(store.calls().await.is_empty());
    assert!(app.feed.cards.is_empty());
}

#[tokio::test]
async fn feed_failure_is_published_and_recoverable() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    store.fail_on("get_workspace_bounties").await;

    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;

    let error = app.feed.error.as_deref().unwrap();
    assert!(error.contains("backend unavailable"), "got: {error}");
    assert!(!app.feed.loading);
    assert_eq!(app.feed.cards.len(), 5, "loaded cards stay on screen");
    assert_eq!(app.feed.current_page, 1);
    assert!(app.feed.has_more(), "the failed page can be retried");

    store.clear_failures().await;
    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;

    assert_eq!(app.feed.error, None, "a good page clears the error");
    assert_eq!(app.feed.cards.len(), 9);
}

#[tokio::test]
async fn board_filters_do_not_reach_the_feed() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    app.update(Message::ToggleStatus(BountyStatus::Open))
        .await
        .unwrap();
    settle(&mut app).await;
    assert_eq!(app.bounties_total, 3);
    store.clear_calls().await;

    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;

    match &store.calls().await[0] {
        StoreCall::GetBounties { query, .. } => assert!(!query.status.any()),
        other => panic!("unexpected call: {other:?}"),
    }
    assert_eq!(app.feed.cards.len(), 9, "feed ignores the board's filters");
}

#[tokio::test]
async fn refresh_restarts_the_feed_from_page_one() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    app.update(Message::LoadMore).await.unwrap();
    settle(&mut app).await;
    assert_eq!(app.feed.cards.len(), 9);

    app.update(Message::Refresh).await.unwrap();
    settle(&mut app).await;

    assert_eq!(app.feed.current_page, 1);
    assert_eq!(app.feed.cards.len(), 5, "page one replaces the whole list");
}
