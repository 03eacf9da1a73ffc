//! Board status filters and the bounty queries they produce.
//!
//! These tests verify:
//! 1. A refresh loads the first board page and the matching total
//! 2. Toggling a status checkbox refetches page 1 with the reset flag set
//! 3. Toggling the same status off restores the unfiltered board
//! 4. The language filter rides along on every board query
//! 5. A shrinking result set clamps the selection
//! 6. A failed fetch leaves the last page on screen

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
async fn refresh_loads_the_first_board_page() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    assert!(app.board_loading);
    settle(&mut app).await;

    assert!(!app.board_loading);
    assert_eq!(app.bounties.len(), 5, "one page of cards");
    assert_eq!(app.bounties_total, 9);
    assert_eq!(app.bounties[0].title, "Fix invoice expiry race", "newest first");
    assert!(app.workspace.is_some());
}

#[tokio::test]
async fn toggling_a_status_refetches_page_one_with_reset() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    store.clear_calls().await;

    app.update(Message::ToggleStatus(BountyStatus::Open))
        .await
        .unwrap();
    settle(&mut app).await;

    let calls = store.calls().await;
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        StoreCall::GetBounties { workspace_uuid, query } => {
            assert_eq!(workspace_uuid, WS);
            assert_eq!(query.page, 1);
            assert!(query.reset_page, "filter changes restart the paging");
            assert!(query.status.is_set(BountyStatus::Open));
            assert!(!query.status.is_set(BountyStatus::Paid));
            assert_eq!(query.language, None);
        }
        other => panic!("unexpected call: {other:?}"),
    }

    assert_eq!(app.bounties.len(), 3);
    assert_eq!(app.bounties_total, 3);
    assert!(app.bounties.iter().all(|b| b.status == BountyStatus::Open));
}

#[tokio::test]
async fn toggling_off_restores_the_unfiltered_board() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;

    app.update(Message::ToggleStatus(BountyStatus::Open))
        .await
        .unwrap();
    settle(&mut app).await;
    assert_eq!(app.bounties_total, 3);

    app.update(Message::ToggleStatus(BountyStatus::Open))
        .await
        .unwrap();
    settle(&mut app).await;

    assert!(!app.status_filters.any());
    assert_eq!(app.bounties_total, 9, "empty selection shows everything");
    assert_eq!(app.bounties.len(), 5);
}

#[tokio::test]
async fn statuses_combine_as_a_union() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;

    app.update(Message::ToggleStatus(BountyStatus::Completed))
        .await
        .unwrap();
    settle(&mut app).await;
    assert_eq!(app.bounties_total, 2);

    app.update(Message::ToggleStatus(BountyStatus::Paid))
        .await
        .unwrap();
    settle(&mut app).await;

    assert_eq!(app.bounties_total, 4);
    assert!(app
        .bounties
        .iter()
        .all(|b| matches!(b.status, BountyStatus::Completed | BountyStatus::Paid)));
}

#[tokio::test]
async fn language_filter_rides_along() {
    let (mut app, _store) = test_app();
    app.language_filter = Some("Rust".to_string());
    app.refresh_all();
    settle(&mut app).await;

    assert_eq!(app.bounties_total, 3);
    assert!(app
        .bounties
        .iter()
        .all(|b| b.languages.contains(&"Rust".to_string())));

    app.update(Message::ToggleStatus(BountyStatus::Open))
        .await
        .unwrap();
    settle(&mut app).await;

    assert_eq!(app.bounties_total, 1, "language and status stack");
    assert_eq!(app.bounties[0].title, "Fix invoice expiry race");
}

#[tokio::test]
async fn filter_shrink_clamps_the_selection() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    app.board_selected = 4;

    app.update(Message::ToggleStatus(BountyStatus::Open))
        .await
        .unwrap();
    settle(&mut app).await;

    assert_eq!(app.bounties.len(), 3);
    assert_eq!(app.board_selected, 2, "selection clamped to the last row");
}

#[tokio::test]
async fn filter_popover_opens_and_closes() {
    let (mut app, _store) = test_app();
    app.update(Message::OpenStatusFilter).await.unwrap();
    assert!(app.show_status_filter());

    app.update(Message::CloseModal).await.unwrap();
    assert!(app.modal.is_none());
}

#[tokio::test]
async fn board_fetch_failure_keeps_the_list() {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    store.fail_on("get_workspace_bounties").await;

    app.update(Message::ToggleStatus(BountyStatus::Paid))
        .await
        .unwrap();
    settle(&mut app).await;

    assert!(!app.board_loading);
    assert_eq!(app.bounties.len(), 5, "stale page stays on screen");
    assert!(
        app.status_filters.is_set(BountyStatus::Paid),
        "checkbox state is local and survives the failure"
    );
}
