//! View switching and row selection across the three views.
//!
//! These tests verify:
//! 1. Tab cycles Board -> Planner -> Mission and back
//! 2. Each view keeps its own selection
//! 3. Selection movement is clamped to the loaded rows
//! 4. Mission rows span the feature page and then the repositories
//! 5. Quit is the only message that ends the loop
//! 6. Switching workspace drops the old data before refetching

use std::sync::Arc;

use bountyboard::config::Config;
use bountyboard::store::memory::MemoryStore;
use bountyboard::tui::app::MissionRow;
use bountyboard::tui::{App, Message, View};

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
async fn tab_cycles_the_views() {
    let (mut app, _store) = test_app();
    assert_eq!(app.view, View::Board);

    app.update(Message::NextView).await.unwrap();
    assert_eq!(app.view, View::Planner);
    app.update(Message::NextView).await.unwrap();
    assert_eq!(app.view, View::Mission);
    app.update(Message::NextView).await.unwrap();
    assert_eq!(app.view, View::Board);

    app.update(Message::PrevView).await.unwrap();
    assert_eq!(app.view, View::Mission);
}

#[tokio::test]
async fn selection_moves_within_the_loaded_page() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    assert_eq!(app.bounties.len(), 5);

    app.update(Message::MoveDown).await.unwrap();
    app.update(Message::MoveDown).await.unwrap();
    assert_eq!(app.board_selected, 2);

    app.update(Message::GotoBottom).await.unwrap();
    assert_eq!(app.board_selected, 4);
    app.update(Message::MoveDown).await.unwrap();
    assert_eq!(app.board_selected, 4, "selection stops at the last row");

    app.update(Message::GotoTop).await.unwrap();
    assert_eq!(app.board_selected, 0);
    app.update(Message::MoveUp).await.unwrap();
    assert_eq!(app.board_selected, 0);
}

#[tokio::test]
async fn movement_with_nothing_loaded_is_a_noop() {
    let (mut app, _store) = test_app();
    app.update(Message::MoveDown).await.unwrap();
    app.update(Message::GotoBottom).await.unwrap();
    assert_eq!(app.board_selected, 0);
}

#[tokio::test]
async fn each_view_keeps_its_own_selection() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;

    app.update(Message::MoveDown).await.unwrap();
    assert_eq!(app.board_selected, 1);

    app.update(Message::NextView).await.unwrap();
    app.update(Message::MoveDown).await.unwrap();
    app.update(Message::MoveDown).await.unwrap();
    assert_eq!(app.planner_selected, 2);

    app.update(Message::NextView).await.unwrap();
    app.update(Message::GotoBottom).await.unwrap();

    app.update(Message::NextView).await.unwrap();
    assert_eq!(app.view, View::Board);
    assert_eq!(app.board_selected, 1, "board selection survived the round trip");
}

#[tokio::test]
async fn mission_selection_spans_features_and_repositories() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    app.view = View::Mission;

    assert_eq!(app.features.len(), 4, "first feature page");
    assert_eq!(app.repositories.len(), 3);

    app.update(Message::GotoBottom).await.unwrap();
    assert_eq!(app.mission_selected, app.features.len() + 2);

    let rows = app.mission_rows();
    assert_eq!(rows[0], MissionRow::Feature(0));
    assert_eq!(rows[app.features.len()], MissionRow::Repository(0));
    assert_eq!(rows[app.mission_selected], MissionRow::Repository(2));
}

#[tokio::test]
async fn quit_is_the_only_terminal_message() {
    let (mut app, _store) = test_app();
    assert!(app.update(Message::Quit).await.unwrap());
    assert!(!app.update(Message::NextView).await.unwrap());
    assert!(!app.update(Message::None).await.unwrap());
}

#[tokio::test]
async fn help_toggles_and_closes() {
    let (mut app, _store) = test_app();
    app.update(Message::ToggleHelp).await.unwrap();
    assert!(app.show_help());

    app.update(Message::ToggleHelp).await.unwrap();
    assert!(app.modal.is_none());

    app.update(Message::ToggleHelp).await.unwrap();
    app.update(Message::CloseModal).await.unwrap();
    assert!(app.modal.is_none());
}

#[tokio::test]
async fn spinner_only_ticks_while_loading() {
    let (mut app, _store) = test_app();
    app.tick_spinner();
    assert_eq!(app.spinner_frame, 0, "idle app does not animate");

    app.refresh_all();
    assert!(app.anything_loading());
    app.tick_spinner();
    assert_eq!(app.spinner_frame, 1);

    settle(&mut app).await;
    assert!(!app.anything_loading());
}

#[tokio::test]
async fn switching_workspace_drops_the_old_data() {
    let (mut app, _store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    assert_eq!(app.repositories.len(), 3);
    assert_eq!(app.features_count, 10);

    app.set_workspace("ws-relay-widgets".to_string());
    assert!(app.workspace.is_none(), "stale workspace is dropped immediately");
    assert!(app.bounties.is_empty());
    settle(&mut app).await;

    assert_eq!(app.workspace.as_ref().unwrap().name, "Relay Widgets");
    assert!(app.repositories.is_empty());
    assert!(app.features.is_empty());
    assert_eq!(app.features_count, 0);
    assert_eq!(app.feature_pager.total_pages(), 0);
}
