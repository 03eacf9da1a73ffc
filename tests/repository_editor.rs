//! Repository add, edit, and delete, including the confirmation step.
//!
//! These tests verify:
//! 1. The add form opens empty; activate opens the edit form pre-filled
//! 2. Form keys edit whichever field holds focus
//! 3. A save closes the modal and refetches the list; failures keep the draft
//! 4. Delete asks first, cancel returns to the editor with the form intact
//! 5. A confirmed delete closes the editor before the call, so a failure
//!    leaves the list alone with no modal on screen

use std::sync::Arc;

use bountyboard::config::Config;
use bountyboard::store::memory::{MemoryStore, StoreCall};
use bountyboard::store::RepositoryUpsert;
use bountyboard::tui::app::RepoField;
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

/// App refreshed and sitting on the mission view, calls cleared.
async fn ready_app() -> (App, Arc<MemoryStore>) {
    let (mut app, store) = test_app();
    app.refresh_all();
    settle(&mut app).await;
    app.view = View::Mission;
    store.clear_calls().await;
    (app, store)
}

/// Select the repository row at `idx` and open the editor on it. Mission
/// rows list the feature page first, then the repositories.
async fn open_editor_for(app: &mut App, idx: usize) {
    app.mission_selected = app.features.len() + idx;
    app.update(Message::Activate).await.unwrap();
    assert!(app.show_repo_editor());
}

// ============================================================================
// Form mechanics
// ============================================================================

#[tokio::test]
async fn add_form_opens_empty() {
    let (mut app, _store) = ready_app().await;
    app.update(Message::NewRepository).await.unwrap();

    assert!(app.show_repo_editor());
    assert!(!app.repo_form.is_edit());
    assert_eq!(app.repo_form.name, "");
    assert_eq!(app.repo_form.url, "");
    assert_eq!(app.repo_form.focus, RepoField::Name);
}

#[tokio::test]
async fn form_keys_edit_the_focused_field() {
    let (mut app, _store) = ready_app().await;
    app.update(Message::NewRepository).await.unwrap();

    for c in "kit".chars() {
        app.update(Message::FormInput(c)).await.unwrap();
    }
    app.update(Message::FormBackspace).await.unwrap();
    assert_eq!(app.repo_form.name, "ki");

    app.update(Message::FormNextField).await.unwrap();
    assert_eq!(app.repo_form.focus, RepoField::Url);
    app.update(Message::FormInput('u')).await.unwrap();
    assert_eq!(app.repo_form.url, "u");
    assert_eq!(app.repo_form.name, "ki", "name is left alone");

    app.update(Message::FormNextField).await.unwrap();
    assert_eq!(app.repo_form.focus, RepoField::Name, "focus wraps");
}

#[tokio::test]
async fn activate_opens_the_editor_for_the_selected_repository() {
    let (mut app, _store) = ready_app().await;
    open_editor_for(&mut app, 1).await;

    assert!(app.repo_form.is_edit());
    assert_eq!(app.repo_form.uuid.as_deref(), Some("repo-payments-service"));
    assert_eq!(app.repo_form.name, "payments-service");
    assert_eq!(
        app.repo_form.url,
        "https://github.com/example/payments-service"
    );
}

// ============================================================================
// Saving
// ============================================================================

#[tokio::test]
async fn saving_a_new_repository_refetches_the_list() {
    let (mut app, store) = ready_app().await;
    app.update(Message::NewRepository).await.unwrap();
    app.repo_form.name = "relay-proxy".to_string();
    app.repo_form.url = "https://github.com/example/relay-proxy".to_string();

    app.update(Message::FormSubmit).await.unwrap();

    let calls = store.calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        StoreCall::UpsertRepository(RepositoryUpsert {
            uuid: None,
            workspace_uuid: WS.to_string(),
            name: "relay-proxy".to_string(),
            url: "https://github.com/example/relay-proxy".to_string(),
        })
    );
    assert_eq!(
        calls[1],
        StoreCall::GetRepositories {
            workspace_uuid: WS.to_string(),
        }
    );

    assert!(app.modal.is_none());
    assert_eq!(app.repositories.len(), 4);
    assert!(app.repositories.iter().any(|r| r.name == "relay-proxy"));
    assert_eq!(app.repo_form.name, "", "form resets after a save");
}

#[tokio::test]
async fn saving_an_edit_keeps_the_row_count() {
    let (mut app, store) = ready_app().await;
    open_editor_for(&mut app, 2).await;
    app.repo_form.name = "widget-kit-v2".to_string();

    app.update(Message::FormSubmit).await.unwrap();

    match &store.calls().await[0] {
        StoreCall::UpsertRepository(upsert) => {
            assert_eq!(upsert.uuid.as_deref(), Some("repo-widget-kit"));
            assert_eq!(upsert.name, "widget-kit-v2");
        }
        other => panic!("expected an upsert, got {other:?}"),
    }
    assert_eq!(app.repositories.len(), 3, "edit must not add a row");
    assert!(app
        .repositories
        .iter()
        .any(|r| r.uuid == "repo-widget-kit" && r.name == "widget-kit-v2"));
}

#[tokio::test]
async fn incomplete_form_is_not_saved() {
    let (mut app, store) = ready_app().await;
    app.update(Message::NewRepository).await.unwrap();
    app.repo_form.name = "relay-proxy".to_string();

    app.update(Message::FormSubmit).await.unwrap();

    assert!(store.calls().await.is_empty());
    assert!(app.show_repo_editor(), "modal stays up for another try");
    assert_eq!(app.repo_form.name, "relay-proxy");
}

#[tokio::test]
async fn failed_save_keeps_the_modal_and_draft() {
    let (mut app, store) = ready_app().await;
    store.fail_on("create_or_update_repository").await;
    app.update(Message::NewRepository).await.unwrap();
    app.repo_form.name = "relay-proxy".to_string();
    app.repo_form.url = "https://github.com/example/relay-proxy".to_string();

    app.update(Message::FormSubmit).await.unwrap();

    assert_eq!(store.calls().await.len(), 1, "no refetch after a failed save");
    assert!(app.show_repo_editor());
    assert_eq!(app.repo_form.name, "relay-proxy");
    assert_eq!(app.repositories.len(), 3);
}

// ============================================================================
// Deleting
// ============================================================================

#[tokio::test]
async fn delete_requires_an_edit_session() {
    let (mut app, _store) = ready_app().await;
    app.update(Message::NewRepository).await.unwrap();
    app.update(Message::RequestDelete).await.unwrap();

    assert!(
        app.show_repo_editor(),
        "nothing to delete while adding a repository"
    );
}

#[tokio::test]
async fn cancel_returns_to_the_editor_with_the_form_intact() {
    let (mut app, store) = ready_app().await;
    open_editor_for(&mut app, 0).await;
    app.update(Message::RequestDelete).await.unwrap();
    assert!(app.show_confirm_delete());

    app.update(Message::CancelDelete).await.unwrap();

    assert!(app.show_repo_editor());
    assert_eq!(app.repo_form.name, "bounty-engine");
    assert_eq!(app.repo_form.uuid.as_deref(), Some("repo-bounty-engine"));
    assert_eq!(app.repositories.len(), 3);
    assert!(store.calls().await.is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_and_refetches() {
    let (mut app, store) = ready_app().await;
    open_editor_for(&mut app, 2).await;
    app.update(Message::RequestDelete).await.unwrap();

    app.update(Message::ConfirmDelete).await.unwrap();

    let calls = store.calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        StoreCall::DeleteRepository {
            workspace_uuid: WS.to_string(),
            repo_uuid: "repo-widget-kit".to_string(),
        }
    );
    assert_eq!(
        calls[1],
        StoreCall::GetRepositories {
            workspace_uuid: WS.to_string(),
        }
    );

    assert!(app.modal.is_none());
    assert_eq!(app.repositories.len(), 2);
    assert!(app.repositories.iter().all(|r| r.uuid != "repo-widget-kit"));
    assert!(!app.repo_form.is_edit(), "form is cleared with the modal");
}

#[tokio::test]
async fn failed_delete_leaves_the_list_alone() {
    let (mut app, store) = ready_app().await;
    store.fail_on("delete_repository").await;
    open_editor_for(&mut app, 0).await;
    app.update(Message::RequestDelete).await.unwrap();

    app.update(Message::ConfirmDelete).await.unwrap();

    let calls = store.calls().await;
    assert_eq!(calls.len(), 1, "no refetch after a failed delete");
    assert!(matches!(calls[0], StoreCall::DeleteRepository { .. }));
    assert!(app.modal.is_none(), "the editor closed before the call");
    assert_eq!(app.repositories.len(), 3, "list is unchanged");
}

#[tokio::test]
async fn confirm_without_a_pending_delete_is_a_noop() {
    let (mut app, store) = ready_app().await;
    app.update(Message::ConfirmDelete).await.unwrap();
    assert!(store.calls().await.is_empty());

    open_editor_for(&mut app, 0).await;
    app.update(Message::ConfirmDelete).await.unwrap();
    assert!(
        store.calls().await.is_empty(),
        "the editor alone is not a confirmation"
    );
    assert!(app.show_repo_editor());
}
