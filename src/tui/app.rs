use crate::config::Config;
use crate::data::{BountyCard, Feature, Repository, StatusFilters, Workspace};
use crate::store::{
    send_event, ApiStore, BountyPage, BountyQuery, FeatureUpsert, MissionUpdate, RepositoryUpsert,
    StoreEvent, TacticsUpdate,
};
use crate::tui::editor::FieldEditor;
use crate::tui::pager::{total_pages, JumpPolicy, PageWindow};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Braille spinner frames for loading animation
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Dashboard views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Board,
    Planner,
    Mission,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Board => "Bounties",
            View::Planner => "Planner",
            View::Mission => "Mission",
        }
    }

    pub fn all() -> [View; 3] {
        [View::Board, View::Planner, View::Mission]
    }

    pub fn next(&self) -> View {
        match self {
            View::Board => View::Planner,
            View::Planner => View::Mission,
            View::Mission => View::Board,
        }
    }

    pub fn prev(&self) -> View {
        match self {
            View::Board => View::Mission,
            View::Planner => View::Board,
            View::Mission => View::Planner,
        }
    }
}

/// Which mission text field an editor message targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionField {
    Mission,
    Tactics,
}

impl MissionField {
    pub fn label(&self) -> &'static str {
        match self {
            MissionField::Mission => "Mission",
            MissionField::Tactics => "Tactics",
        }
    }
}

/// Fields of the repository editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoField {
    #[default]
    Name,
    Url,
}

/// Repository editor form. `uuid` is `Some` in edit mode, `None` in add mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepoForm {
    pub uuid: Option<String>,
    pub name: String,
    pub url: String,
    pub focus: RepoField,
}

impl RepoForm {
    pub fn for_edit(repo: &Repository) -> Self {
        Self {
            uuid: Some(repo.uuid.clone()),
            name: repo.name.clone(),
            url: repo.url.clone(),
            focus: RepoField::Name,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.uuid.is_some()
    }

    fn focused_text_mut(&mut self) -> &mut String {
        match self.focus {
            RepoField::Name => &mut self.name,
            RepoField::Url => &mut self.url,
        }
    }
}

/// New-feature modal form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureForm {
    pub name: String,
}

/// The planner's bounty-card feed: cards plus the pagination the backend
/// reports. Page 1 replaces the list, later pages append.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlannerFeed {
    pub cards: Vec<BountyCard>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_page: usize,
    pub page_size: usize,
    pub total: u64,
}

impl PlannerFeed {
    pub fn has_more(&self) -> bool {
        self.current_page * self.page_size < self.total as usize
    }

    pub fn reset(&mut self) {
        self.cards.clear();
        self.error = None;
        self.current_page = 0;
        self.total = 0;
    }

    pub fn apply_page(&mut self, page: usize, result: BountyPage) {
        if page <= 1 {
            self.cards = result.bounties;
        } else {
            self.cards.extend(result.bounties);
        }
        self.current_page = page;
        self.total = result.total;
        self.error = None;
    }
}

/// Active modal state - only one modal can be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    StatusFilter,
    RepoEditor,
    /// Confirmation layered over the repository editor; the form survives a
    /// cancel.
    ConfirmDelete,
    NewFeature,
}

impl ModalState {
    pub fn is_none(&self) -> bool {
        matches!(self, ModalState::None)
    }
}

pub struct App {
    pub config: Arc<Config>,
    pub store: Arc<dyn ApiStore>,

    // Active workspace
    pub workspace_uuid: String,
    pub workspace: Option<Workspace>,
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub last_refresh: Option<DateTime<Local>>,

    // View + per-view selection
    pub view: View,
    pub board_selected: usize,
    pub planner_selected: usize,
    pub mission_selected: usize,

    pub modal: ModalState,

    // Board (bounty list) state
    pub status_filters: StatusFilters,
    pub language_filter: Option<String>,
    pub bounties: Vec<BountyCard>,
    pub bounties_total: u64,
    pub board_loading: bool,

    // Planner feed
    pub feed: PlannerFeed,

    // Mission panel state
    pub mission_editor: FieldEditor,
    pub tactics_editor: FieldEditor,
    pub focused_field: Option<MissionField>,
    pub features: Vec<Feature>,
    pub features_count: u64,
    pub feature_pager: PageWindow,
    pub features_loading: bool,
    pub repositories: Vec<Repository>,

    // Modal forms
    pub repo_form: RepoForm,
    pub feature_form: FeatureForm,

    /// Channel for background read results; the receiver is taken and
    /// restored by `poll_store_events`.
    pub events_tx: mpsc::Sender<StoreEvent>,
    pub events_rx: Option<mpsc::Receiver<StoreEvent>>,
}

// Modal state accessors
impl App {
    pub fn show_help(&self) -> bool {
        matches!(self.modal, ModalState::Help)
    }

    pub fn show_status_filter(&self) -> bool {
        matches!(self.modal, ModalState::StatusFilter)
    }

    pub fn show_repo_editor(&self) -> bool {
        matches!(self.modal, ModalState::RepoEditor)
    }

    pub fn show_confirm_delete(&self) -> bool {
        matches!(self.modal, ModalState::ConfirmDelete)
    }

    pub fn show_new_feature(&self) -> bool {
        matches!(self.modal, ModalState::NewFeature)
    }

    /// Whether a mission text editor currently owns the keyboard.
    pub fn editing_text(&self) -> bool {
        match self.focused_field {
            Some(MissionField::Mission) => self.mission_editor.is_editing(),
            Some(MissionField::Tactics) => self.tactics_editor.is_editing(),
            None => false,
        }
    }
}

/// What one selectable row in the mission view points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionRow {
    Feature(usize),
    Repository(usize),
}

impl App {
    pub fn new(config: Config, store: Arc<dyn ApiStore>, workspace_uuid: String) -> Self {
        let policy = if config.ui.realign_page_jumps {
            JumpPolicy::Realign
        } else {
            JumpPolicy::KeepWindow
        };
        let page_size = config.paging.bounty_page_size;
        let (events_tx, events_rx) = mpsc::channel(100);
        Self {
            config: Arc::new(config),
            store,
            workspace_uuid,
            workspace: None,
            is_loading: false,
            spinner_frame: 0,
            last_refresh: None,
            view: View::Board,
            board_selected: 0,
            planner_selected: 0,
            mission_selected: 0,
            modal: ModalState::None,
            status_filters: StatusFilters::default(),
            language_filter: None,
            bounties: Vec::new(),
            bounties_total: 0,
            board_loading: false,
            feed: PlannerFeed {
                page_size,
                ..PlannerFeed::default()
            },
            mission_editor: FieldEditor::default(),
            tactics_editor: FieldEditor::default(),
            focused_field: None,
            features: Vec::new(),
            features_count: 0,
            feature_pager: PageWindow::with_policy(0, policy),
            features_loading: false,
            repositories: Vec::new(),
            repo_form: RepoForm::default(),
            feature_form: FeatureForm::default(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Process a message and update app state (Elm Architecture update function).
    ///
    /// Returns `Ok(true)` if the app should quit, `Ok(false)` to continue.
    pub async fn update(&mut self, msg: super::Message) -> Result<bool> {
        use super::Message;
        match msg {
            // ─────────────────────────────────────────────────────────────────
            // App lifecycle
            // ─────────────────────────────────────────────────────────────────
            Message::Quit => return Ok(true),
            Message::Refresh => self.refresh_all(),

            // ─────────────────────────────────────────────────────────────────
            // Views & navigation
            // ─────────────────────────────────────────────────────────────────
            Message::NextView => self.view = self.view.next(),
            Message::PrevView => self.view = self.view.prev(),
            Message::MoveUp => self.move_selection(-1),
            Message::MoveDown => self.move_selection(1),
            Message::GotoTop => self.set_selection(0),
            Message::GotoBottom => {
                let last = self.selection_len().saturating_sub(1);
                self.set_selection(last);
            }
            Message::Activate => self.activate_selection().await,

            // ─────────────────────────────────────────────────────────────────
            // Board
            // ─────────────────────────────────────────────────────────────────
            Message::OpenStatusFilter => self.modal = ModalState::StatusFilter,
            Message::ToggleStatus(status) => {
                self.status_filters.toggle(status);
                self.fetch_board_page(1, true);
            }
            Message::PostBounty => self.open_post_bounty(),

            // ─────────────────────────────────────────────────────────────────
            // Planner feed
            // ─────────────────────────────────────────────────────────────────
            Message::LoadMore => {
                if self.feed.has_more() && !self.feed.loading {
                    self.feed.loading = true;
                    self.spawn_feed_fetch(self.feed.current_page + 1);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Mission text editors
            // ─────────────────────────────────────────────────────────────────
            Message::EditMission => self.begin_edit(MissionField::Mission),
            Message::EditTactics => self.begin_edit(MissionField::Tactics),
            Message::EditorInput(c) => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.push_char(c);
                }
            }
            Message::EditorBackspace => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.backspace();
                }
            }
            Message::EditorNewline => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.push_newline();
                }
            }
            Message::EditorCancel => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.cancel();
                }
                self.focused_field = None;
            }
            Message::EditorSubmit => self.submit_focused_editor().await,

            // ─────────────────────────────────────────────────────────────────
            // Feature page tabs
            // ─────────────────────────────────────────────────────────────────
            Message::PageNext => {
                let next = self.feature_pager.advance();
                self.apply_pager(next);
            }
            Message::PagePrev => {
                let next = self.feature_pager.retreat();
                self.apply_pager(next);
            }
            Message::PageJumpSlot(slot) => {
                if let Some(&page) = self.feature_pager.tabs().get(slot) {
                    let next = self.feature_pager.jump(page);
                    self.apply_pager(next);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Mission modals
            // ─────────────────────────────────────────────────────────────────
            Message::NewFeature => {
                self.feature_form = FeatureForm::default();
                self.modal = ModalState::NewFeature;
            }
            Message::NewRepository => {
                self.repo_form = RepoForm::default();
                self.modal = ModalState::RepoEditor;
            }
            Message::FormInput(c) => match self.modal {
                ModalState::RepoEditor => self.repo_form.focused_text_mut().push(c),
                ModalState::NewFeature => self.feature_form.name.push(c),
                _ => {}
            },
            Message::FormBackspace => match self.modal {
                ModalState::RepoEditor => {
                    self.repo_form.focused_text_mut().pop();
                }
                ModalState::NewFeature => {
                    self.feature_form.name.pop();
                }
                _ => {}
            },
            Message::FormNextField => {
                if self.show_repo_editor() {
                    self.repo_form.focus = match self.repo_form.focus {
                        RepoField::Name => RepoField::Url,
                        RepoField::Url => RepoField::Name,
                    };
                }
            }
            Message::FormSubmit => match self.modal {
                ModalState::RepoEditor => self.save_repository().await,
                ModalState::NewFeature => self.create_feature().await,
                _ => {}
            },
            Message::RequestDelete => {
                if self.show_repo_editor() && self.repo_form.is_edit() {
                    self.modal = ModalState::ConfirmDelete;
                }
            }
            Message::ConfirmDelete => self.delete_repository_confirmed().await,
            Message::CancelDelete => {
                if self.show_confirm_delete() {
                    self.modal = ModalState::RepoEditor;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Workspace links
            // ─────────────────────────────────────────────────────────────────
            Message::OpenWebsite => {
                let url = self.workspace.as_ref().and_then(|ws| ws.website.clone());
                self.open_link(url.as_deref(), "website");
            }
            Message::OpenGithub => {
                let url = self.workspace.as_ref().and_then(|ws| ws.github.clone());
                self.open_link(url.as_deref(), "github");
            }

            // ─────────────────────────────────────────────────────────────────
            // Modal toggles
            // ─────────────────────────────────────────────────────────────────
            Message::ToggleHelp => {
                self.modal = if self.show_help() {
                    ModalState::None
                } else {
                    ModalState::Help
                };
            }
            Message::CloseModal => self.modal = ModalState::None,

            // ─────────────────────────────────────────────────────────────────
            // No-op
            // ─────────────────────────────────────────────────────────────────
            Message::None => {}
        }
        Ok(false)
    }

    /// Advance spinner frame (call on tick while anything is loading)
    pub fn tick_spinner(&mut self) {
        if self.anything_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn anything_loading(&self) -> bool {
        self.is_loading || self.board_loading || self.features_loading || self.feed.loading
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Workspace loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Switch to another workspace: drop everything and refetch.
    pub fn set_workspace(&mut self, uuid: String) {
        self.workspace_uuid = uuid;
        self.workspace = None;
        self.bounties.clear();
        self.bounties_total = 0;
        self.feed.reset();
        self.features.clear();
        self.features_count = 0;
        self.feature_pager = self.feature_pager.resized(0);
        self.repositories.clear();
        self.mission_editor = FieldEditor::default();
        self.tactics_editor = FieldEditor::default();
        self.focused_field = None;
        self.board_selected = 0;
        self.planner_selected = 0;
        self.mission_selected = 0;
        self.refresh_all();
    }

    /// Kick off every read for the active workspace. Results arrive as
    /// [`StoreEvent`]s; current data stays on screen until they do.
    pub fn refresh_all(&mut self) {
        self.is_loading = true;
        self.board_loading = true;
        self.features_loading = true;
        self.spawn_workspace_fetch();
        self.spawn_repositories_fetch();
        self.spawn_features_fetch(self.feature_pager.current_page().max(1));
        self.spawn_features_count_fetch();
        self.fetch_board_page(1, true);
        self.feed.reset();
        self.feed.loading = true;
        self.spawn_feed_fetch(1);
    }

    fn spawn_workspace_fetch(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let uuid = self.workspace_uuid.clone();
        tokio::spawn(async move {
            let result = store
                .get_user_workspace_by_uuid(&uuid)
                .await
                .map_err(|e| e.to_string());
            send_event(&tx, StoreEvent::Workspace(result));
        });
    }

    fn spawn_repositories_fetch(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let uuid = self.workspace_uuid.clone();
        tokio::spawn(async move {
            let result = store
                .get_repositories(&uuid)
                .await
                .map_err(|e| e.to_string());
            send_event(&tx, StoreEvent::Repositories(result));
        });
    }

    fn spawn_features_fetch(&self, page: usize) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let uuid = self.workspace_uuid.clone();
        tokio::spawn(async move {
            let result = store
                .get_workspace_features(&uuid, page)
                .await
                .map_err(|e| e.to_string());
            send_event(&tx, StoreEvent::Features { page, result });
        });
    }

    fn spawn_features_count_fetch(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let uuid = self.workspace_uuid.clone();
        tokio::spawn(async move {
            let result = store
                .get_workspace_features_count(&uuid)
                .await
                .map_err(|e| e.to_string());
            send_event(&tx, StoreEvent::FeaturesCount(result));
        });
    }

    /// Fetch one board page with the current filters.
    pub fn fetch_board_page(&mut self, page: usize, reset_page: bool) {
        self.board_loading = true;
        let query = BountyQuery {
            page,
            reset_page,
            status: self.status_filters,
            language: self.language_filter.clone(),
        };
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let uuid = self.workspace_uuid.clone();
        tokio::spawn(async move {
            let result = store
                .get_workspace_bounties(&uuid, &query)
                .await
                .map_err(|e| e.to_string());
            send_event(&tx, StoreEvent::BoardPage(result));
        });
    }

    fn spawn_feed_fetch(&self, page: usize) {
        let query = BountyQuery {
            page,
            reset_page: page <= 1,
            status: StatusFilters::default(),
            language: None,
        };
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let uuid = self.workspace_uuid.clone();
        tokio::spawn(async move {
            let result = store
                .get_workspace_bounties(&uuid, &query)
                .await
                .map_err(|e| e.to_string());
            send_event(&tx, StoreEvent::FeedPage { page, result });
        });
    }

    /// Poll for background read results (non-blocking, call from the tick).
    ///
    /// Returns true if any event was applied. Failures are logged and leave
    /// the affected state as it was; only the planner feed publishes its
    /// error to the screen.
    pub fn poll_store_events(&mut self) -> bool {
        let Some(mut rx) = self.events_rx.take() else {
            return false;
        };

        let mut handled = false;
        while let Ok(event) = rx.try_recv() {
            handled = true;
            match event {
                StoreEvent::Workspace(Ok(Some(ws))) => {
                    self.workspace = Some(ws);
                    self.is_loading = false;
                    self.last_refresh = Some(Local::now());
                }
                StoreEvent::Workspace(Ok(None)) => {
                    tracing::warn!("workspace {} not found", self.workspace_uuid);
                    self.is_loading = false;
                }
                StoreEvent::Workspace(Err(e)) => {
                    tracing::error!("workspace fetch failed: {e}");
                    self.is_loading = false;
                }
                StoreEvent::Repositories(Ok(repos)) => {
                    self.repositories = repos;
                    self.clamp_selections();
                }
                StoreEvent::Repositories(Err(e)) => {
                    tracing::error!("repository fetch failed: {e}");
                }
                StoreEvent::Features { result: Ok(items), .. } => {
                    // Applied even when a newer page was requested meanwhile;
                    // fetches are never cancelled.
                    self.features = items;
                    self.features_loading = false;
                    self.clamp_selections();
                }
                StoreEvent::Features { page, result: Err(e) } => {
                    tracing::error!("feature page {page} fetch failed: {e}");
                    self.features_loading = false;
                }
                StoreEvent::FeaturesCount(Ok(count)) => {
                    self.features_count = count;
                    let pages = total_pages(count, self.config.paging.feature_limit);
                    self.feature_pager = self.feature_pager.resized(pages);
                }
                StoreEvent::FeaturesCount(Err(e)) => {
                    tracing::error!("feature count fetch failed: {e}");
                }
                StoreEvent::BoardPage(Ok(page)) => {
                    self.bounties = page.bounties;
                    self.bounties_total = page.total;
                    self.board_loading = false;
                    self.clamp_selections();
                }
                StoreEvent::BoardPage(Err(e)) => {
                    tracing::error!("bounty fetch failed: {e}");
                    self.board_loading = false;
                }
                StoreEvent::FeedPage { page, result: Ok(body) } => {
                    self.feed.apply_page(page, body);
                    self.feed.loading = false;
                    self.clamp_selections();
                }
                StoreEvent::FeedPage { result: Err(e), .. } => {
                    tracing::warn!("planner feed fetch failed: {e}");
                    self.feed.error = Some(e);
                    self.feed.loading = false;
                }
            }
        }

        self.events_rx = Some(rx);
        handled
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Selectable rows of the mission view: the current feature page, then
    /// the repositories.
    pub fn mission_rows(&self) -> Vec<MissionRow> {
        (0..self.features.len())
            .map(MissionRow::Feature)
            .chain((0..self.repositories.len()).map(MissionRow::Repository))
            .collect()
    }

    fn selection_len(&self) -> usize {
        match self.view {
            View::Board => self.bounties.len(),
            View::Planner => self.feed.cards.len(),
            View::Mission => self.features.len() + self.repositories.len(),
        }
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.view {
            View::Board => &mut self.board_selected,
            View::Planner => &mut self.planner_selected,
            View::Mission => &mut self.mission_selected,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.selection_len();
        if len == 0 {
            return;
        }
        let selected = self.selected_mut();
        let next = selected.saturating_add_signed(delta).min(len - 1);
        *selected = next;
    }

    fn set_selection(&mut self, index: usize) {
        let len = self.selection_len();
        if len == 0 {
            return;
        }
        *self.selected_mut() = index.min(len - 1);
    }

    fn clamp_selections(&mut self) {
        self.board_selected = self
            .board_selected
            .min(self.bounties.len().saturating_sub(1));
        self.planner_selected = self
            .planner_selected
            .min(self.feed.cards.len().saturating_sub(1));
        let mission_len = self.features.len() + self.repositories.len();
        self.mission_selected = self.mission_selected.min(mission_len.saturating_sub(1));
    }

    /// Open the selected row: bounty URL, feature URL, or the repository
    /// editor pre-filled with the selected repository.
    async fn activate_selection(&mut self) {
        match self.view {
            View::Board => {
                let url = self.bounties.get(self.board_selected).map(|b| b.url.clone());
                self.open_link(url.as_deref(), "bounty");
            }
            View::Planner => {
                let url = self
                    .feed
                    .cards
                    .get(self.planner_selected)
                    .map(|b| b.url.clone());
                self.open_link(url.as_deref(), "bounty");
            }
            View::Mission => {
                let row = self.mission_rows().get(self.mission_selected).copied();
                match row {
                    Some(MissionRow::Feature(i)) => {
                        let url = self.features.get(i).map(|f| f.url.clone());
                        self.open_link(url.as_deref(), "feature");
                    }
                    Some(MissionRow::Repository(i)) => {
                        if let Some(repo) = self.repositories.get(i) {
                            self.repo_form = RepoForm::for_edit(repo);
                            self.modal = ModalState::RepoEditor;
                        }
                    }
                    None => {}
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mission text editors
    // ─────────────────────────────────────────────────────────────────────────

    /// Open an editor seeded from the canonical value. Only one field may
    /// hold a draft at a time, and only once the workspace is loaded.
    fn begin_edit(&mut self, field: MissionField) {
        if !self.mission_editor.is_viewing() || !self.tactics_editor.is_viewing() {
            return;
        }
        let Some(ws) = &self.workspace else {
            return;
        };
        let canonical = match field {
            MissionField::Mission => ws.mission.clone(),
            MissionField::Tactics => ws.tactics.clone(),
        }
        .unwrap_or_default();
        match field {
            MissionField::Mission => self.mission_editor.begin(&canonical),
            MissionField::Tactics => self.tactics_editor.begin(&canonical),
        }
        self.focused_field = Some(field);
    }

    fn focused_editor_mut(&mut self) -> Option<&mut FieldEditor> {
        match self.focused_field? {
            MissionField::Mission => Some(&mut self.mission_editor),
            MissionField::Tactics => Some(&mut self.tactics_editor),
        }
    }

    /// Persist the focused draft, then refetch the canonical workspace. On
    /// failure the editor reopens with the draft intact and nothing else
    /// changes.
    async fn submit_focused_editor(&mut self) {
        let Some(field) = self.focused_field else {
            return;
        };
        let draft = match field {
            MissionField::Mission => self.mission_editor.take_submission(),
            MissionField::Tactics => self.tactics_editor.take_submission(),
        };
        let Some(draft) = draft else {
            return;
        };

        let owner_pubkey = self.config.identity.owner_pubkey.clone();
        let uuid = self.workspace_uuid.clone();
        let result = match field {
            MissionField::Mission => {
                self.store
                    .update_workspace_mission(MissionUpdate {
                        uuid,
                        owner_pubkey,
                        mission: draft,
                    })
                    .await
            }
            MissionField::Tactics => {
                self.store
                    .update_workspace_tactics(TacticsUpdate {
                        uuid,
                        owner_pubkey,
                        tactics: draft,
                    })
                    .await
            }
        };

        let ok = result.is_ok();
        if let Err(e) = result {
            tracing::error!("{} update failed: {e:#}", field.label());
        }
        match field {
            MissionField::Mission => self.mission_editor.finish_submission(ok),
            MissionField::Tactics => self.tactics_editor.finish_submission(ok),
        }
        if ok {
            self.refetch_workspace().await;
            self.focused_field = None;
        }
    }

    async fn refetch_workspace(&mut self) {
        match self
            .store
            .get_user_workspace_by_uuid(&self.workspace_uuid)
            .await
        {
            Ok(Some(ws)) => {
                self.workspace = Some(ws);
                self.last_refresh = Some(Local::now());
            }
            Ok(None) => tracing::warn!("workspace {} not found", self.workspace_uuid),
            Err(e) => tracing::error!("workspace refetch failed: {e:#}"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Feature pager
    // ─────────────────────────────────────────────────────────────────────────

    /// Install a new page window; a changed current page refetches that page
    /// of features, exactly once per change.
    fn apply_pager(&mut self, next: PageWindow) {
        let page_changed = next.current_page() != self.feature_pager.current_page();
        self.feature_pager = next;
        if page_changed {
            self.features_loading = true;
            self.spawn_features_fetch(self.feature_pager.current_page());
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Repository editor + delete confirmation
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the repository form. Success closes the modal and refetches the
    /// list; failure keeps the modal open with the draft intact.
    async fn save_repository(&mut self) {
        let name = self.repo_form.name.trim().to_string();
        let url = self.repo_form.url.trim().to_string();
        if name.is_empty() || url.is_empty() {
            tracing::debug!("repository form incomplete, not saving");
            return;
        }
        let upsert = RepositoryUpsert {
            uuid: self.repo_form.uuid.clone(),
            workspace_uuid: self.workspace_uuid.clone(),
            name,
            url,
        };
        match self.store.create_or_update_repository(upsert).await {
            Ok(_) => {
                self.modal = ModalState::None;
                self.repo_form = RepoForm::default();
                self.refetch_repositories().await;
            }
            Err(e) => tracing::error!("repository save failed: {e:#}"),
        }
    }

    /// Run the confirmed delete. The editor closes before the call, so a
    /// failure leaves the list as it was with no modal on screen.
    async fn delete_repository_confirmed(&mut self) {
        if !self.show_confirm_delete() {
            return;
        }
        let form = std::mem::take(&mut self.repo_form);
        self.modal = ModalState::None;
        let Some(repo_uuid) = form.uuid else {
            return;
        };
        match self
            .store
            .delete_repository(&self.workspace_uuid, &repo_uuid)
            .await
        {
            Ok(()) => self.refetch_repositories().await,
            Err(e) => tracing::error!("repository delete failed: {e:#}"),
        }
    }

    async fn refetch_repositories(&mut self) {
        match self.store.get_repositories(&self.workspace_uuid).await {
            Ok(repos) => {
                self.repositories = repos;
                self.clamp_selections();
            }
            Err(e) => tracing::error!("repository fetch failed: {e:#}"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // New-feature modal
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the drafted feature, then refetch the current page and the
    /// count (which rebuilds the page tabs).
    async fn create_feature(&mut self) {
        let name = self.feature_form.name.trim().to_string();
        if name.is_empty() {
            return;
        }
        let upsert = FeatureUpsert {
            workspace_uuid: self.workspace_uuid.clone(),
            owner_pubkey: self.config.identity.owner_pubkey.clone(),
            name,
            brief: None,
        };
        match self.store.create_workspace_feature(upsert).await {
            Ok(_) => {
                self.modal = ModalState::None;
                self.feature_form = FeatureForm::default();
                self.refetch_features().await;
            }
            Err(e) => tracing::error!("feature create failed: {e:#}"),
        }
    }

    async fn refetch_features(&mut self) {
        let page = self.feature_pager.current_page().max(1);
        match self.store.get_workspace_features(&self.workspace_uuid, page).await {
            Ok(items) => {
                self.features = items;
                self.clamp_selections();
            }
            Err(e) => tracing::error!("feature page {page} fetch failed: {e:#}"),
        }
        match self
            .store
            .get_workspace_features_count(&self.workspace_uuid)
            .await
        {
            Ok(count) => {
                self.features_count = count;
                let pages = total_pages(count, self.config.paging.feature_limit);
                self.feature_pager = self.feature_pager.resized(pages);
            }
            Err(e) => tracing::error!("feature count fetch failed: {e:#}"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    /// Bounty posting happens on the platform's web form.
    fn open_post_bounty(&mut self) {
        let url = self.workspace.as_ref().and_then(|ws| ws.website.clone());
        self.open_link(url.as_deref(), "post-bounty page");
    }

    fn open_link(&self, url: Option<&str>, what: &str) {
        match url {
            Some(url) => {
                if let Err(e) = open_url(url) {
                    tracing::error!("failed to open {what}: {e:#}");
                }
            }
            None => tracing::debug!("no {what} link available"),
        }
    }
}

fn open_url(url: &str) -> Result<()> {
    // xdg-open works on Linux and WSL; wslview is the fallback for bare WSL
    std::process::Command::new("xdg-open")
        .arg(url)
        .spawn()
        .or_else(|_| std::process::Command::new("wslview").arg(url).spawn())?;
    Ok(())
}
