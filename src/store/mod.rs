//! Data-access seam between the TUI and the backend.
//!
//! The app consumes [`ApiStore`] as `Arc<dyn ApiStore>`; transport and
//! caching belong to the implementation, not to this crate. The one
//! implementation shipped here is [`memory::MemoryStore`], which serves
//! seeded sample data and doubles as the test double.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::data::{BountyCard, Feature, Repository, StatusFilters, Workspace};

/// Body for a mission text update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionUpdate {
    pub uuid: String,
    pub owner_pubkey: String,
    pub mission: String,
}

/// Body for a tactics text update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticsUpdate {
    pub uuid: String,
    pub owner_pubkey: String,
    pub tactics: String,
}

/// Save body for the repository editor. `uuid` is `None` when adding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryUpsert {
    pub uuid: Option<String>,
    pub workspace_uuid: String,
    pub name: String,
    pub url: String,
}

/// Create body for the new-feature modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureUpsert {
    pub workspace_uuid: String,
    pub owner_pubkey: String,
    pub name: String,
    pub brief: Option<String>,
}

/// Query shape for bounty pages; the board and the planner feed share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BountyQuery {
    pub page: usize,
    pub reset_page: bool,
    pub status: StatusFilters,
    pub language: Option<String>,
}

/// One page of bounties plus the total matching the query's filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BountyPage {
    pub bounties: Vec<BountyCard>,
    pub total: u64,
}

/// Everything the views need from the backend.
#[async_trait]
pub trait ApiStore: Send + Sync {
    async fn get_user_workspace_by_uuid(&self, uuid: &str) -> Result<Option<Workspace>>;

    async fn get_repositories(&self, workspace_uuid: &str) -> Result<Vec<Repository>>;

    async fn create_or_update_repository(&self, upsert: RepositoryUpsert) -> Result<Repository>;

    async fn delete_repository(&self, workspace_uuid: &str, repo_uuid: &str) -> Result<()>;

    /// One page of features, `feature_limit`-sized, 1-based.
    async fn get_workspace_features(&self, workspace_uuid: &str, page: usize)
        -> Result<Vec<Feature>>;

    async fn get_workspace_features_count(&self, workspace_uuid: &str) -> Result<u64>;

    async fn create_workspace_feature(&self, upsert: FeatureUpsert) -> Result<Feature>;

    async fn update_workspace_mission(&self, update: MissionUpdate) -> Result<()>;

    async fn update_workspace_tactics(&self, update: TacticsUpdate) -> Result<()>;

    async fn get_workspace_bounties(
        &self,
        workspace_uuid: &str,
        query: &BountyQuery,
    ) -> Result<BountyPage>;
}

/// Result of one background read, drained by the tick loop. Failures travel
/// as strings so the channel stays `'static` and the UI thread decides what
/// to log.
#[derive(Debug)]
pub enum StoreEvent {
    Workspace(Result<Option<Workspace>, String>),
    Repositories(Result<Vec<Repository>, String>),
    Features {
        page: usize,
        result: Result<Vec<Feature>, String>,
    },
    FeaturesCount(Result<u64, String>),
    /// A board page (bounties view); always replaces the list.
    BoardPage(Result<BountyPage, String>),
    /// A planner feed page; page 1 replaces, later pages append.
    FeedPage {
        page: usize,
        result: Result<BountyPage, String>,
    },
}

/// Send an event from a background task without blocking it. A full or
/// closed channel drops the event; the UI will simply refetch later.
pub fn send_event(tx: &mpsc::Sender<StoreEvent>, event: StoreEvent) {
    if let Err(e) = tx.try_send(event) {
        tracing::warn!("store event dropped: {e}");
    }
}
