//! In-memory [`ApiStore`] backed by seeded sample data.
//!
//! This is the backend the binary runs against (transport layers live
//! outside this crate) and the double the integration tests drive: every
//! call is recorded, and individual operations can be made to fail.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::PagingConfig;
use crate::data::{BountyCard, BountyStatus, Feature, Repository, Workspace};
use crate::store::{
    ApiStore, BountyPage, BountyQuery, FeatureUpsert, MissionUpdate, RepositoryUpsert,
    TacticsUpdate,
};

const SAMPLE_BASE_URL: &str = "https://bounties.example.org";

/// Seed document for the store; also the schema of `--data` JSON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleData {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub bounties: Vec<BountyCard>,
}

impl SampleData {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))
    }

    /// Built-in demo dataset: one large workspace (enough features to page)
    /// and one small one.
    pub fn sample() -> Self {
        let now = Utc::now();
        let ws = "ws-lightning-tools";

        let workspaces = vec![
            Workspace {
                uuid: ws.to_string(),
                name: "Lightning Tools".to_string(),
                description: Some("Payments tooling for the open bounty market".to_string()),
                mission: Some(
                    "Make contributing to lightning infrastructure as easy as picking a bounty."
                        .to_string(),
                ),
                tactics: Some(
                    "Ship small, fund fast, review in public. Every feature starts as a bounty."
                        .to_string(),
                ),
                website: Some(format!("{SAMPLE_BASE_URL}/about")),
                github: Some("https://github.com/example/lightning-tools".to_string()),
            },
            Workspace {
                uuid: "ws-relay-widgets".to_string(),
                name: "Relay Widgets".to_string(),
                description: Some("Embeddable widgets for relay operators".to_string()),
                mission: None,
                tactics: None,
                website: None,
                github: Some("https://github.com/example/relay-widgets".to_string()),
            },
        ];

        let repositories = vec![
            repository(ws, "repo-bounty-engine", "bounty-engine"),
            repository(ws, "repo-payments-service", "payments-service"),
            repository(ws, "repo-widget-kit", "widget-kit"),
        ];

        let feature_names = [
            "Bounty escrow flow",
            "Keysend payouts",
            "Workspace roles",
            "Reviewer assignments",
            "Proof-of-work submissions",
            "Bounty templates",
            "Activity digest emails",
            "Webhook relays",
            "Saved board filters",
            "Bulk bounty import",
        ];
        let features = feature_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let uuid = format!("feat-{:02}", i + 1);
                Feature {
                    url: format!("{SAMPLE_BASE_URL}/feature/{uuid}"),
                    uuid,
                    workspace_uuid: ws.to_string(),
                    name: name.to_string(),
                    brief: (i % 3 == 0).then(|| format!("Scoping notes for {name}.")),
                }
            })
            .collect();

        let bounty_rows: [(&str, BountyStatus, Option<&str>, u64, &str, i64); 9] = [
            ("Fix invoice expiry race", BountyStatus::Open, None, 120_000, "Rust", 1),
            ("Planner column drag state", BountyStatus::Open, None, 90_000, "Typescript", 2),
            ("Escrow timeout handling", BountyStatus::Assigned, Some("carol"), 250_000, "Go", 3),
            ("Dark-mode board theme", BountyStatus::Open, None, 45_000, "Typescript", 5),
            ("Payment retries backoff", BountyStatus::Assigned, Some("dave"), 180_000, "Rust", 8),
            ("Relay health dashboard", BountyStatus::Completed, Some("erin"), 210_000, "Go", 13),
            ("Widget embed API docs", BountyStatus::Completed, Some("mallory"), 60_000, "Typescript", 15),
            ("Onboarding survey flow", BountyStatus::Paid, Some("carol"), 150_000, "Typescript", 21),
            ("Rate limit middleware", BountyStatus::Paid, Some("dave"), 95_000, "Rust", 30),
        ];
        let bounties = bounty_rows
            .iter()
            .enumerate()
            .map(|(i, (title, status, assignee, price, language, age_days))| {
                let id = 9100 + i as u64;
                BountyCard {
                    id,
                    title: title.to_string(),
                    status: *status,
                    assignee: assignee.map(str::to_string),
                    price: *price,
                    languages: vec![language.to_string()],
                    url: format!("{SAMPLE_BASE_URL}/bounty/{id}"),
                    created: now - Duration::days(*age_days),
                }
            })
            .collect();

        SampleData {
            workspaces,
            repositories,
            features,
            bounties,
        }
    }
}

fn repository(workspace_uuid: &str, uuid: &str, name: &str) -> Repository {
    Repository {
        uuid: uuid.to_string(),
        workspace_uuid: workspace_uuid.to_string(),
        name: name.to_string(),
        url: format!("https://github.com/example/{name}"),
    }
}

/// Every store call, recorded for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    GetWorkspace { uuid: String },
    GetRepositories { workspace_uuid: String },
    UpsertRepository(RepositoryUpsert),
    DeleteRepository { workspace_uuid: String, repo_uuid: String },
    GetFeatures { workspace_uuid: String, page: usize },
    GetFeaturesCount { workspace_uuid: String },
    CreateFeature(FeatureUpsert),
    UpdateMission(MissionUpdate),
    UpdateTactics(TacticsUpdate),
    GetBounties { workspace_uuid: String, query: BountyQuery },
}

pub struct MemoryStore {
    inner: Mutex<SampleData>,
    calls: Mutex<Vec<StoreCall>>,
    failing: Mutex<HashSet<&'static str>>,
    paging: PagingConfig,
}

impl MemoryStore {
    pub fn new(data: SampleData, paging: PagingConfig) -> Self {
        Self {
            inner: Mutex::new(data),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            paging,
        }
    }

    /// Demo dataset with default paging.
    pub fn seeded() -> Self {
        Self::new(SampleData::sample(), PagingConfig::default())
    }

    /// Make the named operation fail until cleared. Operation names are the
    /// trait method names.
    pub async fn fail_on(&self, op: &'static str) {
        self.failing.lock().await.insert(op);
    }

    pub async fn clear_failures(&self) {
        self.failing.lock().await.clear();
    }

    /// Snapshot of every call made so far, in order.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.lock().await.clear();
    }

    async fn record(&self, call: StoreCall) {
        self.calls.lock().await.push(call);
    }

    async fn guard(&self, op: &'static str) -> Result<()> {
        if self.failing.lock().await.contains(op) {
            bail!("{op}: backend unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl ApiStore for MemoryStore {
    async fn get_user_workspace_by_uuid(&self, uuid: &str) -> Result<Option<Workspace>> {
        self.record(StoreCall::GetWorkspace {
            uuid: uuid.to_string(),
        })
        .await;
        self.guard("get_user_workspace_by_uuid").await?;
        let inner = self.inner.lock().await;
        Ok(inner.workspaces.iter().find(|w| w.uuid == uuid).cloned())
    }

    async fn get_repositories(&self, workspace_uuid: &str) -> Result<Vec<Repository>> {
        self.record(StoreCall::GetRepositories {
            workspace_uuid: workspace_uuid.to_string(),
        })
        .await;
        self.guard("get_repositories").await?;
        let inner = self.inner.lock().await;
        Ok(inner
            .repositories
            .iter()
            .filter(|r| r.workspace_uuid == workspace_uuid)
            .cloned()
            .collect())
    }

    async fn create_or_update_repository(&self, upsert: RepositoryUpsert) -> Result<Repository> {
        self.record(StoreCall::UpsertRepository(upsert.clone())).await;
        self.guard("create_or_update_repository").await?;
        let mut inner = self.inner.lock().await;
        match upsert.uuid {
            Some(uuid) => {
                let repo = inner
                    .repositories
                    .iter_mut()
                    .find(|r| r.uuid == uuid)
                    .with_context(|| format!("Unknown repository: {uuid}"))?;
                repo.name = upsert.name;
                repo.url = upsert.url;
                Ok(repo.clone())
            }
            None => {
                let repo = Repository {
                    uuid: Uuid::new_v4().to_string(),
                    workspace_uuid: upsert.workspace_uuid,
                    name: upsert.name,
                    url: upsert.url,
                };
                inner.repositories.push(repo.clone());
                Ok(repo)
            }
        }
    }

    async fn delete_repository(&self, workspace_uuid: &str, repo_uuid: &str) -> Result<()> {
        self.record(StoreCall::DeleteRepository {
            workspace_uuid: workspace_uuid.to_string(),
            repo_uuid: repo_uuid.to_string(),
        })
        .await;
        self.guard("delete_repository").await?;
        let mut inner = self.inner.lock().await;
        let before = inner.repositories.len();
        inner
            .repositories
            .retain(|r| !(r.workspace_uuid == workspace_uuid && r.uuid == repo_uuid));
        if inner.repositories.len() == before {
            bail!("Repository not found: {repo_uuid}");
        }
        Ok(())
    }

    async fn get_workspace_features(
        &self,
        workspace_uuid: &str,
        page: usize,
    ) -> Result<Vec<Feature>> {
        self.record(StoreCall::GetFeatures {
            workspace_uuid: workspace_uuid.to_string(),
            page,
        })
        .await;
        self.guard("get_workspace_features").await?;
        let inner = self.inner.lock().await;
        let all: Vec<&Feature> = inner
            .features
            .iter()
            .filter(|f| f.workspace_uuid == workspace_uuid)
            .collect();
        Ok(page_slice(&all, page, self.paging.feature_limit)
            .iter()
            .map(|f| (*f).clone())
            .collect())
    }

    async fn get_workspace_features_count(&self, workspace_uuid: &str) -> Result<u64> {
        self.record(StoreCall::GetFeaturesCount {
            workspace_uuid: workspace_uuid.to_string(),
        })
        .await;
        self.guard("get_workspace_features_count").await?;
        let inner = self.inner.lock().await;
        Ok(inner
            .features
            .iter()
            .filter(|f| f.workspace_uuid == workspace_uuid)
            .count() as u64)
    }

    async fn create_workspace_feature(&self, upsert: FeatureUpsert) -> Result<Feature> {
        self.record(StoreCall::CreateFeature(upsert.clone())).await;
        self.guard("create_workspace_feature").await?;
        let mut inner = self.inner.lock().await;
        let uuid = Uuid::new_v4().to_string();
        let feature = Feature {
            url: format!("{SAMPLE_BASE_URL}/feature/{uuid}"),
            uuid,
            workspace_uuid: upsert.workspace_uuid,
            name: upsert.name,
            brief: upsert.brief,
        };
        inner.features.push(feature.clone());
        Ok(feature)
    }

    async fn update_workspace_mission(&self, update: MissionUpdate) -> Result<()> {
        self.record(StoreCall::UpdateMission(update.clone())).await;
        self.guard("update_workspace_mission").await?;
        let mut inner = self.inner.lock().await;
        let ws = inner
            .workspaces
            .iter_mut()
            .find(|w| w.uuid == update.uuid)
            .with_context(|| format!("Unknown workspace: {}", update.uuid))?;
        ws.mission = Some(update.mission);
        Ok(())
    }

    async fn update_workspace_tactics(&self, update: TacticsUpdate) -> Result<()> {
        self.record(StoreCall::UpdateTactics(update.clone())).await;
        self.guard("update_workspace_tactics").await?;
        let mut inner = self.inner.lock().await;
        let ws = inner
            .workspaces
            .iter_mut()
            .find(|w| w.uuid == update.uuid)
            .with_context(|| format!("Unknown workspace: {}", update.uuid))?;
        ws.tactics = Some(update.tactics);
        Ok(())
    }

    async fn get_workspace_bounties(
        &self,
        workspace_uuid: &str,
        query: &BountyQuery,
    ) -> Result<BountyPage> {
        self.record(StoreCall::GetBounties {
            workspace_uuid: workspace_uuid.to_string(),
            query: query.clone(),
        })
        .await;
        self.guard("get_workspace_bounties").await?;
        let inner = self.inner.lock().await;
        let mut matching: Vec<&BountyCard> = inner
            .bounties
            .iter()
            .filter(|b| query.status.matches(b.status))
            .filter(|b| match &query.language {
                Some(lang) if !lang.is_empty() => {
                    b.languages.iter().any(|l| l.eq_ignore_ascii_case(lang))
                }
                _ => true,
            })
            .collect();
        matching.sort_by(|a, b| b.created.cmp(&a.created));
        let total = matching.len() as u64;
        let bounties = page_slice(&matching, query.page, self.paging.bounty_page_size)
            .iter()
            .map(|b| (*b).clone())
            .collect();
        Ok(BountyPage { bounties, total })
    }
}

/// 1-based page slice; out-of-range pages are empty, mirroring the backend.
fn page_slice<'a, T>(items: &'a [T], page: usize, page_size: usize) -> &'a [T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1) * page_size;
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}
