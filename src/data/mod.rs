//! Domain records shared between the store layer and the TUI.
//!
//! Field semantics are owned by the backend; this crate renders them and
//! echoes identifiers back through the data-access trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bounty workspace: the container for bounties, features, and
/// repositories, plus the mission/tactics text managed from the TUI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub mission: Option<String>,
    pub tactics: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
}

/// A code repository attached to a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub uuid: String,
    pub workspace_uuid: String,
    pub name: String,
    pub url: String,
}

/// A product feature tracked under a workspace. `url` points at the
/// feature's page on the platform; the TUI never builds routes itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub uuid: String,
    pub workspace_uuid: String,
    pub name: String,
    pub brief: Option<String>,
    pub url: String,
}

/// One bounty as rendered on the board and in planner cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BountyCard {
    pub id: u64,
    pub title: String,
    pub status: BountyStatus,
    pub assignee: Option<String>,
    /// Reward in sats.
    pub price: u64,
    /// Coding languages the bounty is tagged with.
    pub languages: Vec<String>,
    pub url: String,
    pub created: DateTime<Utc>,
}

/// Lifecycle states a bounty moves through on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BountyStatus {
    Open,
    Assigned,
    Completed,
    Paid,
}

impl BountyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BountyStatus::Open => "Open",
            BountyStatus::Assigned => "Assigned",
            BountyStatus::Completed => "Completed",
            BountyStatus::Paid => "Paid",
        }
    }

    /// All statuses in popover display order.
    pub fn all() -> [BountyStatus; 4] {
        [
            BountyStatus::Open,
            BountyStatus::Assigned,
            BountyStatus::Completed,
            BountyStatus::Paid,
        ]
    }
}

/// Checkbox state for the bounty status popover.
///
/// An empty selection means "no status constraint"; queries carry the whole
/// flag set either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilters {
    pub open: bool,
    pub assigned: bool,
    pub completed: bool,
    pub paid: bool,
}

impl StatusFilters {
    pub fn toggle(&mut self, status: BountyStatus) {
        match status {
            BountyStatus::Open => self.open = !self.open,
            BountyStatus::Assigned => self.assigned = !self.assigned,
            BountyStatus::Completed => self.completed = !self.completed,
            BountyStatus::Paid => self.paid = !self.paid,
        }
    }

    pub fn is_set(&self, status: BountyStatus) -> bool {
        match status {
            BountyStatus::Open => self.open,
            BountyStatus::Assigned => self.assigned,
            BountyStatus::Completed => self.completed,
            BountyStatus::Paid => self.paid,
        }
    }

    pub fn any(&self) -> bool {
        self.open || self.assigned || self.completed || self.paid
    }

    /// Whether a bounty with the given status passes the filter. An empty
    /// selection passes everything.
    pub fn matches(&self, status: BountyStatus) -> bool {
        !self.any() || self.is_set(status)
    }

    /// Labels of the selected statuses, in display order.
    pub fn active_labels(&self) -> Vec<&'static str> {
        BountyStatus::all()
            .iter()
            .filter(|s| self.is_set(**s))
            .map(|s| s.label())
            .collect()
    }
}

/// Format a sat amount with thousands separators for card rows.
pub fn format_sats(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact relative age for list rows ("3d", "5h", "now").
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(created);
    if delta.num_days() >= 1 {
        format!("{}d", delta.num_days())
    } else if delta.num_hours() >= 1 {
        format!("{}h", delta.num_hours())
    } else if delta.num_minutes() >= 1 {
        format!("{}m", delta.num_minutes())
    } else {
        "now".to_string()
    }
}
