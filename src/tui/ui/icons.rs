//! Nerd Font icons used throughout the UI.

// Bounty status - fractional circles, check for paid out
pub const STATUS_OPEN: &str = "○"; // Empty circle - up for grabs
pub const STATUS_ASSIGNED: &str = "◑"; // 1/2 filled - someone is on it
pub const STATUS_COMPLETED: &str = "●"; // Full circle - work delivered
pub const STATUS_PAID: &str = "󰄬"; // nf-md-check

// Chrome
pub const ICON_WORKSPACE: &str = "󰒋"; // nf-md-server
pub const ICON_BOUNTY: &str = "󱐋"; // nf-md-lightning_bolt (sats)
pub const ICON_REPO: &str = ""; // nf-dev-github_badge
pub const ICON_FEATURE: &str = "󰈙"; // nf-md-file_document
pub const ICON_MISSION: &str = "󰀨"; // nf-md-bullseye_arrow
pub const ICON_FILTER: &str = "󰈲"; // nf-md-filter
pub const ICON_HELP: &str = "󰋗"; // nf-md-help_circle
pub const ICON_EDIT: &str = "󰏫"; // nf-md-pencil
pub const ICON_WARN: &str = "⚠";
