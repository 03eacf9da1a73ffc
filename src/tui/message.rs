//! Messages for the Elm Architecture (TEA) update loop.
//!
//! Every key press is translated into one of these, and `App::update()` is
//! the only place state changes. That keeps the whole flow testable.

use crate::data::BountyStatus;

/// Everything the user can ask the dashboard to do.
///
/// Produced by `input::dispatch` from key events, consumed by `App::update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Reload everything for the active workspace
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Views & navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch to the next view (Board → Planner → Mission)
    NextView,
    /// Switch to the previous view
    PrevView,
    /// Move selection up by one
    MoveUp,
    /// Move selection down by one
    MoveDown,
    /// Go to the first item
    GotoTop,
    /// Go to the last item
    GotoBottom,
    /// Open the selected row: bounty/feature URL, or the repository editor
    Activate,

    // ─────────────────────────────────────────────────────────────────────────
    // Board (bounty list)
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the status filter popover
    OpenStatusFilter,
    /// Flip one status checkbox; refetches page 1 with the reset flag
    ToggleStatus(BountyStatus),
    /// Open the platform's bounty creation page in the browser
    PostBounty,

    // ─────────────────────────────────────────────────────────────────────────
    // Planner feed
    // ─────────────────────────────────────────────────────────────────────────
    /// Fetch the next feed page and append it
    LoadMore,

    // ─────────────────────────────────────────────────────────────────────────
    // Mission text editors
    // ─────────────────────────────────────────────────────────────────────────
    /// Start editing the mission text
    EditMission,
    /// Start editing the tactics text
    EditTactics,
    /// Add a character to the focused draft
    EditorInput(char),
    /// Remove the last character from the focused draft
    EditorBackspace,
    /// Add a line break to the focused draft
    EditorNewline,
    /// Discard the focused draft
    EditorCancel,
    /// Persist the focused draft, then refetch the workspace
    EditorSubmit,

    // ─────────────────────────────────────────────────────────────────────────
    // Feature page tabs
    // ─────────────────────────────────────────────────────────────────────────
    /// Slide to the next feature page
    PageNext,
    /// Slide to the previous feature page
    PagePrev,
    /// Jump to the page shown in the given tab slot (0-indexed)
    PageJumpSlot(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Mission modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the new-feature modal
    NewFeature,
    /// Open the repository editor in add mode
    NewRepository,
    /// Add a character to the focused form field
    FormInput(char),
    /// Remove the last character from the focused form field
    FormBackspace,
    /// Move focus to the next form field
    FormNextField,
    /// Save the open form (repository upsert or feature create)
    FormSubmit,
    /// Ask for confirmation before deleting the repository being edited
    RequestDelete,
    /// Confirm the pending repository delete
    ConfirmDelete,
    /// Dismiss the delete confirmation, back to the editor
    CancelDelete,

    // ─────────────────────────────────────────────────────────────────────────
    // Workspace links
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the workspace website in the browser
    OpenWebsite,
    /// Open the workspace GitHub page in the browser
    OpenGithub,

    // ─────────────────────────────────────────────────────────────────────────
    // Modal toggles
    // ─────────────────────────────────────────────────────────────────────────
    /// Show or hide the help popup
    ToggleHelp,
    /// Close whichever modal is open
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // No-op
    // ─────────────────────────────────────────────────────────────────────────
    /// Unhandled key; nothing to do
    None,
}
