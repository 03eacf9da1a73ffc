//! Input dispatch layer for Elm Architecture (TEA) pattern.
//!
//! Maps key events to messages based on current app mode: a focused text
//! editor owns the keyboard outright, then modals, then the per-view keys.
//! Handles the gg chord with a non-blocking state machine.

use super::app::View;
use super::{App, Message};
use crate::data::BountyStatus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// State machine for handling key chords (gg).
///
/// Instead of blocking with `event::poll()` inline, we track pending keys
/// and check for timeout in the main event loop.
#[derive(Debug, Default)]
pub struct InputState {
    /// The first key of a potential chord sequence
    pub pending: Option<KeyCode>,
    /// When the pending key was pressed (for timeout detection)
    pub pending_since: Option<Instant>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there's a pending chord that has timed out (500ms).
    pub fn has_timed_out(&self) -> bool {
        if let Some(since) = self.pending_since {
            since.elapsed().as_millis() > 500
        } else {
            false
        }
    }

    /// Clear the pending chord state.
    pub fn clear(&mut self) {
        self.pending = None;
        self.pending_since = None;
    }

    /// Set a pending chord key.
    pub fn set_pending(&mut self, key: KeyCode) {
        self.pending = Some(key);
        self.pending_since = Some(Instant::now());
    }
}

/// Map key events to messages based on current app mode.
pub fn dispatch(app: &App, input: &mut InputState, key: KeyEvent) -> Message {
    // Handle pending chords first
    if let Some(pending) = input.pending.take() {
        input.pending_since = None;
        return handle_chord(pending, key.code);
    }

    if app.editing_text() {
        dispatch_text_editor(key)
    } else if app.show_confirm_delete() {
        dispatch_confirm_delete(key)
    } else if app.show_repo_editor() {
        dispatch_repo_editor(key)
    } else if app.show_new_feature() {
        dispatch_feature_form(key)
    } else if app.show_status_filter() {
        dispatch_status_filter(key)
    } else if app.show_help() {
        dispatch_help_modal(key)
    } else {
        dispatch_normal_mode(app, input, key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode-specific dispatch functions
// ─────────────────────────────────────────────────────────────────────────────

/// Handle keys in normal mode (no modal, no focused editor).
fn dispatch_normal_mode(app: &App, input: &mut InputState, key: KeyEvent) -> Message {
    // Global keys
    match key.code {
        KeyCode::Char('q') => return Message::Quit,
        KeyCode::Char('?') => return Message::ToggleHelp,
        KeyCode::Char('r') => return Message::Refresh,
        KeyCode::Tab => return Message::NextView,
        KeyCode::BackTab => return Message::PrevView,
        KeyCode::Char('j') | KeyCode::Down => return Message::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => return Message::MoveUp,
        KeyCode::Char('G') => return Message::GotoBottom,
        KeyCode::Char('g') => {
            input.set_pending(KeyCode::Char('g'));
            return Message::None;
        }
        KeyCode::Enter => return Message::Activate,
        _ => {}
    }

    // View-specific keys
    match app.view {
        View::Board => match key.code {
            KeyCode::Char('s') => Message::OpenStatusFilter,
            KeyCode::Char('b') => Message::PostBounty,
            _ => Message::None,
        },
        View::Planner => match key.code {
            KeyCode::Char('l') => Message::LoadMore,
            _ => Message::None,
        },
        View::Mission => match key.code {
            KeyCode::Char('m') => Message::EditMission,
            KeyCode::Char('t') => Message::EditTactics,
            KeyCode::Char('n') => Message::NewFeature,
            KeyCode::Char('a') => Message::NewRepository,
            KeyCode::Char('h') | KeyCode::Left => Message::PagePrev,
            KeyCode::Char('l') | KeyCode::Right => Message::PageNext,
            KeyCode::Char(c @ '1'..='3') => {
                let slot = c.to_digit(10).unwrap_or(1) as usize;
                Message::PageJumpSlot(slot - 1)
            }
            KeyCode::Char('o') => Message::OpenWebsite,
            KeyCode::Char('O') => Message::OpenGithub,
            _ => Message::None,
        },
    }
}

/// Handle keys while a mission text editor is focused. Every printable
/// character belongs to the draft; only the control keys escape.
fn dispatch_text_editor(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::EditorCancel,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Message::EditorSubmit
        }
        KeyCode::Enter => Message::EditorNewline,
        KeyCode::Backspace => Message::EditorBackspace,
        KeyCode::Char(c) => Message::EditorInput(c),
        _ => Message::None,
    }
}

/// Handle keys in the repository editor modal.
fn dispatch_repo_editor(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::CloseModal,
        KeyCode::Tab | KeyCode::BackTab => Message::FormNextField,
        KeyCode::Enter => Message::FormSubmit,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Message::RequestDelete
        }
        KeyCode::Backspace => Message::FormBackspace,
        KeyCode::Char(c) => Message::FormInput(c),
        _ => Message::None,
    }
}

/// Handle keys in the new-feature modal.
fn dispatch_feature_form(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::CloseModal,
        KeyCode::Enter => Message::FormSubmit,
        KeyCode::Backspace => Message::FormBackspace,
        KeyCode::Char(c) => Message::FormInput(c),
        _ => Message::None,
    }
}

/// Handle keys in the delete confirmation dialog.
fn dispatch_confirm_delete(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Message::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Message::CancelDelete,
        _ => Message::None,
    }
}

/// Handle keys in the status filter popover.
fn dispatch_status_filter(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') | KeyCode::Enter => {
            Message::CloseModal
        }
        KeyCode::Char('1') => Message::ToggleStatus(BountyStatus::Open),
        KeyCode::Char('2') => Message::ToggleStatus(BountyStatus::Assigned),
        KeyCode::Char('3') => Message::ToggleStatus(BountyStatus::Completed),
        KeyCode::Char('4') => Message::ToggleStatus(BountyStatus::Paid),
        _ => Message::None,
    }
}

/// Handle keys in help modal.
fn dispatch_help_modal(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Message::CloseModal,
        _ => Message::None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chord handling
// ─────────────────────────────────────────────────────────────────────────────

/// Handle the second key of a chord sequence.
fn handle_chord(first: KeyCode, second: KeyCode) -> Message {
    match (first, second) {
        (KeyCode::Char('g'), KeyCode::Char('g')) => Message::GotoTop,
        _ => Message::None,
    }
}
