//! TUI rendering module.
//!
//! This module handles all UI rendering for the terminal interface.
//! It's organized into submodules for maintainability:
//!
//! - `icons` - Nerd Font icons used throughout the UI
//! - `layout` - Layout calculations and text utilities
//! - `status` - Status configuration, status bar, view tabs, help
//! - `board` - Workspace header and bounty list rendering
//! - `planner` - Bounty-card feed rendering
//! - `mission` - Mission/tactics editors, features, repositories
//! - `modals` - Modal popup rendering (filter, forms, confirmation)

pub mod icons;
pub mod layout;
mod board;
mod mission;
mod modals;
mod planner;
mod status;

// Re-export the main draw function
pub use self::draw::draw;

mod draw {

    use super::board::{draw_board, draw_header};
    use super::mission::draw_mission;
    use super::modals::{
        draw_confirm_delete, draw_new_feature, draw_repo_editor, draw_status_filter,
    };
    use super::planner::draw_planner;
    use super::status::{draw_help_popup, draw_status_bar, draw_view_tabs};
    use crate::tui::{App, View};
    use ratatui::{
        layout::{Constraint, Direction, Layout},
        Frame,
    };

    /// Main draw function - renders the entire TUI.
    pub fn draw(f: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        draw_header(f, app, chunks[0]);
        draw_view_tabs(f, app, chunks[1]);
        match app.view {
            View::Board => draw_board(f, app, chunks[2]),
            View::Planner => draw_planner(f, app, chunks[2]),
            View::Mission => draw_mission(f, app, chunks[2]),
        }
        draw_status_bar(f, app, chunks[3]);

        // Overlays
        if app.show_help() {
            draw_help_popup(f, app);
        }

        if app.show_status_filter() {
            draw_status_filter(f, app);
        }

        if app.show_repo_editor() {
            draw_repo_editor(f, app);
        }

        if app.show_confirm_delete() {
            draw_repo_editor(f, app);
            draw_confirm_delete(f, app);
        }

        if app.show_new_feature() {
            draw_new_feature(f, app);
        }
    }
}
