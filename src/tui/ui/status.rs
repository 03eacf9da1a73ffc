//! Status configuration and status bar rendering.

use super::icons;
use super::layout::{fit_lines_to_area, popup_rect};
use crate::data::BountyStatus;
use crate::tui::app::View;
use crate::tui::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Unified status configuration - single source of truth for icon and style.
pub struct StatusConfig {
    pub icon: &'static str,
    pub style: Style,
}

/// Trait for types that can provide their display configuration (icon + style).
pub trait StatusConfigurable {
    fn status_config(&self) -> StatusConfig;
}

impl StatusConfigurable for BountyStatus {
    fn status_config(&self) -> StatusConfig {
        match self {
            BountyStatus::Open => StatusConfig {
                icon: icons::STATUS_OPEN,
                style: Style::default().fg(Color::Green),
            },
            BountyStatus::Assigned => StatusConfig {
                icon: icons::STATUS_ASSIGNED,
                style: Style::default().fg(Color::Cyan),
            },
            BountyStatus::Completed => StatusConfig {
                icon: icons::STATUS_COMPLETED,
                style: Style::default().fg(Color::Yellow),
            },
            BountyStatus::Paid => StatusConfig {
                icon: icons::STATUS_PAID,
                style: Style::default().fg(Color::Magenta),
            },
        }
    }
}

pub fn bounty_status_config(status: BountyStatus) -> StatusConfig {
    status.status_config()
}

/// Draw the status bar at the bottom of the screen.
pub fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let status = if app.editing_text() {
        let text = if width >= 60 {
            " EDIT | type to write | Enter: newline | Ctrl+S: save | Esc: cancel "
        } else if width >= 35 {
            " EDIT | Ctrl+S: save | Esc: cancel "
        } else {
            " EDIT "
        };
        Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if app.show_confirm_delete() {
        Span::styled(
            " DELETE? y: confirm | n/Esc: keep ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if app.show_repo_editor() {
        let text = if width >= 65 {
            " Tab: switch field | Enter: save | Ctrl+D: delete | Esc: close "
        } else {
            " Tab Enter Ctrl+D Esc "
        };
        Span::styled(text, Style::default().fg(Color::Cyan))
    } else if app.show_new_feature() {
        Span::styled(
            " Type a name | Enter: create | Esc: close ",
            Style::default().fg(Color::Cyan),
        )
    } else if app.show_status_filter() {
        Span::styled(
            " 1-4: toggle status | Esc: close ",
            Style::default().fg(Color::Green),
        )
    } else {
        let text = match app.view {
            View::Board => {
                if width >= 90 {
                    " j/k: nav | Enter: open | s: filter | b: post bounty | Tab: view | r: refresh | ?: help "
                        .to_string()
                } else if width >= 55 {
                    " j/k:nav Enter:open s:filter b:post ?:help ".to_string()
                } else {
                    " ? help ".to_string()
                }
            }
            View::Planner => {
                if width >= 80 {
                    " j/k: nav | Enter: open | l: load more | Tab: view | r: refresh | ?: help "
                        .to_string()
                } else if width >= 45 {
                    " j/k:nav Enter:open l:more ?:help ".to_string()
                } else {
                    " ? help ".to_string()
                }
            }
            View::Mission => {
                if width >= 105 {
                    " j/k: nav | m/t: edit mission/tactics | n: feature | a: repo | h/l: page | 1-3: tab | ?: help "
                        .to_string()
                } else if width >= 60 {
                    " m/t:edit n:feature a:repo h/l:page ?:help ".to_string()
                } else {
                    " ? help ".to_string()
                }
            }
        };
        Span::styled(text, Style::default().fg(Color::DarkGray))
    };

    let paragraph = Paragraph::new(Line::from(status));
    f.render_widget(paragraph, area);
}

/// Draw the view tab bar.
pub fn draw_view_tabs(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    spans.push(Span::styled(" ", Style::default()));

    let views = View::all();
    for (i, view) in views.iter().enumerate() {
        let is_active = *view == app.view;
        let is_loading = match view {
            View::Board => app.board_loading,
            View::Planner => app.feed.loading,
            View::Mission => app.is_loading || app.features_loading,
        };

        let label = format!(" {} ", view.title());

        let style = if is_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if is_loading {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(label, style));
        if i + 1 < views.len() {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(paragraph, area);
}

/// Keyboard shortcut listing for the help popup.
fn keyboard_shortcuts() -> Vec<&'static str> {
    vec![
        "",
        "  GLOBAL",
        "  ──────",
        "  q            Quit",
        "  r            Refresh everything",
        "  Tab / S-Tab  Next / previous view",
        "  j/k ↑/↓      Move selection",
        "  gg / G       Jump to top / bottom",
        "  Enter        Open selection",
        "  ?            This help",
        "",
        "  BOUNTIES",
        "  ────────",
        "  s            Status filter",
        "  b            Post a bounty (web form)",
        "",
        "  PLANNER",
        "  ───────",
        "  l            Load more cards",
        "",
        "  MISSION",
        "  ───────",
        "  m / t        Edit mission / tactics",
        "  n            New feature",
        "  a            Add repository",
        "  h/l ←/→      Previous / next feature page",
        "  1-3          Jump to visible page tab",
        "  o / O        Open website / github",
        "",
        "  STATUS LEGEND",
        "  ─────────────",
        "  ○  Open        Up for grabs",
        "  ◑  Assigned    Someone is on it",
        "  ●  Completed   Work delivered",
        "  󰄬  Paid        Sats paid out",
        "",
    ]
}

/// Draw the help popup.
pub fn draw_help_popup(f: &mut Frame, _app: &App) {
    let area = popup_rect(60, 85, 44, 12, f.area());

    f.render_widget(ratatui::widgets::Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for text in keyboard_shortcuts() {
        lines.push(Line::from(text));
    }
    lines.push(Line::from(Span::styled(
        "  Esc: Close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(format!(" {} Help ", icons::ICON_HELP))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}
