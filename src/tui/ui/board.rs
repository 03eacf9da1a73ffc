//! Bounty board rendering: workspace header and the bounty list.

use super::icons;
use super::layout::{pad_to_width, truncate_with_ellipsis};
use super::status::bounty_status_config;
use crate::data::{format_age, format_sats};
use crate::tui::App;
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const ROW_SELECTED_BG: Color = Color::Rgb(30, 40, 60);

/// Draw the top header: workspace name, bounty count, active filters.
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.is_loading {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let name = app
        .workspace
        .as_ref()
        .map(|ws| ws.name.clone())
        .unwrap_or_else(|| app.workspace_uuid.clone());

    let text = if app.is_loading {
        Line::from(vec![
            Span::styled(
                format!("{} ", icons::ICON_WORKSPACE),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("{name} "),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} Loading...", app.spinner_char()),
                Style::default().fg(Color::Cyan),
            ),
        ])
    } else {
        let mut spans = vec![
            Span::styled(
                format!("{} ", icons::ICON_WORKSPACE),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("{name} "),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{} bounties]", app.bounties_total),
                Style::default().fg(Color::Green),
            ),
        ];
        let filters = app.status_filters.active_labels();
        if !filters.is_empty() {
            spans.push(Span::styled(
                format!(" {} {}", icons::ICON_FILTER, filters.join("+")),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(lang) = &app.language_filter {
            spans.push(Span::styled(
                format!(" [{lang}]"),
                Style::default().fg(Color::Magenta),
            ));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

/// Draw the bounty list.
pub fn draw_board(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.bounties.is_empty() {
        let text = if app.board_loading {
            format!("  {} Fetching bounties...", app.spinner_char())
        } else if app.status_filters.any() {
            "  No bounties match the current filters".to_string()
        } else {
            "  No bounties in this workspace yet".to_string()
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(paragraph, inner);
        return;
    }

    let width = inner.width as usize;
    let show_assignee = width >= 70;
    let show_languages = width >= 90;

    // Fixed columns: icon, price, age, optional assignee and languages.
    let mut fixed = 2 + 2 + 12 + 1 + 4 + 2;
    if show_assignee {
        fixed += 13;
    }
    if show_languages {
        fixed += 15;
    }
    let title_width = width.saturating_sub(fixed).max(8);

    let mut items: Vec<ListItem> = Vec::new();
    for (idx, bounty) in app.bounties.iter().enumerate() {
        let is_selected = idx == app.board_selected;
        let cfg = bounty_status_config(bounty.status);

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(format!("{} ", cfg.icon), cfg.style),
            Span::styled(
                pad_to_width(
                    &truncate_with_ellipsis(&bounty.title, title_width),
                    title_width,
                    Alignment::Left,
                ),
                Style::default().fg(Color::White),
            ),
        ];

        if show_languages {
            let langs = bounty.languages.join(",");
            spans.push(Span::styled(
                pad_to_width(
                    &truncate_with_ellipsis(&langs, 14),
                    15,
                    Alignment::Left,
                ),
                Style::default().fg(Color::Blue),
            ));
        }

        if show_assignee {
            let assignee = bounty.assignee.as_deref().unwrap_or("—");
            spans.push(Span::styled(
                pad_to_width(&truncate_with_ellipsis(assignee, 12), 13, Alignment::Left),
                Style::default().fg(Color::Cyan),
            ));
        }

        spans.push(Span::styled(
            pad_to_width(
                &format!("{} {}", icons::ICON_BOUNTY, format_sats(bounty.price)),
                12,
                Alignment::Right,
            ),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            pad_to_width(&format_age(bounty.created, Utc::now()), 5, Alignment::Right),
            Style::default().fg(Color::DarkGray),
        ));

        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().bg(ROW_SELECTED_BG));
        }
        items.push(ListItem::new(line));
    }

    let list = List::new(items);
    f.render_widget(list, inner);
}
