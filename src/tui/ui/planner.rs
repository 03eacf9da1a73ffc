//! Planner rendering: the append-only bounty card feed.

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
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

const ROW_SELECTED_BG: Color = Color::Rgb(30, 40, 60);

/// Draw the planner feed: loaded cards plus a load-more footer.
pub fn draw_planner(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " Planner [{}/{}] ",
        app.feed.cards.len(),
        app.feed.total
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut items: Vec<ListItem> = Vec::new();

    if let Some(err) = &app.feed.error {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {} {}", icons::ICON_WARN, err),
            Style::default().fg(Color::Red),
        ))));
        items.push(ListItem::new(Line::from("")));
    }

    if app.feed.cards.is_empty() && app.feed.error.is_none() {
        let text = if app.feed.loading {
            format!("  {} Fetching cards...", app.spinner_char())
        } else {
            "  Nothing planned here yet".to_string()
        };
        items.push(ListItem::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let width = inner.width as usize;
    let title_width = width.saturating_sub(2 + 2 + 12 + 1 + 5 + 14).max(8);

    for (idx, card) in app.feed.cards.iter().enumerate() {
        let is_selected = idx == app.planner_selected;
        let cfg = bounty_status_config(card.status);

        let spans = vec![
            Span::raw("  "),
            Span::styled(format!("{} ", cfg.icon), cfg.style),
            Span::styled(
                pad_to_width(
                    &truncate_with_ellipsis(&card.title, title_width),
                    title_width,
                    Alignment::Left,
                ),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                pad_to_width(&truncate_with_ellipsis(card.status.label(), 12), 14, Alignment::Left),
                cfg.style,
            ),
            Span::styled(
                pad_to_width(
                    &format!("{} {}", icons::ICON_BOUNTY, format_sats(card.price)),
                    12,
                    Alignment::Right,
                ),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                pad_to_width(&format_age(card.created, Utc::now()), 5, Alignment::Right),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().bg(ROW_SELECTED_BG));
        }
        items.push(ListItem::new(line));
    }

    // Footer: load-more affordance
    if !app.feed.cards.is_empty() {
        items.push(ListItem::new(Line::from("")));
        let footer = if app.feed.loading {
            Span::styled(
                format!("  {} Loading more...", app.spinner_char()),
                Style::default().fg(Color::Cyan),
            )
        } else if app.feed.has_more() {
            let remaining = app.feed.total as usize - app.feed.cards.len();
            Span::styled(
                format!("  l: load more ({remaining} remaining)"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "  All cards loaded",
                Style::default().fg(Color::DarkGray),
            )
        };
        items.push(ListItem::new(Line::from(footer)));
    }

    let list = List::new(items);
    f.render_widget(list, inner);
}
