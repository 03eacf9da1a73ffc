//! Mission view rendering: mission/tactics panels, the feature list with its
//! sliding page tabs, and the repository list.

use super::icons;
use super::layout::{truncate_str, truncate_with_ellipsis};
use crate::tui::app::MissionRow;
use crate::tui::editor::FieldEditor;
use crate::tui::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const ROW_SELECTED_BG: Color = Color::Rgb(30, 40, 60);

pub fn draw_mission(f: &mut Frame, app: &App, area: Rect) {
    let mission_editing = !app.mission_editor.is_viewing();
    let tactics_editing = !app.tactics_editor.is_viewing();
    let mission_height = if mission_editing { 8 } else { 5 };
    let tactics_height = if tactics_editing { 8 } else { 5 };
    let repo_height = (app.repositories.len().min(6) + 2) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(mission_height),
            Constraint::Length(tactics_height),
            Constraint::Min(5),
            Constraint::Length(repo_height),
        ])
        .split(area);

    let mission_text = app
        .workspace
        .as_ref()
        .and_then(|ws| ws.mission.clone());
    let tactics_text = app
        .workspace
        .as_ref()
        .and_then(|ws| ws.tactics.clone());

    draw_text_panel(
        f,
        chunks[0],
        &format!(" {} Mission ", icons::ICON_MISSION),
        &app.mission_editor,
        mission_text.as_deref(),
        "No mission yet - press m to set one",
        app.spinner_char(),
    );
    draw_text_panel(
        f,
        chunks[1],
        &format!(" {} Tactics ", icons::ICON_EDIT),
        &app.tactics_editor,
        tactics_text.as_deref(),
        "No tactics yet - press t to set them",
        app.spinner_char(),
    );
    draw_features(f, app, chunks[2]);
    draw_repositories(f, app, chunks[3]);
}

/// One mission text panel. Renders the canonical value, the live draft with
/// a cursor, or a saving indicator, depending on the editor state.
fn draw_text_panel(
    f: &mut Frame,
    area: Rect,
    title: &str,
    editor: &FieldEditor,
    canonical: Option<&str>,
    placeholder: &str,
    spinner: char,
) {
    let (border_style, lines): (Style, Vec<Line>) = if editor.is_editing() {
        let draft = editor.draft().unwrap_or_default();
        let mut lines: Vec<Line> = Vec::new();
        let mut parts = draft.split('\n').peekable();
        while let Some(part) = parts.next() {
            let last = parts.peek().is_none();
            let mut spans = vec![Span::styled(
                format!("  {part}"),
                Style::default().fg(Color::White),
            )];
            if last {
                spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            }
            lines.push(Line::from(spans));
        }
        (Style::default().fg(Color::Yellow), lines)
    } else if editor.is_submitting() {
        let draft = editor.draft().unwrap_or_default();
        let mut lines: Vec<Line> = draft
            .split('\n')
            .map(|part| {
                Line::from(Span::styled(
                    format!("  {part}"),
                    Style::default().fg(Color::DarkGray),
                ))
            })
            .collect();
        lines.push(Line::from(Span::styled(
            format!("  {spinner} Saving..."),
            Style::default().fg(Color::Cyan),
        )));
        (Style::default().fg(Color::Cyan), lines)
    } else {
        let lines = match canonical {
            Some(text) if !text.is_empty() => text
                .split('\n')
                .map(|part| {
                    Line::from(Span::styled(
                        format!("  {part}"),
                        Style::default().fg(Color::Gray),
                    ))
                })
                .collect(),
            _ => vec![Line::from(Span::styled(
                format!("  {placeholder}"),
                Style::default().fg(Color::DarkGray),
            ))],
        };
        (Style::default(), lines)
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    let lines = super::layout::fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

/// The feature list with its sliding window of page tabs.
fn draw_features(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " {} Features ({}) ",
        icons::ICON_FEATURE,
        app.features_count
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut items: Vec<ListItem> = Vec::new();

    // Page tab strip: up to three visible pages, arrows when more exist on
    // either side.
    let pager = &app.feature_pager;
    if pager.total_pages() > 1 {
        let mut spans = vec![Span::raw("  ")];
        let first = pager.tabs().first().copied().unwrap_or(1);
        let last = pager.tabs().last().copied().unwrap_or(1);
        spans.push(Span::styled(
            if first > 1 { "‹ " } else { "  " },
            Style::default().fg(Color::Green),
        ));
        for &page in pager.tabs() {
            if page == pager.current_page() {
                spans.push(Span::styled(
                    format!("[{page}]"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {page} "),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            if last < pager.total_pages() { "› " } else { "  " },
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::styled(
            format!("  page {}/{}", pager.current_page(), pager.total_pages()),
            Style::default().fg(Color::DarkGray),
        ));
        items.push(ListItem::new(Line::from(spans)));
        items.push(ListItem::new(Line::from("")));
    }

    if app.features.is_empty() {
        let text = if app.features_loading {
            format!("  {} Fetching features...", app.spinner_char())
        } else {
            "  No features yet - press n to add one".to_string()
        };
        items.push(ListItem::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let rows = app.mission_rows();
    let width = inner.width as usize;
    for (idx, feature) in app.features.iter().enumerate() {
        let is_selected = rows.get(app.mission_selected) == Some(&MissionRow::Feature(idx));
        let name_width = (width / 2).max(12);
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(
                truncate_with_ellipsis(&feature.name, name_width),
                Style::default().fg(Color::White),
            ),
        ];
        if let Some(brief) = &feature.brief {
            spans.push(Span::styled(
                format!("  {}", truncate_str(brief, width.saturating_sub(name_width + 6))),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().bg(ROW_SELECTED_BG));
        }
        items.push(ListItem::new(line));
    }

    let list = List::new(items);
    f.render_widget(list, inner);
}

fn draw_repositories(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " {} Repositories ({}) - a: add ",
        icons::ICON_REPO,
        app.repositories.len()
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut items: Vec<ListItem> = Vec::new();
    if app.repositories.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "  No repositories linked",
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let rows = app.mission_rows();
    let width = inner.width as usize;
    for (idx, repo) in app.repositories.iter().enumerate() {
        let is_selected = rows.get(app.mission_selected) == Some(&MissionRow::Repository(idx));
        let name_width = (width / 3).max(10);
        let spans = vec![
            Span::raw("  "),
            Span::styled(
                truncate_with_ellipsis(&repo.name, name_width),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  {}", truncate_str(&repo.url, width.saturating_sub(name_width + 6))),
                Style::default().fg(Color::Blue),
            ),
        ];
        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().bg(ROW_SELECTED_BG));
        }
        items.push(ListItem::new(line));
    }

    let list = List::new(items);
    f.render_widget(list, inner);
}
