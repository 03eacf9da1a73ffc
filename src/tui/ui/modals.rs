//! Modal popup rendering: status filter, repository editor, delete
//! confirmation, new feature.

use super::icons;
use super::layout::{fit_lines_to_area, popup_rect, truncate_str};
use super::status::bounty_status_config;
use crate::data::BountyStatus;
use crate::tui::app::RepoField;
use crate::tui::App;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the bounty status filter popover.
pub fn draw_status_filter(f: &mut Frame, app: &App) {
    let area = popup_rect(40, 35, 34, 10, f.area());

    f.render_widget(Clear, area);

    let active_style = Style::default().fg(Color::White);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = vec![Line::from("")];

    for (idx, status) in BountyStatus::all().iter().enumerate() {
        let is_selected = app.status_filters.is_set(*status);
        let cfg = bounty_status_config(*status);
        let marker = if is_selected { "[x]" } else { "[ ]" };
        let style = if is_selected { active_style } else { dim_style };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", idx + 1), style),
            Span::styled(format!("{} ", cfg.icon), cfg.style),
            Span::styled(format!("{:<12}", status.label()), style),
            Span::styled(format!("  {}", marker), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Empty selection shows everything",
        dim_style,
    )));
    lines.push(Line::from(Span::styled(
        "  Press 1-4 to toggle | Esc: Close",
        dim_style,
    )));

    let block = Block::default()
        .title(format!(" {} Status ", icons::ICON_FILTER))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}

/// Draw the repository add/edit form.
pub fn draw_repo_editor(f: &mut Frame, app: &App) {
    let area = popup_rect(50, 35, 44, 10, f.area());

    f.render_widget(Clear, area);

    let form = &app.repo_form;
    let label_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);

    let field_line = |label: &str, value: &str, focused: bool| -> Line<'static> {
        let mut spans = vec![Span::styled(format!("  {label:<6}"), label_style)];
        spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(Color::White),
        ));
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    let mut lines = vec![
        Line::from(""),
        field_line("Name", &form.name, form.focus == RepoField::Name),
        Line::from(""),
        field_line("Url", &form.url, form.focus == RepoField::Url),
        Line::from(""),
    ];

    if form.is_edit() {
        lines.push(Line::from(Span::styled(
            "  Tab: field | Enter: save | Ctrl+D: delete | Esc: close",
            dim_style,
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Tab: field | Enter: save | Esc: close",
            dim_style,
        )));
    }

    let title = if form.is_edit() {
        format!(" {} Edit Repository ", icons::ICON_REPO)
    } else {
        format!(" {} Add Repository ", icons::ICON_REPO)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines).block(block);

    f.render_widget(paragraph, area);
}

/// Draw the delete confirmation, layered over the repository editor.
pub fn draw_confirm_delete(f: &mut Frame, app: &App) {
    let area = popup_rect(40, 25, 40, 7, f.area());

    f.render_widget(Clear, area);

    let name = truncate_str(&app.repo_form.name, 28);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {} ", icons::ICON_WARN),
                Style::default().fg(Color::Red),
            ),
            Span::styled("Delete repository ", Style::default().fg(Color::White)),
            Span::styled(
                name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  y: delete | n/Esc: keep",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines).block(block);

    f.render_widget(paragraph, area);
}

/// Draw the new-feature form.
pub fn draw_new_feature(f: &mut Frame, app: &App) {
    let area = popup_rect(45, 25, 40, 8, f.area());

    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Name  ", Style::default().fg(Color::Cyan)),
            Span::styled(
                app.feature_form.name.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter: create | Esc: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(format!(" {} New Feature ", icons::ICON_FEATURE))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines).block(block);

    f.render_widget(paragraph, area);
}
