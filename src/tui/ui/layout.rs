//! Text measurement and popup geometry for the renderer.
//!
//! Columns are display columns, not bytes or chars; wide glyphs count as two.

use once_cell::sync::Lazy;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One shared run of spaces; padding slices out of it instead of allocating.
/// Gaps wider than the buffer are clamped.
static SPACES: Lazy<String> = Lazy::new(|| " ".repeat(256));

fn spaces(n: usize) -> &'static str {
    &SPACES[..n.min(SPACES.len())]
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` that fits in `max` columns.
fn clip(text: &str, max: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        end = i + ch.len_utf8();
    }
    &text[..end]
}

/// Clip to `max` columns, marking cut text with `…`.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    match max {
        0 => String::new(),
        1 => "…".to_string(),
        _ => format!("{}…", clip(text, max - 1)),
    }
}

/// Clip to `max` columns, marking cut text with `...`. The plain-ASCII
/// variant for secondary columns like urls and briefs.
pub fn truncate_str(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return clip(text, max).to_string();
    }
    format!("{}...", clip(text, max - 3))
}

/// Clip and pad to exactly `width` columns.
pub fn pad_to_width(text: &str, width: usize, alignment: Alignment) -> String {
    let clipped = clip(text, width);
    let gap = width.saturating_sub(display_width(clipped));
    match alignment {
        Alignment::Left => format!("{clipped}{}", spaces(gap)),
        Alignment::Right => format!("{}{clipped}", spaces(gap)),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{clipped}{}", spaces(left), spaces(gap - left))
        }
    }
}

/// Clip a line's spans so the whole line fits in `max` columns.
fn clip_line(line: Line<'_>, max: usize) -> Line<'_> {
    let Line {
        spans,
        alignment,
        style,
    } = line;

    let mut kept: Vec<Span<'_>> = Vec::with_capacity(spans.len());
    let mut used = 0usize;
    for span in spans {
        let w = display_width(span.content.as_ref());
        if used + w <= max {
            used += w;
            kept.push(span);
            continue;
        }
        let head = clip(span.content.as_ref(), max - used).to_string();
        if !head.is_empty() {
            kept.push(Span::styled(head, span.style));
        }
        break;
    }

    Line {
        spans: kept,
        alignment,
        style,
    }
}

fn gap_row(width: usize) -> Line<'static> {
    Line::from(Span::styled(
        pad_to_width("…", width, Alignment::Center),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Fit a block of lines into `area`. Each line is clipped horizontally;
/// vertical overflow keeps the top, a centered `…` row, and the last
/// `keep_bottom` lines, so footers stay visible in small panels.
pub fn fit_lines_to_area<'a>(
    lines: Vec<Line<'a>>,
    area: Rect,
    keep_bottom: usize,
) -> Vec<Line<'a>> {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut clipped: Vec<Line<'a>> = lines.into_iter().map(|l| clip_line(l, width)).collect();
    if clipped.len() <= height {
        return clipped;
    }

    let keep_bottom = keep_bottom.min(height);
    let head = height - keep_bottom;
    let mut out: Vec<Line<'a>> = Vec::with_capacity(height);
    if head > 0 {
        out.extend(clipped.drain(..head - 1));
        out.push(gap_row(width));
    }
    let tail_start = clipped.len() - keep_bottom;
    out.extend(clipped.drain(tail_start..));
    out
}

/// Centered popup rectangle: `percent_x`/`percent_y` of the container,
/// raised to the given minimums, clamped to leave the outer border visible.
pub fn popup_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    container: Rect,
) -> Rect {
    let width = (container.width.saturating_mul(percent_x) / 100)
        .max(min_width)
        .min(container.width.saturating_sub(2).max(1));
    let height = (container.height.saturating_mul(percent_y) / 100)
        .max(min_height)
        .min(container.height.saturating_sub(2).max(1));

    Rect {
        x: container.x + container.width.saturating_sub(width) / 2,
        y: container.y + container.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_display_columns() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello…");
        assert_eq!(truncate_with_ellipsis("hi", 1), "…");
        assert_eq!(truncate_str("a long repository name", 10), "a long ...");
        assert_eq!(truncate_str("short", 10), "short");
    }

    #[test]
    fn padding_respects_alignment() {
        assert_eq!(pad_to_width("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(pad_to_width("ab", 4, Alignment::Right), "  ab");
        assert_eq!(pad_to_width("ab", 4, Alignment::Center), " ab ");
        assert_eq!(pad_to_width("abcdef", 4, Alignment::Left), "abcd");
    }

    #[test]
    fn popup_is_centered_and_clamped() {
        let outer = Rect::new(0, 0, 100, 40);
        let popup = popup_rect(50, 50, 30, 10, outer);
        assert_eq!((popup.width, popup.height), (50, 20));
        assert_eq!((popup.x, popup.y), (25, 10));

        let tiny = Rect::new(0, 0, 20, 8);
        let clamped = popup_rect(50, 50, 30, 10, tiny);
        assert!(clamped.width <= tiny.width);
        assert!(clamped.height <= tiny.height);
    }

    #[test]
    fn overflow_keeps_top_gap_and_bottom() {
        let lines: Vec<Line> = (0..10).map(|i| Line::from(format!("line {i}"))).collect();
        let area = Rect::new(0, 0, 10, 5);
        let fitted = fit_lines_to_area(lines, area, 2);
        assert_eq!(fitted.len(), 5);
        assert_eq!(fitted[0].spans[0].content.as_ref(), "line 0");
        assert_eq!(fitted[1].spans[0].content.as_ref(), "line 1");
        assert!(fitted[2].spans[0].content.as_ref().contains('…'));
        assert_eq!(fitted[3].spans[0].content.as_ref(), "line 8");
        assert_eq!(fitted[4].spans[0].content.as_ref(), "line 9");
    }

    #[test]
    fn lines_are_clipped_to_the_area_width() {
        let lines = vec![Line::from("a line wider than the panel")];
        let area = Rect::new(0, 0, 6, 3);
        let fitted = fit_lines_to_area(lines, area, 0);
        assert_eq!(fitted[0].spans[0].content.as_ref(), "a line");
    }
}
