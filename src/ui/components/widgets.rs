use tui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::{Notice, Severity};

/// Index after `selected`, wrapping to the top
pub fn cycle_next(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Index before `selected`, wrapping to the bottom
pub fn cycle_previous(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    })
}

/// A bordered KPI tile: big value with a caption underneath
pub fn metric_tile<'a>(
    title: &'a str,
    value: String,
    caption: String,
    caption_color: Color,
) -> Paragraph<'a> {
    Paragraph::new(vec![
        Spans::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled(caption, Style::default().fg(caption_color))),
    ])
    .block(Block::default().title(title).borders(Borders::ALL))
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub fn notice_lines(notices: &[Notice]) -> Vec<Spans<'_>> {
    notices
        .iter()
        .map(|n| {
            Spans::from(vec![
                Span::styled(
                    format!("{}: ", n.title),
                    Style::default()
                        .fg(severity_color(n.severity))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(n.detail.as_str()),
            ])
        })
        .collect()
}

pub fn help_bar(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true })
}

/// Color for a signed variance: red for overruns, green for savings
pub fn variance_color(cents: i64) -> Color {
    if cents > 0 {
        Color::Red
    } else {
        Color::Green
    }
}

/// Height of one row of KPI tiles
pub const TILE_HEIGHT: u16 = 4;

/// Splits `area` into `rows` x `cols` equal tiles, row by row
pub fn tile_grid(area: Rect, rows: u16, cols: u16) -> Vec<Rect> {
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(TILE_HEIGHT); rows as usize])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols as usize])
                .split(*row)
        })
        .collect()
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
