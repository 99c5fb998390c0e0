use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::OutageContext;
use crate::nav::Screen;

pub fn render_sidebar<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    current: Screen,
    context: &OutageContext,
    source: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(6)].as_ref())
        .split(area);

    let items: Vec<ListItem> = Screen::ALL
        .iter()
        .map(|screen| ListItem::new(screen.label()))
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(current.index()));

    let nav = List::new(items)
        .block(
            Block::default()
                .title("Outage Excellence")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(nav, chunks[0], &mut list_state);

    let label = Style::default().fg(Color::Yellow);
    let info = Paragraph::new(vec![
        Spans::from(Span::styled("Outage Context", label)),
        Spans::from(context.unit.as_str()),
        Spans::from(format!("Type: {}", context.unit_type)),
        Spans::from(format!("Status: {} ({})", context.phase, context.day_label())),
        Spans::from(""),
        Spans::from(Span::styled("Data", label)),
        Spans::from(source),
        Spans::from(""),
        Spans::from(Span::styled(
            "1-6 / Tab - Switch screen | Q - Quit",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: true });
    f.render_widget(info, chunks[1]);
}
