use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::models::{group_thousands, Status};
use crate::ui::components::timeline::{gantt_bar, window};
use crate::ui::components::widgets::{
    cycle_next, cycle_previous, metric_tile, notice_lines, tile_grid, TILE_HEIGHT,
};
use crate::view::UnitDashboardView;

const BAR_WIDTH: usize = 24;

pub struct UnitDashboardState {
    view: UnitDashboardView,
    table_state: TableState,
}

impl UnitDashboardState {
    pub fn new(view: UnitDashboardView) -> Self {
        let mut table_state = TableState::default();
        if !view.critical_path.is_empty() {
            table_state.select(Some(0));
        }
        Self { view, table_state }
    }

    pub fn view(&self) -> &UnitDashboardView {
        &self.view
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let len = self.view.critical_path.len();
        match key {
            KeyCode::Down => self.table_state.select(cycle_next(self.table_state.selected(), len)),
            KeyCode::Up => self
                .table_state
                .select(cycle_previous(self.table_state.selected(), len)),
            _ => {}
        }
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::NotStarted => Color::Gray,
        Status::InProgress => Color::Cyan,
        Status::Completed => Color::Green,
        Status::Delayed => Color::Red,
    }
}

pub fn render_unit_dashboard<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    state: &mut UnitDashboardState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(2 * TILE_HEIGHT),
                Constraint::Min(6),
            ]
            .as_ref(),
        )
        .split(area);

    let view = &state.view;
    let context = &view.context;
    let title = Paragraph::new(Spans::from(vec![
        Span::styled(
            format!("{} ({})", context.unit, context.unit_type),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {} phase, {}", context.phase, context.day_label())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let tiles = tile_grid(chunks[1], 2, 3);

    let slip = view.schedule_variance_days;
    f.render_widget(
        metric_tile(
            "Schedule Variance",
            format!("{} Days", slip),
            if slip < 0 { "Critical Path Delay" } else { "On Schedule" }.to_string(),
            if slip < 0 { Color::Red } else { Color::Green },
        ),
        tiles[0],
    );
    f.render_widget(
        metric_tile(
            "Budget Utilization",
            format!("{:.0}%", view.utilization_pct),
            "actual vs budget".to_string(),
            Color::Gray,
        ),
        tiles[1],
    );
    f.render_widget(
        metric_tile(
            "Open Projects",
            format!("{} / {}", view.status.open(), view.status.total()),
            format!("{} completed", view.status.completed),
            Color::Green,
        ),
        tiles[2],
    );
    f.render_widget(
        metric_tile(
            "Safety Incidents",
            view.safety.unit_incidents.to_string(),
            format!("{} Man-hours", group_thousands(view.safety.unit_man_hours)),
            if view.safety.unit_incidents == 0 { Color::Green } else { Color::Red },
        ),
        tiles[3],
    );
    f.render_widget(
        metric_tile(
            "Critical Path",
            format!("{} tasks", view.critical_path.len()),
            format!("{} delayed", view.critical_delayed),
            if view.critical_delayed > 0 { Color::Red } else { Color::Green },
        ),
        tiles[4],
    );
    f.render_widget(
        metric_tile(
            "Delayed",
            view.status.delayed.to_string(),
            format!("{} not started", view.status.not_started),
            Color::Yellow,
        ),
        tiles[5],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(chunks[2]);

    let span = window(view.critical_path.iter().map(|p| (p.start_date, p.end_date)));
    let header = Row::new(
        ["ID", "Name", "Status", "Timeline"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    )
    .bottom_margin(1);

    let rows = view.critical_path.iter().map(|p| {
        let bar = span
            .map(|w| gantt_bar(p.start_date, p.end_date, w, BAR_WIDTH))
            .unwrap_or_default();
        Row::new(vec![
            Cell::from(p.id.clone()),
            Cell::from(p.name.clone()),
            Cell::from(p.status.as_str()).style(Style::default().fg(status_color(p.status))),
            Cell::from(bar).style(Style::default().fg(status_color(p.status))),
        ])
    });

    let widths = [
        Constraint::Length(9),
        Constraint::Length(28),
        Constraint::Length(12),
        Constraint::Min(10),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(
            Block::default()
                .title("Critical Path Tasks")
                .borders(Borders::ALL),
        )
        .widths(&widths)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_stateful_widget(table, body[0], &mut state.table_state);

    let risks = Paragraph::new(notice_lines(&state.view.risks))
        .block(Block::default().title("Top Risks / Issues").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(risks, body[1]);
}
