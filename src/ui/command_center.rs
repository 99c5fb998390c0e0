use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::format_delta;
use crate::ui::components::timeline::{gantt_bar, window};
use crate::ui::components::widgets::{
    metric_tile, severity_color, tile_grid, variance_color, TILE_HEIGHT,
};
use crate::view::CommandCenterView;

const BAR_WIDTH: usize = 36;

pub struct CommandCenterState {
    view: CommandCenterView,
}

impl CommandCenterState {
    pub fn new(view: CommandCenterView) -> Self {
        Self { view }
    }
}

pub fn render_command_center<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    state: &CommandCenterState,
) {
    let view = &state.view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2 * TILE_HEIGHT), Constraint::Min(5)].as_ref())
        .split(area);

    let tiles = tile_grid(chunks[0], 2, 3);

    let variance = view.totals.variance();
    let safety = &view.safety;
    f.render_widget(
        metric_tile(
            "Active Outages",
            view.fleet.len().to_string(),
            format!("{} packages delayed", view.status.delayed),
            Color::Yellow,
        ),
        tiles[0],
    );
    f.render_widget(
        metric_tile(
            "Fleet TRIR (Safety)",
            format!("{:.1}", safety.fleet_trir),
            format!("Target: {:.1}", safety.trir_target),
            if safety.on_target() { Color::Green } else { Color::Red },
        ),
        tiles[1],
    );
    f.render_widget(
        metric_tile(
            "Total Committed",
            view.totals.actual().to_string(),
            format!("{} vs budget", format_delta(variance)),
            variance_color(variance),
        ),
        tiles[2],
    );
    let supply_tile = match &view.supply_chain {
        Some(risk) => metric_tile(
            "Supply Chain Risk",
            risk.level.clone(),
            risk.detail.clone(),
            severity_color(risk.severity),
        ),
        None => metric_tile(
            "Supply Chain Risk",
            "None".to_string(),
            "no parts at risk".to_string(),
            Color::Green,
        ),
    };
    f.render_widget(supply_tile, tiles[3]);
    f.render_widget(
        metric_tile(
            "Budget Utilization",
            format!("{:.0}%", view.totals.utilization_pct()),
            format!("of {}", view.totals.budget()),
            Color::Gray,
        ),
        tiles[4],
    );
    f.render_widget(
        metric_tile(
            "Open Packages",
            format!("{} / {}", view.status.open(), view.status.total()),
            format!("{} completed", view.status.completed),
            Color::Green,
        ),
        tiles[5],
    );

    let span = window(view.fleet.iter().map(|o| (o.start, o.finish)));
    let header = Row::new(
        ["Outage", "Start", "Finish", "Region", "Schedule"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    )
    .height(1)
    .bottom_margin(1);

    let rows = view.fleet.iter().map(|outage| {
        let bar = span
            .map(|w| gantt_bar(outage.start, outage.finish, w, BAR_WIDTH))
            .unwrap_or_default();
        let color = if outage.resource.ends_with('A') {
            Color::Cyan
        } else {
            Color::Magenta
        };
        Row::new(vec![
            Cell::from(outage.task.clone()),
            Cell::from(outage.start.format("%Y-%m-%d").to_string()),
            Cell::from(outage.finish.format("%Y-%m-%d").to_string()),
            Cell::from(outage.resource.clone()),
            Cell::from(bar).style(Style::default().fg(color)),
        ])
    });

    let widths = [
        Constraint::Length(28),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Min(10),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(
            Block::default()
                .title("Global Fleet Schedule")
                .borders(Borders::ALL),
        )
        .widths(&widths);

    f.render_widget(table, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, MockDataSource};
    use chrono::NaiveDate;
    use tui::{backend::TestBackend, Terminal};

    #[test]
    fn test_renders_safety_and_supply_chain_tiles() {
        let anchor = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        let data = MockDataSource::new(8, 85, anchor).load().unwrap();
        let state = CommandCenterState::new(CommandCenterView::compute(&data));

        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|f| render_command_center(f, f.size(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol.as_str()).collect();
        assert!(text.contains("Fleet TRIR (Safety)"));
        assert!(text.contains("Target: 0.0"));
        assert!(text.contains("Supply Chain Risk"));
        assert!(text.contains("2 Rotors in Transit"));
        assert!(text.contains("Global Fleet Schedule"));
    }
}
