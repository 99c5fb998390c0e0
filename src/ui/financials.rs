use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::{format_delta, Money};
use crate::ui::components::widgets::variance_color;
use crate::view::FinancialsView;

pub struct FinancialsState {
    view: FinancialsView,
}

impl FinancialsState {
    pub fn new(view: FinancialsView) -> Self {
        Self { view }
    }
}

fn thousands(amount: Money) -> u64 {
    amount.dollars() / 1_000
}

fn variance_chart<'a>(title: &'a str, data: &'a [(&'a str, u64)], color: Color) -> BarChart<'a> {
    BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(data)
        .bar_width(14)
        .bar_gap(4)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(Color::White))
}

pub fn render_financials<B: Backend>(f: &mut Frame<B>, area: Rect, state: &FinancialsState) {
    let view = &state.view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[0]);

    let totals = &view.totals;
    let labor_title = format!("Labor Variance ($k) {}", format_delta(totals.labor_variance()));
    let labor = [
        ("Budget", thousands(totals.budget_labor)),
        ("Actual", thousands(totals.actual_labor)),
    ];
    f.render_widget(variance_chart(&labor_title, &labor, Color::Blue), charts[0]);

    let material_title = format!(
        "Material Variance ($k) {}",
        format_delta(totals.material_variance())
    );
    let material = [
        ("Budget", thousands(totals.budget_material)),
        ("Actual", thousands(totals.actual_material)),
    ];
    f.render_widget(variance_chart(&material_title, &material, Color::Green), charts[1]);

    let header = Row::new(
        ["ID", "Name", "Owner", "Variance"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    )
    .bottom_margin(1);

    let rows = view.top_overruns.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.id.clone()),
            Cell::from(row.name.clone()),
            Cell::from(row.owner.clone()),
            Cell::from(format_delta(row.variance))
                .style(Style::default().fg(variance_color(row.variance))),
        ])
    });

    let widths = [
        Constraint::Length(9),
        Constraint::Length(30),
        Constraint::Length(12),
        Constraint::Min(12),
    ];
    let title = format!("Cost Overrun Alert (Top {} Projects)", view.top_overruns.len());
    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .widths(&widths);
    f.render_widget(table, chunks[1]);
}
