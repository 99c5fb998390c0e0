use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::metrics::Filters;
use crate::models::{Category, Status};
use crate::ui::components::widgets::{cycle_next, cycle_previous, help_bar};
use crate::view::ProjectMatrixView;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatrixFocus {
    Categories,
    Statuses,
    Table,
}

pub enum ProjectMatrixAction {
    FiltersChanged,
}

pub struct ProjectMatrixState {
    view: ProjectMatrixView,
    filters: Filters,
    focus: MatrixFocus,
    category_list: ListState,
    status_list: ListState,
    table_state: TableState,
}

impl ProjectMatrixState {
    pub fn new(view: ProjectMatrixView) -> Self {
        let mut category_list = ListState::default();
        category_list.select(Some(0));
        let mut status_list = ListState::default();
        status_list.select(Some(0));

        let mut state = Self {
            filters: view.filters.clone(),
            view,
            focus: MatrixFocus::Categories,
            category_list,
            status_list,
            table_state: TableState::default(),
        };
        state.reset_table_selection();
        state
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn view(&self) -> &ProjectMatrixView {
        &self.view
    }

    pub fn focus(&self) -> MatrixFocus {
        self.focus
    }

    /// Swaps in a view recomputed for the current filters
    pub fn set_view(&mut self, view: ProjectMatrixView) {
        self.view = view;
        self.reset_table_selection();
    }

    fn reset_table_selection(&mut self) {
        let selection = if self.view.projects.is_empty() { None } else { Some(0) };
        self.table_state.select(selection);
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            MatrixFocus::Categories => MatrixFocus::Statuses,
            MatrixFocus::Statuses => MatrixFocus::Table,
            MatrixFocus::Table => MatrixFocus::Categories,
        };
    }

    fn previous_focus(&mut self) {
        self.focus = match self.focus {
            MatrixFocus::Categories => MatrixFocus::Table,
            MatrixFocus::Statuses => MatrixFocus::Categories,
            MatrixFocus::Table => MatrixFocus::Statuses,
        };
    }

    fn move_cursor(&mut self, forward: bool) {
        let step: fn(Option<usize>, usize) -> Option<usize> =
            if forward { cycle_next } else { cycle_previous };
        match self.focus {
            MatrixFocus::Categories => {
                let i = step(self.category_list.selected(), Category::ALL.len());
                self.category_list.select(i);
            }
            MatrixFocus::Statuses => {
                let i = step(self.status_list.selected(), Status::ALL.len());
                self.status_list.select(i);
            }
            MatrixFocus::Table => {
                let i = step(self.table_state.selected(), self.view.projects.len());
                self.table_state.select(i);
            }
        }
    }

    /// Flips the filter value under the cursor; false when the table has focus
    fn toggle_under_cursor(&mut self) -> bool {
        match self.focus {
            MatrixFocus::Categories => {
                let selected = self.category_list.selected();
                if let Some(category) = selected.and_then(|i| Category::ALL.get(i)) {
                    self.filters.toggle_category(*category);
                    return true;
                }
                false
            }
            MatrixFocus::Statuses => {
                if let Some(status) = self.status_list.selected().and_then(|i| Status::ALL.get(i)) {
                    self.filters.toggle_status(*status);
                    return true;
                }
                false
            }
            MatrixFocus::Table => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ProjectMatrixAction> {
        match key {
            KeyCode::Right => self.next_focus(),
            KeyCode::Left => self.previous_focus(),
            KeyCode::Down => self.move_cursor(true),
            KeyCode::Up => self.move_cursor(false),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.toggle_under_cursor() {
                    return Some(ProjectMatrixAction::FiltersChanged);
                }
            }
            KeyCode::Char('a') => {
                if !self.filters.is_all() {
                    self.filters = Filters::all();
                    return Some(ProjectMatrixAction::FiltersChanged);
                }
            }
            _ => {}
        }
        None
    }
}

const MATRIX_DATE: &str = "%-d %b %Y";

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default().title(title).borders(Borders::ALL).border_style(style)
}

fn checkbox_items<T: Copy>(
    values: &[T],
    selected: impl Fn(T) -> bool,
    label: impl Fn(T) -> &'static str,
) -> Vec<ListItem<'static>> {
    values
        .iter()
        .map(|v| {
            let mark = if selected(*v) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, label(*v)))
        })
        .collect()
}

pub fn render_project_matrix<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    state: &mut ProjectMatrixState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(8),
                Constraint::Min(5),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let filter_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ]
            .as_ref(),
        )
        .split(chunks[0]);

    let highlight = Style::default().add_modifier(Modifier::REVERSED);
    let filters = &state.filters;

    let categories = List::new(checkbox_items(
        &Category::ALL,
        |c| filters.categories.contains(&c),
        |c| c.as_str(),
    ))
    .block(pane_block("Filter by Category", state.focus == MatrixFocus::Categories))
    .highlight_style(highlight);
    f.render_stateful_widget(categories, filter_row[0], &mut state.category_list);

    let statuses = List::new(checkbox_items(
        &Status::ALL,
        |s| filters.statuses.contains(&s),
        |s| s.as_str(),
    ))
    .block(pane_block("Filter by Status", state.focus == MatrixFocus::Statuses))
    .highlight_style(highlight);
    f.render_stateful_widget(statuses, filter_row[1], &mut state.status_list);

    let view = &state.view;
    let summary = Paragraph::new(vec![
        Spans::from(Span::styled(
            format!("{} of {} projects", view.projects.len(), view.total_projects),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(format!(
            "Labor: {} actual / {} budget",
            view.totals.actual_labor, view.totals.budget_labor
        )),
        Spans::from(format!(
            "Material: {} actual / {} budget",
            view.totals.actual_material, view.totals.budget_material
        )),
    ])
    .block(Block::default().title("Selection").borders(Borders::ALL));
    f.render_widget(summary, filter_row[2]);

    let header = Row::new(
        [
            "ID",
            "Name",
            "Category",
            "Status",
            "Owner",
            "Budget\nLabor",
            "Actual\nLabor",
            "Budget\nMaterial",
            "Actual\nMaterial",
            "Start\nDate",
            "End\nDate",
            "Critical\nPath",
        ]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    )
    .height(2)
    .bottom_margin(1);

    let rows = view.projects.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.id.clone()),
            Cell::from(p.name.clone()),
            Cell::from(p.category.as_str()),
            Cell::from(p.status.as_str()),
            Cell::from(p.owner.clone()),
            Cell::from(p.budget_labor.to_string()),
            Cell::from(p.actual_labor.to_string()),
            Cell::from(p.budget_material.to_string()),
            Cell::from(p.actual_material.to_string()),
            Cell::from(p.start_date.format(MATRIX_DATE).to_string()),
            Cell::from(p.end_date.format(MATRIX_DATE).to_string()),
            Cell::from(if p.is_critical_path { "yes" } else { "" }),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Min(14),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(8),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(pane_block("Project Matrix", state.focus == MatrixFocus::Table))
        .widths(&widths)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(table, chunks[1], &mut state.table_state);

    f.render_widget(
        help_bar(
            "Left/Right - Switch pane | Up/Down - Move | Space - Toggle filter | A - Select all",
        ),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, Dataset, MockDataSource};
    use chrono::NaiveDate;
    use tui::{backend::TestBackend, Terminal};

    fn dataset() -> Dataset {
        let anchor = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        MockDataSource::new(8, 85, anchor).load().unwrap()
    }

    #[test]
    fn test_starts_with_everything_selected() {
        let data = dataset();
        let state = ProjectMatrixState::new(ProjectMatrixView::compute(&data, &Filters::all()));
        assert!(state.filters().is_all());
        assert_eq!(state.view().projects.len(), 85);
        assert_eq!(state.focus(), MatrixFocus::Categories);
    }

    #[test]
    fn test_toggle_reports_filter_change() {
        let data = dataset();
        let mut state = ProjectMatrixState::new(ProjectMatrixView::compute(&data, &Filters::all()));

        // First category is Turbine
        assert!(matches!(
            state.handle_key(KeyCode::Char(' ')),
            Some(ProjectMatrixAction::FiltersChanged)
        ));
        assert!(!state.filters().categories.contains(&Category::Turbine));

        state.handle_key(KeyCode::Right);
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Char(' '));
        assert!(!state.filters().statuses.contains(&Status::InProgress));

        let view = ProjectMatrixView::compute(&data, state.filters());
        state.set_view(view);
        assert!(state
            .view()
            .projects
            .iter()
            .all(|p| p.category != Category::Turbine && p.status != Status::InProgress));

        assert!(state.handle_key(KeyCode::Char('a')).is_some());
        assert!(state.filters().is_all());
        assert!(state.handle_key(KeyCode::Char('a')).is_none());
    }

    #[test]
    fn test_table_focus_does_not_toggle() {
        let data = dataset();
        let mut state = ProjectMatrixState::new(ProjectMatrixView::compute(&data, &Filters::all()));
        state.handle_key(KeyCode::Left);
        assert_eq!(state.focus(), MatrixFocus::Table);
        assert!(state.handle_key(KeyCode::Enter).is_none());
        assert!(state.filters().is_all());
    }

    #[test]
    fn test_table_shows_every_project_field() {
        let data = dataset();
        let mut state = ProjectMatrixState::new(ProjectMatrixView::compute(&data, &Filters::all()));
        let first = state.view().projects[0].clone();

        let mut terminal = Terminal::new(TestBackend::new(200, 30)).unwrap();
        terminal
            .draw(|f| render_project_matrix(f, f.size(), &mut state))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol.as_str()).collect();
        for header in ["Budget", "Actual", "Material", "End", "Critical"] {
            assert!(text.contains(header), "missing header {}", header);
        }
        assert!(text.contains(&first.budget_material.to_string()));
        assert!(text.contains(&first.actual_material.to_string()));
        assert!(text.contains(&first.end_date.format(MATRIX_DATE).to_string()));
    }
}
