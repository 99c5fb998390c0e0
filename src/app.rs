//! Session context: the dataset snapshot, the active screen and its local state

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use tracing::{debug, info, warn};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::data::Dataset;
use crate::metrics::Filters;
use crate::nav::{Navigator, Screen};
use crate::shift_log::ShiftLogSink;
use crate::ui::{
    closeout::{render_closeout, CloseoutState},
    command_center::{render_command_center, CommandCenterState},
    execution::{render_execution, ExecutionAction, ExecutionState},
    financials::{render_financials, FinancialsState},
    project_matrix::{render_project_matrix, ProjectMatrixAction, ProjectMatrixState},
    sidebar::render_sidebar,
    unit_dashboard::{render_unit_dashboard, UnitDashboardState},
};
use crate::view::{
    CloseoutView, CommandCenterView, ExecutionView, FinancialsView, ProjectMatrixView,
    UnitDashboardView,
};

/// Local state of the active screen, rebuilt on every transition
pub enum ScreenState {
    CommandCenter(CommandCenterState),
    UnitDashboard(UnitDashboardState),
    ProjectMatrix(ProjectMatrixState),
    Financials(FinancialsState),
    Execution(ExecutionState),
    Closeout(CloseoutState),
}

impl ScreenState {
    fn enter(screen: Screen, dataset: &Dataset, top_n: usize, today: NaiveDate) -> Self {
        match screen {
            Screen::CommandCenter => {
                let view = CommandCenterView::compute(dataset);
                ScreenState::CommandCenter(CommandCenterState::new(view))
            }
            Screen::UnitDashboard => {
                let view = UnitDashboardView::compute(dataset);
                ScreenState::UnitDashboard(UnitDashboardState::new(view))
            }
            Screen::ProjectMatrix => {
                let view = ProjectMatrixView::compute(dataset, &Filters::all());
                ScreenState::ProjectMatrix(ProjectMatrixState::new(view))
            }
            Screen::Financials => {
                let view = FinancialsView::compute(dataset, top_n);
                ScreenState::Financials(FinancialsState::new(view))
            }
            Screen::Execution => {
                let view = ExecutionView::compute(dataset);
                ScreenState::Execution(ExecutionState::new(view, today))
            }
            Screen::Closeout => {
                let view = CloseoutView::compute(dataset);
                ScreenState::Closeout(CloseoutState::new(view))
            }
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            ScreenState::CommandCenter(_) => Screen::CommandCenter,
            ScreenState::UnitDashboard(_) => Screen::UnitDashboard,
            ScreenState::ProjectMatrix(_) => Screen::ProjectMatrix,
            ScreenState::Financials(_) => Screen::Financials,
            ScreenState::Execution(_) => Screen::Execution,
            ScreenState::Closeout(_) => Screen::Closeout,
        }
    }

    fn captures_input(&self) -> bool {
        match self {
            ScreenState::Execution(state) => state.captures_input(),
            _ => false,
        }
    }
}

// Main application state
pub struct App {
    dataset: Arc<Dataset>,
    source: String,
    navigator: Navigator,
    screen_state: ScreenState,
    shift_log: Box<dyn ShiftLogSink>,
    top_n: usize,
    today: NaiveDate,
}

impl App {
    pub fn new(
        dataset: Arc<Dataset>,
        source: String,
        shift_log: Box<dyn ShiftLogSink>,
        top_n: usize,
        today: NaiveDate,
    ) -> Self {
        let navigator = Navigator::default();
        let screen_state = ScreenState::enter(navigator.current(), &dataset, top_n, today);
        Self {
            dataset,
            source,
            navigator,
            screen_state,
            shift_log,
            top_n,
            today,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn screen_state(&self) -> &ScreenState {
        &self.screen_state
    }

    /// Switches screens, discarding the old screen's local state
    pub fn navigate(&mut self, screen: Screen) {
        if let Some(transition) = self.navigator.select(screen) {
            info!(from = ?transition.from, to = ?transition.to, "screen changed");
            self.screen_state =
                ScreenState::enter(transition.to, &self.dataset, self.top_n, self.today);
        }
    }

    /// Handles one key press; returns true when the user asked to quit
    pub fn handle_key(&mut self, key: KeyCode) -> Result<bool> {
        if !self.screen_state.captures_input() {
            match key {
                KeyCode::Char('q') => return Ok(true),
                KeyCode::Char(c @ '1'..='6') => {
                    let index = c as usize - '1' as usize;
                    if let Some(screen) = Screen::from_index(index) {
                        self.navigate(screen);
                    }
                    return Ok(false);
                }
                KeyCode::Tab => {
                    self.navigate(self.navigator.current().next());
                    return Ok(false);
                }
                KeyCode::BackTab => {
                    self.navigate(self.navigator.current().previous());
                    return Ok(false);
                }
                _ => {}
            }
        }

        match &mut self.screen_state {
            ScreenState::UnitDashboard(state) => state.handle_key(key),
            ScreenState::ProjectMatrix(state) => {
                if let Some(ProjectMatrixAction::FiltersChanged) = state.handle_key(key) {
                    let view = ProjectMatrixView::compute(&self.dataset, state.filters());
                    debug!(
                        categories = view.filters.categories.len(),
                        statuses = view.filters.statuses.len(),
                        matches = view.projects.len(),
                        "matrix filters changed"
                    );
                    state.set_view(view);
                }
            }
            ScreenState::Execution(state) => {
                if let Some(ExecutionAction::Submit(entry)) = state.handle_key(key) {
                    match self.shift_log.submit(entry) {
                        Ok(id) => state.submitted(id),
                        Err(e) => {
                            warn!(error = %e, "shift log rejected");
                            state.submit_failed(e.to_string());
                        }
                    }
                }
            }
            ScreenState::Closeout(state) => state.handle_key(key),
            ScreenState::CommandCenter(_) | ScreenState::Financials(_) => {}
        }

        Ok(false)
    }

    pub fn render<B: Backend>(&mut self, f: &mut Frame<B>) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(40)].as_ref())
            .split(f.size());

        render_sidebar(
            f,
            columns[0],
            self.navigator.current(),
            &self.dataset.context,
            &self.source,
        );

        let area = columns[1];
        match &mut self.screen_state {
            ScreenState::CommandCenter(state) => render_command_center(f, area, state),
            ScreenState::UnitDashboard(state) => render_unit_dashboard(f, area, state),
            ScreenState::ProjectMatrix(state) => render_project_matrix(f, area, state),
            ScreenState::Financials(state) => render_financials(f, area, state),
            ScreenState::Execution(state) => render_execution(f, area, state),
            ScreenState::Closeout(state) => render_closeout(f, area, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, MockDataSource};
    use crate::shift_log::InMemoryShiftLog;
    use tui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        let source = MockDataSource::new(21, 85, today);
        let dataset = Arc::new(source.load().unwrap());
        App::new(dataset, source.describe(), Box::new(InMemoryShiftLog::new()), 5, today)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key).unwrap();
        }
    }

    #[test]
    fn test_starts_on_command_center() {
        let app = app();
        assert_eq!(app.current_screen(), Screen::CommandCenter);
        assert_eq!(app.screen_state().screen(), Screen::CommandCenter);
    }

    #[test]
    fn test_digit_and_tab_navigation() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('4')]);
        assert_eq!(app.current_screen(), Screen::Financials);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.current_screen(), Screen::Execution);
        press(&mut app, &[KeyCode::BackTab, KeyCode::BackTab]);
        assert_eq!(app.current_screen(), Screen::ProjectMatrix);
        assert_eq!(app.screen_state().screen(), Screen::ProjectMatrix);
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('x')).unwrap());
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn test_matrix_filters_reset_after_leaving() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char(' ')]);
        let ScreenState::ProjectMatrix(state) = app.screen_state() else {
            panic!("expected matrix");
        };
        assert!(!state.filters().is_all());
        assert!(state.view().projects.len() < 85);

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('3')]);
        let ScreenState::ProjectMatrix(state) = app.screen_state() else {
            panic!("expected matrix");
        };
        assert!(state.filters().is_all());
        assert_eq!(state.view().projects.len(), 85);
    }

    #[test]
    fn test_reselecting_current_screen_keeps_state() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char(' '), KeyCode::Char('3')]);
        let ScreenState::ProjectMatrix(state) = app.screen_state() else {
            panic!("expected matrix");
        };
        assert!(!state.filters().is_all());
    }

    #[test]
    fn test_editing_form_swallows_navigation_keys() {
        let mut app = app();
        press(
            &mut app,
            &[
                KeyCode::Char('5'),
                KeyCode::Char('t'),
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Enter,
                KeyCode::Char('2'),
                KeyCode::Char('q'),
            ],
        );
        assert_eq!(app.current_screen(), Screen::Execution);
        let ScreenState::Execution(state) = app.screen_state() else {
            panic!("expected execution");
        };
        assert_eq!(state.form().notes, "2q");
    }

    #[test]
    fn test_submitting_shift_log_confirms() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('5'), KeyCode::Char('t'), KeyCode::Char('s')]);
        let ScreenState::Execution(state) = app.screen_state() else {
            panic!("expected execution");
        };
        assert_eq!(
            state.confirmation(),
            Some("Log entry LOG-0001 saved to the shift log.")
        );
    }

    #[test]
    fn test_every_screen_renders() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        for screen in Screen::ALL {
            app.navigate(screen);
            terminal.draw(|f| app.render(f)).unwrap();
        }

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol.as_str()).collect();
        assert!(text.contains("Pending Actions for Book Closing"));
        assert!(text.contains("6. Closeout"));
    }
}
