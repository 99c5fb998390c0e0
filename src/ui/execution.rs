use std::path::Path;

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::error::Result;
use crate::models::{Attachment, LogEntryId, Shift, ShiftLogEntry};
use crate::ui::components::date_input::DateInputState;
use crate::ui::components::widgets::{centered_rect, help_bar};
use crate::view::ExecutionView;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExecutionTab {
    AssetView,
    ShiftLogs,
}

impl ExecutionTab {
    fn index(self) -> usize {
        match self {
            ExecutionTab::AssetView => 0,
            ExecutionTab::ShiftLogs => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShiftLogField {
    Shift,
    Date,
    Notes,
    Attachment,
}

pub enum ExecutionAction {
    Submit(ShiftLogEntry),
}

/// Daily shift log form
pub struct ShiftLogForm {
    pub shift: Shift,
    pub date_state: DateInputState,
    pub notes: String,
    pub attachment_path: String,
    pub current_field: ShiftLogField,
    pub editing: bool,
}

impl ShiftLogForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            shift: Shift::Day,
            date_state: DateInputState::new(date),
            notes: String::new(),
            attachment_path: String::new(),
            current_field: ShiftLogField::Shift,
            editing: false,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ShiftLogField::Shift => ShiftLogField::Date,
            ShiftLogField::Date => ShiftLogField::Notes,
            ShiftLogField::Notes => ShiftLogField::Attachment,
            ShiftLogField::Attachment => ShiftLogField::Shift,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ShiftLogField::Shift => ShiftLogField::Attachment,
            ShiftLogField::Date => ShiftLogField::Shift,
            ShiftLogField::Notes => ShiftLogField::Date,
            ShiftLogField::Attachment => ShiftLogField::Notes,
        };
    }

    /// Enter on a field: flips the shift, or starts/stops text and date editing
    pub fn activate(&mut self) {
        if self.current_field == ShiftLogField::Shift {
            self.shift = self.shift.toggle();
            return;
        }
        self.editing = !self.editing;
        if self.current_field == ShiftLogField::Date {
            self.date_state.toggle_editing();
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
        self.date_state.editing = false;
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let text = match self.current_field {
            ShiftLogField::Date => {
                self.date_state.handle_input(key);
                return;
            }
            ShiftLogField::Notes => &mut self.notes,
            ShiftLogField::Attachment => &mut self.attachment_path,
            ShiftLogField::Shift => return,
        };

        match key {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => {}
        }
    }

    /// Builds the entry to submit; fails if the attachment path is unreadable
    pub fn build_entry(&self) -> Result<ShiftLogEntry> {
        let path = self.attachment_path.trim();
        let attachment = if path.is_empty() {
            None
        } else {
            Some(Attachment::from_path(Path::new(path))?)
        };

        Ok(ShiftLogEntry {
            shift: self.shift,
            date: self.date_state.date,
            notes: self.notes.trim().to_string(),
            attachment,
        })
    }
}

pub struct ExecutionState {
    view: ExecutionView,
    tab: ExecutionTab,
    form: ShiftLogForm,
    today: NaiveDate,
    confirmation: Option<String>,
    error: Option<String>,
}

impl ExecutionState {
    pub fn new(view: ExecutionView, today: NaiveDate) -> Self {
        Self {
            view,
            tab: ExecutionTab::AssetView,
            form: ShiftLogForm::new(today),
            today,
            confirmation: None,
            error: None,
        }
    }

    pub fn tab(&self) -> ExecutionTab {
        self.tab
    }

    pub fn form(&self) -> &ShiftLogForm {
        &self.form
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Keys go to the form while a field is being edited
    pub fn captures_input(&self) -> bool {
        self.tab == ExecutionTab::ShiftLogs && self.form.editing
    }

    pub fn submitted(&mut self, id: LogEntryId) {
        self.confirmation = Some(format!("Log entry {} saved to the shift log.", id));
        self.error = None;
        self.form = ShiftLogForm::new(self.today);
    }

    pub fn submit_failed(&mut self, message: String) {
        self.error = Some(message);
    }

    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            ExecutionTab::AssetView => ExecutionTab::ShiftLogs,
            ExecutionTab::ShiftLogs => ExecutionTab::AssetView,
        };
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ExecutionAction> {
        if self.confirmation.take().is_some() {
            return None;
        }

        if self.form.editing {
            match key {
                KeyCode::Esc | KeyCode::Enter => self.form.stop_editing(),
                _ => self.form.edit_current_field(key),
            }
            return None;
        }

        match key {
            KeyCode::Char('t') => self.switch_tab(),
            _ if self.tab == ExecutionTab::AssetView => {}
            KeyCode::Up => self.form.previous_field(),
            KeyCode::Down => self.form.next_field(),
            KeyCode::Enter => {
                self.error = None;
                self.form.activate();
            }
            KeyCode::Char('s') => match self.form.build_entry() {
                Ok(entry) => return Some(ExecutionAction::Submit(entry)),
                Err(e) => self.error = Some(e.to_string()),
            },
            _ => {}
        }
        None
    }
}

pub fn render_execution<B: Backend>(f: &mut Frame<B>, area: Rect, state: &ExecutionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let titles = ["Asset View (GT/HRSG)", "Daily Shift Logs"]
        .iter()
        .map(|t| Spans::from(*t))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .block(Block::default().title("Execution & Asset Drill-Down").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let help = match state.tab {
        ExecutionTab::AssetView => "T - Switch tab",
        ExecutionTab::ShiftLogs if state.form.editing => {
            "Enter/Esc - Finish field | Left/Right - Switch date part"
        }
        ExecutionTab::ShiftLogs => {
            "Up/Down - Navigate fields | Enter - Edit field | S - Submit log | T - Switch tab"
        }
    };

    match state.tab {
        ExecutionTab::AssetView => render_asset_view(f, chunks[1], state),
        ExecutionTab::ShiftLogs => render_shift_log_form(f, chunks[1], state),
    }
    f.render_widget(help_bar(help), chunks[2]);

    if let Some(message) = &state.confirmation {
        let popup_area = centered_rect(50, 20, area);
        let popup = Paragraph::new(vec![
            Spans::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Spans::from(""),
            Spans::from("Press any key to continue"),
        ])
        .block(Block::default().title("Submitted").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

fn render_asset_view<B: Backend>(f: &mut Frame<B>, area: Rect, state: &ExecutionState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)].as_ref())
        .split(area);

    let diagram = Paragraph::new(vec![
        Spans::from(""),
        Spans::from("[Diagram: GT Cross Section]"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(diagram, columns[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = match &state.view.finding {
        Some(finding) => vec![
            Spans::from(Span::styled(format!("Component: {}", finding.component), bold)),
            Spans::from(""),
            Spans::from(vec![Span::styled("Status: ", bold), Span::raw(finding.status.as_str())]),
            Spans::from(vec![Span::styled("Finding: ", bold), Span::raw(finding.finding.as_str())]),
            Spans::from(vec![Span::styled("Action: ", bold), Span::raw(finding.action.as_str())]),
            Spans::from(""),
            Spans::from(Span::styled(
                format!("See {}", finding.report),
                Style::default().fg(Color::Cyan),
            )),
        ],
        None => vec![Spans::from("No open inspection findings")],
    };

    let title = state
        .view
        .finding
        .as_ref()
        .map(|f| f.section.as_str())
        .unwrap_or("Asset Review");
    let details = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(details, columns[1]);
}

fn render_shift_log_form<B: Backend>(f: &mut Frame<B>, area: Rect, state: &ExecutionState) {
    let form = &state.form;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)].as_ref())
        .split(area);

    let fields = [
        (ShiftLogField::Shift, "Shift", form.shift.as_str().to_string()),
        (ShiftLogField::Date, "Date", form.date_state.get_display_string()),
        (ShiftLogField::Notes, "Shift Notes / Impediments", form.notes.clone()),
        (
            ShiftLogField::Attachment,
            "Site Photo (path)",
            form.attachment_path.clone(),
        ),
    ];

    let items: Vec<ListItem> = fields
        .into_iter()
        .map(|(field, name, value)| {
            let current = field == form.current_field;
            let label_style = if current {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value = if current && form.editing && field != ShiftLogField::Date {
                format!("{}|", value)
            } else {
                value
            };
            let value_style = if current && form.editing {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", name), label_style),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Daily Shift Log Input")
            .borders(Borders::ALL),
    );
    f.render_widget(list, rows[0]);

    let status = match &state.error {
        Some(err) => Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
        None => Paragraph::new(Span::styled(
            "Entries are kept for this session only.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(status.block(Block::default().borders(Borders::ALL)), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetFinding;
    use crate::models::OutageContext;

    fn state() -> ExecutionState {
        let view = ExecutionView {
            context: OutageContext::default(),
            finding: None::<AssetFinding>,
        };
        ExecutionState::new(view, NaiveDate::from_ymd_opt(2025, 5, 12).unwrap())
    }

    fn type_text(state: &mut ExecutionState, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_tab_switch() {
        let mut state = state();
        assert_eq!(state.tab(), ExecutionTab::AssetView);
        state.handle_key(KeyCode::Char('t'));
        assert_eq!(state.tab(), ExecutionTab::ShiftLogs);
        assert!(!state.captures_input());
    }

    #[test]
    fn test_fill_and_submit() {
        let mut state = state();
        state.handle_key(KeyCode::Char('t'));

        state.handle_key(KeyCode::Enter);
        assert_eq!(state.form().shift, Shift::Night);

        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Enter);
        assert!(state.captures_input());
        type_text(&mut state, "Crane 2 out, use 3");
        state.handle_key(KeyCode::Enter);
        assert!(!state.captures_input());

        let Some(ExecutionAction::Submit(entry)) = state.handle_key(KeyCode::Char('s')) else {
            panic!("expected a submission");
        };
        assert_eq!(entry.shift, Shift::Night);
        assert_eq!(entry.notes, "Crane 2 out, use 3");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 5, 12).unwrap());
        assert!(entry.attachment.is_none());

        state.submitted(LogEntryId(1));
        assert_eq!(
            state.confirmation(),
            Some("Log entry LOG-0001 saved to the shift log.")
        );
        assert!(state.form().notes.is_empty());

        // Any key dismisses the confirmation
        state.handle_key(KeyCode::Char('x'));
        assert!(state.confirmation().is_none());
    }

    #[test]
    fn test_bad_attachment_reports_error() {
        let mut state = state();
        state.handle_key(KeyCode::Char('t'));
        state.handle_key(KeyCode::Up);
        state.handle_key(KeyCode::Enter);
        type_text(&mut state, "/definitely/not/here.jpg");
        state.handle_key(KeyCode::Esc);

        assert!(state.handle_key(KeyCode::Char('s')).is_none());
        assert!(state.error().unwrap().contains("cannot attach"));
    }

    #[test]
    fn test_digits_typed_into_notes() {
        let mut state = state();
        state.handle_key(KeyCode::Char('t'));
        state.handle_key(KeyCode::Up);
        state.handle_key(KeyCode::Up);
        state.handle_key(KeyCode::Enter);
        type_text(&mut state, "t2s");
        assert_eq!(state.form().notes, "t2s");
        assert_eq!(state.tab(), ExecutionTab::ShiftLogs);
    }
}
