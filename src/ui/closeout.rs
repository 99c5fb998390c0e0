use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::ui::components::widgets::{cycle_next, cycle_previous, help_bar, notice_lines};
use crate::view::CloseoutView;

pub struct CloseoutState {
    view: CloseoutView,
    checked: Vec<bool>,
    list_state: ListState,
}

impl CloseoutState {
    pub fn new(view: CloseoutView) -> Self {
        let mut list_state = ListState::default();
        if !view.actions.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            checked: vec![false; view.actions.len()],
            view,
            list_state,
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Share of book-closing actions ticked off, 0..=100
    pub fn progress_pct(&self) -> u16 {
        if self.checked.is_empty() {
            return 0;
        }
        let done = self.checked.iter().filter(|c| **c).count();
        (done * 100 / self.checked.len()) as u16
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let len = self.checked.len();
        match key {
            KeyCode::Down => self.list_state.select(cycle_next(self.list_state.selected(), len)),
            KeyCode::Up => self
                .list_state
                .select(cycle_previous(self.list_state.selected(), len)),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let selected = self.list_state.selected();
                if let Some(done) = selected.and_then(|i| self.checked.get_mut(i)) {
                    *done = !*done;
                }
            }
            _ => {}
        }
    }
}

pub fn render_closeout<B: Backend>(f: &mut Frame<B>, area: Rect, state: &mut CloseoutState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(4),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let progress = state.progress_pct();
    let gauge = Gauge::default()
        .block(Block::default().title("Outage Closeout (T+3 Months)").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(progress)
        .label(format!("Closeout Progress: {}%", progress));
    f.render_widget(gauge, chunks[0]);

    let view = &state.view;
    let mut lines = notice_lines(&view.notices);
    lines.push(tui::text::Spans::from(format!(
        "{} of {} work packages completed",
        view.status.completed,
        view.status.total()
    )));
    let notices = Paragraph::new(lines)
        .block(Block::default().title("Status").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(notices, chunks[1]);

    let checked = &state.checked;
    let items: Vec<ListItem> = view
        .actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let done = checked.get(i).copied().unwrap_or(false);
            let mark = if done { "[x]" } else { "[ ]" };
            let style = if done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", mark, action)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Pending Actions for Book Closing")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, chunks[2], &mut state.list_state);

    f.render_widget(help_bar("Up/Down - Move | Space - Check off action"), chunks[3]);
}
