use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    fn width(self) -> usize {
        match self {
            DatePart::Year => 4,
            DatePart::Month | DatePart::Day => 2,
        }
    }
}

/// Segment-by-segment date entry: type digits for the highlighted part,
/// Left/Right to move between year, month and day
pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    pub date_part: DatePart,
    pub buffer: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            date_part: DatePart::Year,
            buffer: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        self.date_part = DatePart::Year;
        self.buffer.clear();
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.buffer.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.buffer.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                if self.buffer.len() == self.date_part.width() {
                    self.commit_buffer();
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    // Invalid dates (month 13, Feb 30) leave the current date untouched
    fn commit_buffer(&mut self) {
        let value: u32 = self.buffer.parse().unwrap_or(0);
        let (year, month, day) = (self.date.year(), self.date.month(), self.date.day());

        let candidate = match self.date_part {
            DatePart::Year if (1900..=2100).contains(&value) => {
                NaiveDate::from_ymd_opt(value as i32, month, day)
            }
            DatePart::Month => NaiveDate::from_ymd_opt(year, value, day),
            DatePart::Day => NaiveDate::from_ymd_opt(year, month, value),
            _ => None,
        };

        if let Some(date) = candidate {
            self.date = date;
        }
        self.buffer.clear();
    }

    pub fn get_display_string(&self) -> String {
        let year = format!("{:04}", self.date.year());
        let month = format!("{:02}", self.date.month());
        let day = format!("{:02}", self.date.day());

        if !self.editing {
            return format!("{}-{}-{}", year, month, day);
        }

        let marker = if self.buffer.is_empty() {
            match self.date_part {
                DatePart::Year => "[YYYY]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Day => "[DD]".to_string(),
            }
        } else {
            format!("[{}]", self.buffer)
        };

        match self.date_part {
            DatePart::Year => format!("{}-{}-{}", marker, month, day),
            DatePart::Month => format!("{}-{}-{}", year, marker, day),
            DatePart::Day => format!("{}-{}-{}", year, month, marker),
        }
    }
}
