//! Shift log submission

use tracing::info;

use crate::error::Result;
use crate::models::{LogEntryId, ShiftLogEntry};

/// Accepts shift log submissions and hands back an entry id
pub trait ShiftLogSink {
    fn submit(&mut self, entry: ShiftLogEntry) -> Result<LogEntryId>;
}

/// Session-scoped sink; entries are gone when the process exits
#[derive(Debug, Default)]
pub struct InMemoryShiftLog {
    entries: Vec<(LogEntryId, ShiftLogEntry)>,
}

impl InMemoryShiftLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(LogEntryId, ShiftLogEntry)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ShiftLogSink for InMemoryShiftLog {
    fn submit(&mut self, entry: ShiftLogEntry) -> Result<LogEntryId> {
        let id = LogEntryId(self.entries.len() as u64 + 1);
        info!(
            %id,
            shift = entry.shift.as_str(),
            date = %entry.date,
            notes_len = entry.notes.len(),
            attachment = entry.attachment.as_ref().map(|a| a.file_name.as_str()),
            "shift log submitted"
        );
        self.entries.push((id, entry));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shift;
    use chrono::NaiveDate;

    fn entry(shift: Shift, notes: &str) -> ShiftLogEntry {
        ShiftLogEntry {
            shift,
            date: NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            notes: notes.to_string(),
            attachment: None,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut log = InMemoryShiftLog::new();
        assert!(log.is_empty());

        let first = log.submit(entry(Shift::Day, "Rotor lifted")).unwrap();
        let second = log.submit(entry(Shift::Night, "")).unwrap();

        assert_eq!(first, LogEntryId(1));
        assert_eq!(second, LogEntryId(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].1.notes, "Rotor lifted");
        assert_eq!(log.entries()[1].1.shift, Shift::Night);
    }
}
