use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use mime::Mime;
use serde::Serialize;

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "Day",
            Shift::Night => "Night",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Shift::Day => Shift::Night,
            Shift::Night => Shift::Day,
        }
    }
}

/// Identifier handed back when a shift log is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LogEntryId(pub u64);

impl fmt::Display for LogEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOG-{:04}", self.0)
    }
}

/// A file attached to a shift log, described but not copied
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Mime,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            DashboardError::invalid(format!("cannot attach '{}': {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(DashboardError::invalid(format!(
                "cannot attach '{}': not a file",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            content_type: guess_mime(path),
            file_name,
            size_bytes: metadata.len(),
        })
    }
}

/// Content type from the file extension, octet-stream when unknown
pub fn guess_mime(path: &Path) -> Mime {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "pdf" => mime::APPLICATION_PDF,
        "txt" | "log" => mime::TEXT_PLAIN,
        "csv" => mime::TEXT_CSV,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// A daily shift log as entered on the execution screen
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftLogEntry {
    pub shift: Shift,
    pub date: NaiveDate,
    pub notes: String,
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("liner.JPG")), mime::IMAGE_JPEG);
        assert_eq!(guess_mime(Path::new("qa/report.pdf")), mime::APPLICATION_PDF);
        assert_eq!(guess_mime(Path::new("noext")), mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_attachment_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 16]).unwrap();

        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.file_name, "site.png");
        assert_eq!(attachment.content_type, mime::IMAGE_PNG);
        assert_eq!(attachment.size_bytes, 16);
    }

    #[test]
    fn test_attachment_missing_or_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Attachment::from_path(&dir.path().join("missing.jpg")),
            Err(DashboardError::InvalidArgument(_))
        ));
        assert!(Attachment::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_log_entry_id_display() {
        assert_eq!(LogEntryId(7).to_string(), "LOG-0007");
        assert_eq!(Shift::Day.toggle(), Shift::Night);
    }
}
