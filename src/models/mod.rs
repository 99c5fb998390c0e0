mod money;
mod project;
mod shift_log;
mod site;

pub use money::{format_delta, group_thousands, Money};
pub use project::{Category, Project, Status};
pub use shift_log::{guess_mime, Attachment, LogEntryId, Shift, ShiftLogEntry};
pub use site::{
    AssetFinding, FleetOutage, Notice, OutageContext, SafetyRecord, Severity, SupplyChainRisk,
};
