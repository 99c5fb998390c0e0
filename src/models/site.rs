use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A unit outage on the fleet-wide schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetOutage {
    pub task: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub resource: String,
}

/// Which unit the dashboard is tracking and where it is in the outage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutageContext {
    pub unit: String,
    pub unit_type: String,
    pub phase: String,
    pub day: u32,
    pub total_days: u32,
    /// Status date the schedule is measured against
    pub as_of: NaiveDate,
}

impl OutageContext {
    pub fn day_label(&self) -> String {
        format!("Day {}/{}", self.day, self.total_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A risk, issue or status callout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

/// Inspection record for a single component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFinding {
    pub section: String,
    pub component: String,
    pub status: String,
    pub finding: String,
    pub action: String,
    pub report: String,
}

/// Recordable-injury figures for the fleet and the tracked unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyRecord {
    /// Total recordable incident rate across the fleet
    pub fleet_trir: f64,
    pub trir_target: f64,
    pub unit_incidents: u32,
    pub unit_man_hours: u64,
}

impl SafetyRecord {
    pub fn on_target(&self) -> bool {
        self.fleet_trir <= self.trir_target
    }
}

/// Fleet-wide exposure to late long-lead parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainRisk {
    pub severity: Severity,
    pub level: String,
    pub detail: String,
}
