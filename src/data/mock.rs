use chrono::NaiveDate;

use crate::data::{generator, DataSource, Dataset};
use crate::error::Result;
use crate::models::{
    AssetFinding, FleetOutage, Notice, OutageContext, SafetyRecord, Severity, SupplyChainRisk,
};

/// Randomized stand-in for the outage system of record
#[derive(Debug, Clone)]
pub struct MockDataSource {
    pub seed: u64,
    pub count: usize,
    pub anchor: NaiveDate,
}

impl MockDataSource {
    pub fn new(seed: u64, count: usize, anchor: NaiveDate) -> Self {
        Self { seed, count, anchor }
    }
}

impl DataSource for MockDataSource {
    fn describe(&self) -> String {
        format!("mock (seed {}, {} projects)", self.seed, self.count)
    }

    fn load(&self) -> Result<Dataset> {
        let projects = generator::generate(self.count, self.seed, self.anchor)?;

        let mut dataset = Dataset::new(projects)?;
        dataset.context = unit_context(self.anchor);
        dataset.fleet = fleet_schedule();
        dataset.risks = top_risks();
        dataset.safety = safety_record();
        dataset.supply_chain = Some(rotor_shipments());
        dataset.finding = Some(liner_finding());
        dataset.closeout_notices = closeout_notices();
        dataset.closeout_actions = closeout_actions();

        Ok(dataset)
    }
}

fn unit_context(as_of: NaiveDate) -> OutageContext {
    OutageContext {
        unit: "Unit 4 Combined Cycle".to_string(),
        unit_type: "GE 7F.05".to_string(),
        phase: "Execution".to_string(),
        day: 12,
        total_days: 45,
        as_of,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn fleet_schedule() -> Vec<FleetOutage> {
    [
        ("Plant Alpha (Major)", date(2025, 1, 1), date(2025, 2, 28), "Region A"),
        ("Plant Beta (HGPI)", date(2025, 3, 15), date(2025, 4, 15), "Region A"),
        ("Plant Gamma (Combustion)", date(2025, 6, 1), date(2025, 6, 15), "Region B"),
        ("Plant Delta (C-Inspection)", date(2025, 9, 1), date(2025, 10, 1), "Region B"),
    ]
    .into_iter()
    .map(|(task, start, finish, resource)| FleetOutage {
        task: task.to_string(),
        start,
        finish,
        resource: resource.to_string(),
    })
    .collect()
}

fn notice(severity: Severity, title: &str, detail: &str) -> Notice {
    Notice {
        severity,
        title: title.to_string(),
        detail: detail.to_string(),
    }
}

fn top_risks() -> Vec<Notice> {
    vec![
        notice(Severity::Warning, "Rotor Lift Crane", "Certification expiring in 2 days."),
        notice(Severity::Critical, "BOP Valve", "Replacement part delayed by customs."),
        notice(Severity::Info, "Labor", "Night shift electrician shortage."),
    ]
}

fn safety_record() -> SafetyRecord {
    SafetyRecord {
        fleet_trir: 0.0,
        trir_target: 0.0,
        unit_incidents: 0,
        unit_man_hours: 15_000,
    }
}

fn rotor_shipments() -> SupplyChainRisk {
    SupplyChainRisk {
        severity: Severity::Warning,
        level: "Medium".to_string(),
        detail: "2 Rotors in Transit".to_string(),
    }
}

fn liner_finding() -> AssetFinding {
    AssetFinding {
        section: "Gas Turbine Section Review".to_string(),
        component: "Combustion Liner (Can 4)".to_string(),
        status: "Removed for Inspection".to_string(),
        finding: "Thermal Barrier Coating (TBC) loss > 5%".to_string(),
        action: "Replace from strategic spares.".to_string(),
        report: "QA Report #4402".to_string(),
    }
}

fn closeout_notices() -> Vec<Notice> {
    vec![
        notice(Severity::Info, "Operations Returned", "Unit released back to dispatch."),
        notice(Severity::Warning, "4 Open Invoices", "Contractor invoices awaiting approval."),
        notice(Severity::Info, "Final Report Drafting", "Outage report in preparation."),
    ]
}

fn closeout_actions() -> Vec<String> {
    [
        "Reconcile Contractor Overtime Hours",
        "Return unused spares to Warehouse inventory",
        "Submit Regulatory Emissions Report",
        "Finalize Lessons Learned Session",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
