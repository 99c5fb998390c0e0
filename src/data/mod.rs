//! Project data sources and the immutable session snapshot

pub mod generator;
mod mock;

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{
    AssetFinding, FleetOutage, Notice, OutageContext, Project, SafetyRecord, SupplyChainRisk,
};

pub use generator::{generate, DEFAULT_PROJECT_COUNT};
pub use mock::MockDataSource;

/// Where the session's project data comes from
pub trait DataSource {
    /// Short human-readable description for logs and the sidebar
    fn describe(&self) -> String;

    fn load(&self) -> Result<Dataset>;
}

/// Everything the screens read, loaded once per session and never mutated
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    projects: Vec<Project>,
    pub context: OutageContext,
    pub fleet: Vec<FleetOutage>,
    pub risks: Vec<Notice>,
    pub safety: SafetyRecord,
    pub supply_chain: Option<SupplyChainRisk>,
    pub finding: Option<AssetFinding>,
    pub closeout_notices: Vec<Notice>,
    pub closeout_actions: Vec<String>,
}

impl Dataset {
    /// Wraps a project collection after checking ids are unique and date ranges are ordered
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(DashboardError::invalid(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
            if project.end_date <= project.start_date {
                return Err(DashboardError::invalid(format!(
                    "project '{}' ends on {} which is not after its start {}",
                    project.id, project.end_date, project.start_date
                )));
            }
        }

        Ok(Self {
            projects,
            ..Default::default()
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::models::{Category, Money, Project, Status};

    pub fn project(id: &str, budget_labor: u64, actual_labor: u64) -> Project {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        Project {
            id: id.to_string(),
            name: format!("{} package", id),
            category: Category::Turbine,
            status: Status::InProgress,
            owner: "Manager 1".to_string(),
            budget_labor: Money::from_dollars(budget_labor),
            actual_labor: Money::from_dollars(actual_labor),
            budget_material: Money::ZERO,
            actual_material: Money::ZERO,
            start_date: start,
            end_date: start + chrono::Duration::days(10),
            is_critical_path: false,
        }
    }
}
