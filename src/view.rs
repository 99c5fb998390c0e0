//! Derived, serializable views handed to the renderer, one per screen

use serde::Serialize;

use crate::data::Dataset;
use crate::metrics::{self, Filters, StatusCounts, Totals};
use crate::models::{
    AssetFinding, FleetOutage, Notice, OutageContext, Project, SafetyRecord, Status,
    SupplyChainRisk,
};
use crate::nav::Screen;

#[derive(Debug, Clone, Serialize)]
pub struct CommandCenterView {
    pub fleet: Vec<FleetOutage>,
    pub totals: Totals,
    pub status: StatusCounts,
    pub safety: SafetyRecord,
    pub supply_chain: Option<SupplyChainRisk>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitDashboardView {
    pub context: OutageContext,
    pub status: StatusCounts,
    pub utilization_pct: f64,
    pub schedule_variance_days: i64,
    pub safety: SafetyRecord,
    pub critical_path: Vec<Project>,
    pub critical_delayed: usize,
    pub risks: Vec<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectMatrixView {
    pub filters: Filters,
    pub projects: Vec<Project>,
    pub totals: Totals,
    pub total_projects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrunRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub variance: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialsView {
    pub totals: Totals,
    pub top_overruns: Vec<OverrunRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionView {
    pub context: OutageContext,
    pub finding: Option<AssetFinding>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloseoutView {
    pub notices: Vec<Notice>,
    pub actions: Vec<String>,
    pub status: StatusCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum ScreenView {
    CommandCenter(CommandCenterView),
    UnitDashboard(UnitDashboardView),
    ProjectMatrix(ProjectMatrixView),
    Financials(FinancialsView),
    Execution(ExecutionView),
    Closeout(CloseoutView),
}

impl CommandCenterView {
    pub fn compute(dataset: &Dataset) -> Self {
        let projects = dataset.projects();
        Self {
            fleet: dataset.fleet.clone(),
            totals: metrics::totals(projects),
            status: metrics::status_counts(projects),
            safety: dataset.safety.clone(),
            supply_chain: dataset.supply_chain.clone(),
        }
    }
}

impl UnitDashboardView {
    pub fn compute(dataset: &Dataset) -> Self {
        let projects = dataset.projects();
        let critical_path: Vec<Project> = metrics::critical_path_subset(projects)
            .into_iter()
            .cloned()
            .collect();
        let critical_delayed = critical_path
            .iter()
            .filter(|p| p.status == Status::Delayed)
            .count();

        Self {
            context: dataset.context.clone(),
            status: metrics::status_counts(projects),
            utilization_pct: metrics::totals(projects).utilization_pct(),
            schedule_variance_days: metrics::schedule_variance_days(
                &critical_path,
                dataset.context.as_of,
            ),
            safety: dataset.safety.clone(),
            critical_path,
            critical_delayed,
            risks: dataset.risks.clone(),
        }
    }
}

impl ProjectMatrixView {
    pub fn compute(dataset: &Dataset, filters: &Filters) -> Self {
        let projects = dataset.projects();
        let filtered = filters.apply(projects);
        Self {
            filters: filters.clone(),
            totals: metrics::totals(filtered.iter().copied()),
            projects: filtered.into_iter().cloned().collect(),
            total_projects: projects.len(),
        }
    }
}

impl FinancialsView {
    pub fn compute(dataset: &Dataset, top_n: usize) -> Self {
        let projects = dataset.projects();
        Self {
            totals: metrics::totals(projects),
            top_overruns: metrics::top_overruns(projects, top_n)
                .into_iter()
                .map(|r| OverrunRow {
                    id: r.project.id.clone(),
                    name: r.project.name.clone(),
                    owner: r.project.owner.clone(),
                    variance: r.variance,
                })
                .collect(),
        }
    }
}

impl ExecutionView {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            context: dataset.context.clone(),
            finding: dataset.finding.clone(),
        }
    }
}

impl CloseoutView {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            notices: dataset.closeout_notices.clone(),
            actions: dataset.closeout_actions.clone(),
            status: metrics::status_counts(dataset.projects()),
        }
    }
}

impl ScreenView {
    /// Recomputes the view for `screen` from the session snapshot
    ///
    /// `filters` only affects the project matrix; `top_n` only the financials ranking.
    pub fn compute(screen: Screen, dataset: &Dataset, filters: &Filters, top_n: usize) -> Self {
        match screen {
            Screen::CommandCenter => ScreenView::CommandCenter(CommandCenterView::compute(dataset)),
            Screen::UnitDashboard => ScreenView::UnitDashboard(UnitDashboardView::compute(dataset)),
            Screen::ProjectMatrix => {
                ScreenView::ProjectMatrix(ProjectMatrixView::compute(dataset, filters))
            }
            Screen::Financials => ScreenView::Financials(FinancialsView::compute(dataset, top_n)),
            Screen::Execution => ScreenView::Execution(ExecutionView::compute(dataset)),
            Screen::Closeout => ScreenView::Closeout(CloseoutView::compute(dataset)),
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            ScreenView::CommandCenter(_) => Screen::CommandCenter,
            ScreenView::UnitDashboard(_) => Screen::UnitDashboard,
            ScreenView::ProjectMatrix(_) => Screen::ProjectMatrix,
            ScreenView::Financials(_) => Screen::Financials,
            ScreenView::Execution(_) => Screen::Execution,
            ScreenView::Closeout(_) => Screen::Closeout,
        }
    }
}
