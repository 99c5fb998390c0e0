//! Pure filtering and aggregation over the project collection

use std::collections::BTreeSet;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Category, Money, Project, Status};

/// Category and status selections for the project matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub categories: BTreeSet<Category>,
    pub statuses: BTreeSet<Status>,
}

impl Default for Filters {
    fn default() -> Self {
        Self::all()
    }
}

impl Filters {
    /// Every category and status selected
    pub fn all() -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            statuses: Status::ALL.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            categories: BTreeSet::new(),
            statuses: BTreeSet::new(),
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_status(&mut self, status: Status) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn is_all(&self) -> bool {
        self.categories.len() == Category::ALL.len() && self.statuses.len() == Status::ALL.len()
    }

    pub fn apply<'a, I>(&self, projects: I) -> Vec<&'a Project>
    where
        I: IntoIterator<Item = &'a Project>,
    {
        filter_by(projects, &self.categories, &self.statuses)
    }
}

/// Projects whose category AND status are both selected, in input order
///
/// An empty selection on either axis matches nothing.
pub fn filter_by<'a, I>(
    projects: I,
    categories: &BTreeSet<Category>,
    statuses: &BTreeSet<Status>,
) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects
        .into_iter()
        .filter(|p| categories.contains(&p.category) && statuses.contains(&p.status))
        .collect()
}

/// Critical path projects ordered by start date, then id
pub fn critical_path_subset<'a, I>(projects: I) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut subset: Vec<&Project> = projects.into_iter().filter(|p| p.is_critical_path).collect();
    subset.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
    subset
}

/// Schedule variance in days as of `as_of`: zero when on time, negative when late
///
/// Driven by the worst delayed critical path item, measured as how far `as_of`
/// has run past its planned end date.
pub fn schedule_variance_days<'a, I>(projects: I, as_of: NaiveDate) -> i64
where
    I: IntoIterator<Item = &'a Project>,
{
    let slip = projects
        .into_iter()
        .filter(|p| p.is_critical_path && p.status == Status::Delayed)
        .map(|p| as_of.signed_duration_since(p.end_date).num_days().max(0))
        .max()
        .unwrap_or(0);
    -slip
}

/// Component-wise labor and material sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub budget_labor: Money,
    pub actual_labor: Money,
    pub budget_material: Money,
    pub actual_material: Money,
}

impl Totals {
    pub fn budget(&self) -> Money {
        self.budget_labor + self.budget_material
    }

    pub fn actual(&self) -> Money {
        self.actual_labor + self.actual_material
    }

    /// Actual minus budget across labor and material, in cents
    pub fn variance(&self) -> i64 {
        self.actual().delta(self.budget())
    }

    pub fn labor_variance(&self) -> i64 {
        self.actual_labor.delta(self.budget_labor)
    }

    pub fn material_variance(&self) -> i64 {
        self.actual_material.delta(self.budget_material)
    }

    /// Actual spend as a percentage of budget; zero when nothing is budgeted
    pub fn utilization_pct(&self) -> f64 {
        let budget = self.budget().cents();
        if budget == 0 {
            return 0.0;
        }
        self.actual().cents() as f64 / budget as f64 * 100.0
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            budget_labor: self.budget_labor + rhs.budget_labor,
            actual_labor: self.actual_labor + rhs.actual_labor,
            budget_material: self.budget_material + rhs.budget_material,
            actual_material: self.actual_material + rhs.actual_material,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), |a, b| a + b)
    }
}

impl<'a> From<&'a Project> for Totals {
    fn from(p: &'a Project) -> Self {
        Totals {
            budget_labor: p.budget_labor,
            actual_labor: p.actual_labor,
            budget_material: p.budget_material,
            actual_material: p.actual_material,
        }
    }
}

/// Sums every monetary field; zero for an empty collection
pub fn totals<'a, I>(projects: I) -> Totals
where
    I: IntoIterator<Item = &'a Project>,
{
    projects.into_iter().map(Totals::from).sum()
}

/// A project paired with its cost variance in cents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceRecord<'a> {
    pub project: &'a Project,
    pub variance: i64,
}

/// The `n` largest overruns, variance descending with ties broken by id
pub fn top_overruns<'a, I>(projects: I, n: usize) -> Vec<VarianceRecord<'a>>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut records: Vec<VarianceRecord<'a>> = projects
        .into_iter()
        .map(|project| VarianceRecord {
            project,
            variance: project.variance(),
        })
        .collect();

    records.sort_by(|a, b| {
        b.variance
            .cmp(&a.variance)
            .then_with(|| a.project.id.cmp(&b.project.id))
    });
    records.truncate(n);
    records
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delayed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::NotStarted => self.not_started,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
            Status::Delayed => self.delayed,
        }
    }

    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed + self.delayed
    }

    /// Everything not yet completed
    pub fn open(&self) -> usize {
        self.total() - self.completed
    }
}

pub fn status_counts<'a, I>(projects: I) -> StatusCounts
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut counts = StatusCounts::default();
    for project in projects {
        match project.status {
            Status::NotStarted => counts.not_started += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Completed => counts.completed += 1,
            Status::Delayed => counts.delayed += 1,
        }
    }
    counts
}
