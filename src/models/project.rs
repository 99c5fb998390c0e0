use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::models::Money;

/// Plant subsystem a work package belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Turbine,
    Generator,
    #[serde(rename = "HRSG")]
    Hrsg,
    #[serde(rename = "BOP")]
    Bop,
    Electrical,
    #[serde(rename = "I&C")]
    InstrumentationControl,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Turbine,
        Category::Generator,
        Category::Hrsg,
        Category::Bop,
        Category::Electrical,
        Category::InstrumentationControl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Turbine => "Turbine",
            Category::Generator => "Generator",
            Category::Hrsg => "HRSG",
            Category::Bop => "BOP",
            Category::Electrical => "Electrical",
            Category::InstrumentationControl => "I&C",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DashboardError::invalid(format!(
                    "unknown category '{}' (valid: Turbine, Generator, HRSG, BOP, Electrical, I&C)",
                    s
                ))
            })
    }
}

/// Execution status of a work package
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Delayed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::NotStarted,
        Status::InProgress,
        Status::Completed,
        Status::Delayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Delayed => "Delayed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "in-progress" and "in_progress" as well as the display form
        let wanted = s.trim().replace(['-', '_'], " ");
        Status::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                DashboardError::invalid(format!(
                    "unknown status '{}' (valid: Not Started, In Progress, Completed, Delayed)",
                    s
                ))
            })
    }
}

/// One outage work package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub status: Status,
    pub owner: String,
    pub budget_labor: Money,
    pub actual_labor: Money,
    pub budget_material: Money,
    pub actual_material: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_critical_path: bool,
}

impl Project {
    pub fn total_budget(&self) -> Money {
        self.budget_labor + self.budget_material
    }

    pub fn total_actual(&self) -> Money {
        self.actual_labor + self.actual_material
    }

    /// Actual minus budgeted cost, in cents
    pub fn variance(&self) -> i64 {
        self.total_actual().delta(self.total_budget())
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
