use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DashboardError, Result};
use crate::models::{Category, Money, Project, Status};

/// Number of work packages in the reference outage
pub const DEFAULT_PROJECT_COUNT: usize = 85;

const FIRST_ID: usize = 1000;

// Upper bound on the up-front allocation; larger counts grow as they fill.
const MAX_PREALLOCATED: usize = 4096;

/// Generates `count` mock work packages, deterministic for a given seed and anchor
///
/// Start dates fall up to ten days before `anchor`; durations run 5 to 45 days.
/// Fails with `InvalidArgument` when `count` is zero or when a generated date
/// would fall outside the representable calendar.
pub fn generate(count: usize, seed: u64, anchor: NaiveDate) -> Result<Vec<Project>> {
    if count == 0 {
        return Err(DashboardError::invalid("project count must be greater than zero"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut projects = Vec::with_capacity(count.min(MAX_PREALLOCATED));

    for i in 1..=count {
        let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
        let budget_labor = Money::from_dollars(rng.gen_range(50_000..=500_000));
        let budget_material = Money::from_dollars(rng.gen_range(20_000..=300_000));
        let start_date = anchor
            .checked_sub_signed(Duration::days(rng.gen_range(0..=10)))
            .ok_or_else(out_of_range)?;
        let end_date = start_date
            .checked_add_signed(Duration::days(rng.gen_range(5..=45)))
            .ok_or_else(out_of_range)?;
        let status = Status::ALL[rng.gen_range(0..Status::ALL.len())];
        let owner = format!("Manager {}", rng.gen_range(1..=5));
        let actual_labor = budget_labor.scale(rng.gen_range(0.8..1.2));
        let actual_material = budget_material.scale(rng.gen_range(0.9..1.1));

        projects.push(Project {
            id: format!("PRJ-{}", FIRST_ID + i),
            name: format!("{} Work Package #{}", category, i),
            category,
            status,
            owner,
            budget_labor,
            actual_labor,
            budget_material,
            actual_material,
            start_date,
            end_date,
            is_critical_path: rng.gen_bool(0.25),
        });
    }

    Ok(projects)
}

fn out_of_range() -> DashboardError {
    DashboardError::invalid("anchor date out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()
    }

    #[test]
    fn test_generates_sequential_ids() {
        let projects = generate(DEFAULT_PROJECT_COUNT, 42, anchor()).unwrap();
        assert_eq!(projects.len(), 85);
        assert_eq!(projects[0].id, "PRJ-1001");
        assert_eq!(projects[84].id, "PRJ-1085");

        for (i, project) in projects.iter().enumerate() {
            assert_eq!(project.id, format!("PRJ-{}", 1001 + i));
        }

        let ids: HashSet<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 85);
    }

    #[test]
    fn test_fields_within_ranges() {
        for project in generate(DEFAULT_PROJECT_COUNT, 7, anchor()).unwrap() {
            assert!(project.end_date > project.start_date);
            assert!((5..=45).contains(&project.duration_days()));
            assert!(project.start_date <= anchor());
            assert!(project.start_date >= anchor() - Duration::days(10));

            let labor = project.budget_labor.cents();
            assert!((5_000_000..=50_000_000).contains(&labor));
            let material = project.budget_material.cents();
            assert!((2_000_000..=30_000_000).contains(&material));

            assert!(project.actual_labor.cents() as f64 >= labor as f64 * 0.8 - 1.0);
            assert!(project.actual_labor.cents() as f64 <= labor as f64 * 1.2 + 1.0);
            assert!(project.actual_material.cents() as f64 >= material as f64 * 0.9 - 1.0);
            assert!(project.actual_material.cents() as f64 <= material as f64 * 1.1 + 1.0);

            assert!(project.name.starts_with(project.category.as_str()));
            assert!(project.owner.starts_with("Manager "));
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = generate(30, 1234, anchor()).unwrap();
        let b = generate(30, 1234, anchor()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = generate(30, 1, anchor()).unwrap();
        let b = generate(30, 2, anchor()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let err = generate(0, 1, anchor()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidArgument(_)));
    }

    #[test]
    fn test_anchor_at_calendar_limits_is_invalid() {
        for anchor in [NaiveDate::MIN, NaiveDate::MAX] {
            let err = generate(DEFAULT_PROJECT_COUNT, 1, anchor).unwrap_err();
            assert_eq!(err.to_string(), "invalid argument: anchor date out of range");
        }
    }

    #[test]
    fn test_anchor_near_limits_with_room_succeeds() {
        let low = NaiveDate::MIN + Duration::days(10);
        let high = NaiveDate::MAX - Duration::days(45);
        assert_eq!(generate(20, 3, low).unwrap().len(), 20);
        assert_eq!(generate(20, 3, high).unwrap().len(), 20);
    }

    #[test]
    fn test_large_count_does_not_preallocate_everything() {
        let projects = generate(MAX_PREALLOCATED + 1, 5, anchor()).unwrap();
        assert_eq!(projects.len(), MAX_PREALLOCATED + 1);
    }

    #[test]
    fn test_some_but_not_all_on_critical_path() {
        let projects = generate(DEFAULT_PROJECT_COUNT, 99, anchor()).unwrap();
        let critical = projects.iter().filter(|p| p.is_critical_path).count();
        assert!(critical > 0 && critical < projects.len());
    }
}
