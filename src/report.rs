//! Plain-text rendering of screen views for the headless `summary` command

use std::fmt::Write;

use crate::models::{format_delta, group_thousands, Notice};
use crate::view::ScreenView;

fn notice_line(out: &mut String, notice: &Notice) {
    let _ = writeln!(
        out,
        "  [{:?}] {}: {}",
        notice.severity, notice.title, notice.detail
    );
}

/// Renders a view as indented text, one fact per line
pub fn render_text(view: &ScreenView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.screen().label());

    match view {
        ScreenView::CommandCenter(v) => {
            let _ = writeln!(out, "Active outages: {}", v.fleet.len());
            let _ = writeln!(
                out,
                "Committed spend: {} of {} ({})",
                v.totals.actual(),
                v.totals.budget(),
                format_delta(v.totals.variance())
            );
            let _ = writeln!(out, "Delayed projects: {}", v.status.delayed);
            let _ = writeln!(
                out,
                "Fleet TRIR: {:.1} (target {:.1})",
                v.safety.fleet_trir, v.safety.trir_target
            );
            if let Some(risk) = &v.supply_chain {
                let _ = writeln!(out, "Supply chain risk: {} ({})", risk.level, risk.detail);
            }
            let _ = writeln!(out, "Fleet schedule:");
            for outage in &v.fleet {
                let _ = writeln!(
                    out,
                    "  {} | {} -> {} | {}",
                    outage.task, outage.start, outage.finish, outage.resource
                );
            }
        }
        ScreenView::UnitDashboard(v) => {
            let _ = writeln!(
                out,
                "{} ({}) - {} {}",
                v.context.unit,
                v.context.unit_type,
                v.context.phase,
                v.context.day_label()
            );
            let _ = writeln!(
                out,
                "Open projects: {} / {} ({} completed)",
                v.status.open(),
                v.status.total(),
                v.status.completed
            );
            let _ = writeln!(out, "Schedule variance: {} days", v.schedule_variance_days);
            let _ = writeln!(out, "Budget utilization: {:.0}%", v.utilization_pct);
            let _ = writeln!(
                out,
                "Safety incidents: {} ({} man-hours)",
                v.safety.unit_incidents,
                group_thousands(v.safety.unit_man_hours)
            );
            let _ = writeln!(
                out,
                "Critical path: {} tasks, {} delayed",
                v.critical_path.len(),
                v.critical_delayed
            );
            for p in &v.critical_path {
                let _ = writeln!(
                    out,
                    "  {} {} | {} -> {} | {}",
                    p.id, p.name, p.start_date, p.end_date, p.status
                );
            }
            let _ = writeln!(out, "Top risks:");
            for risk in &v.risks {
                notice_line(&mut out, risk);
            }
        }
        ScreenView::ProjectMatrix(v) => {
            let _ = writeln!(
                out,
                "Showing {} of {} projects",
                v.projects.len(),
                v.total_projects
            );
            for p in &v.projects {
                let _ = writeln!(
                    out,
                    "  {} | {} | {} | {} | {} | labor {} / {} | material {} / {} | {} -> {}{}",
                    p.id,
                    p.name,
                    p.category,
                    p.status,
                    p.owner,
                    p.actual_labor,
                    p.budget_labor,
                    p.actual_material,
                    p.budget_material,
                    p.start_date,
                    p.end_date,
                    if p.is_critical_path { " | critical" } else { "" }
                );
            }
            let _ = writeln!(
                out,
                "Subtotal: {} actual vs {} budget",
                v.totals.actual(),
                v.totals.budget()
            );
        }
        ScreenView::Financials(v) => {
            let _ = writeln!(
                out,
                "Labor: budget {} actual {} ({})",
                v.totals.budget_labor,
                v.totals.actual_labor,
                format_delta(v.totals.labor_variance())
            );
            let _ = writeln!(
                out,
                "Material: budget {} actual {} ({})",
                v.totals.budget_material,
                v.totals.actual_material,
                format_delta(v.totals.material_variance())
            );
            let _ = writeln!(out, "Cost overrun alert (top {}):", v.top_overruns.len());
            for row in &v.top_overruns {
                let _ = writeln!(
                    out,
                    "  {} | {} | {} | {}",
                    row.id,
                    row.name,
                    row.owner,
                    format_delta(row.variance)
                );
            }
        }
        ScreenView::Execution(v) => {
            let _ = writeln!(out, "{} - {}", v.context.unit, v.context.day_label());
            match &v.finding {
                Some(f) => {
                    let _ = writeln!(out, "{}", f.section);
                    let _ = writeln!(out, "  Component: {}", f.component);
                    let _ = writeln!(out, "  Status: {}", f.status);
                    let _ = writeln!(out, "  Finding: {}", f.finding);
                    let _ = writeln!(out, "  Action: {}", f.action);
                }
                None => {
                    let _ = writeln!(out, "No open inspection findings");
                }
            }
        }
        ScreenView::Closeout(v) => {
            let _ = writeln!(
                out,
                "Projects completed: {} / {}",
                v.status.completed,
                v.status.total()
            );
            for notice in &v.notices {
                notice_line(&mut out, notice);
            }
            let _ = writeln!(out, "Pending actions:");
            for action in &v.actions {
                let _ = writeln!(out, "  [ ] {}", action);
            }
        }
    }

    out
}
