pub mod closeout;
pub mod command_center;
pub mod components;
pub mod execution;
pub mod financials;
pub mod project_matrix;
pub mod sidebar;
pub mod unit_dashboard;
