//! Outage dashboard: a mock power-plant outage dataset, the filters and
//! aggregates derived from it, and a six-screen terminal UI over both.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod nav;
pub mod report;
pub mod shift_log;
pub mod telemetry;
pub mod ui;
pub mod view;

pub use error::{DashboardError, Result};
