use thiserror::Error;

/// Errors raised by the dashboard core
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashboardError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DashboardError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
