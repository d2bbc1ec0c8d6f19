//! ANS Dashboard Error Types
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use thiserror::Error;

/// Errors raised while assembling a dashboard session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("invalid dashboard configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
