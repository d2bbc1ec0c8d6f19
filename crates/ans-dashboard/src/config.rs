//! ANS Dashboard Configuration
//!
//! Tunables of a dashboard session.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::DashboardError;
use ans_client::memory::MAX_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Dashboard Configuration
// =============================================================================

/// Dashboard session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Quiet period before a typed search term is sent.
    pub debounce: Duration,
    /// Operators per result page.
    pub page_size: u32,
    /// Regions shown in the chart projection.
    pub chart_limit: usize,
    /// Entries shown from the top ranking.
    pub top_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            page_size: 10,
            chart_limit: 10,
            top_limit: 5,
        }
    }
}

impl DashboardConfig {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_chart_limit(mut self, chart_limit: usize) -> Self {
        self.chart_limit = chart_limit;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(DashboardError::InvalidConfig(format!(
                "page_size must be within 1..={}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.chart_limit == 0 {
            return Err(DashboardError::InvalidConfig(
                "chart_limit must be at least 1".to_string(),
            ));
        }
        if self.top_limit == 0 {
            return Err(DashboardError::InvalidConfig(
                "top_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
