//! Backend reachability indicator
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::messages;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state backend status shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiStatus {
    #[default]
    Connecting,
    Online,
    Offline,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connecting => messages::STATUS_CONNECTING,
            Self::Online => messages::STATUS_ONLINE,
            Self::Offline => messages::STATUS_OFFLINE,
        }
    }

    /// CSS class of the status badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Connecting => "",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tracks the status from the outcome of stats fetches. No retry loop.
#[derive(Debug, Default)]
pub struct StatusTracker {
    status: RwLock<ApiStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ApiStatus {
        *self.status.read()
    }

    pub fn record_success(&self) {
        self.transition(ApiStatus::Online);
    }

    pub fn record_failure(&self) {
        self.transition(ApiStatus::Offline);
    }

    fn transition(&self, next: ApiStatus) {
        let previous = std::mem::replace(&mut *self.status.write(), next);
        if previous != next {
            tracing::info!(from = ?previous, to = ?next, "api status changed");
        }
    }
}
