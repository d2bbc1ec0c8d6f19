//! Dashboard session state
//!
//! One `Dashboard` owns everything a page session needs: the expense cache,
//! row flags, search controller, detail modal and status indicator. The
//! presentation layer holds it behind an `Arc` and calls into it; nothing is
//! ambient.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::aggregation::{self, RegionView};
use crate::cache::{CacheEntry, ExpenseCache};
use crate::config::DashboardConfig;
use crate::detail::{DetailLoader, DetailOutcome, ModalSnapshot, OperatorStub};
use crate::error::Result;
use crate::host::HostDocument;
use crate::messages;
use crate::rows::{RowState, RowTable, RowTransition};
use crate::search::{SearchController, SearchOutcome};
use crate::status::{ApiStatus, StatusTracker};
use ans_client::{AggregateStats, Gateway, Operator, TopOperator};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Top-level views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Operators,
}

/// Stats and region aggregates with their load flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewSnapshot {
    pub stats: Option<AggregateStats>,
    pub top_operators: Vec<TopOperator>,
    pub regions: Option<RegionView>,
    pub loading_stats: bool,
    pub stats_error: Option<String>,
    pub loading_regions: bool,
    pub regions_error: Option<String>,
}

#[derive(Debug, Default)]
struct Overview {
    stats: Option<AggregateStats>,
    regions: Option<RegionView>,
    loading_stats: bool,
    stats_error: Option<String>,
    loading_regions: bool,
    regions_error: Option<String>,
}

/// Outcome of [`Dashboard::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartReport {
    pub stats_loaded: bool,
    pub regions_loaded: bool,
    pub search: SearchOutcome,
}

/// A dashboard session.
pub struct Dashboard {
    config: DashboardConfig,
    gateway: Arc<dyn Gateway>,
    host: Arc<dyn HostDocument>,
    cache: Arc<ExpenseCache>,
    rows: RowTable,
    search: SearchController,
    detail: DetailLoader,
    status: StatusTracker,
    overview: RwLock<Overview>,
    view: RwLock<View>,
}

impl Dashboard {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        host: Arc<dyn HostDocument>,
        config: DashboardConfig,
    ) -> Result<Self> {
        config.validate()?;

        let cache = Arc::new(ExpenseCache::new(gateway.clone()));
        let search = SearchController::new(gateway.clone(), host.clone(), &config);
        let detail = DetailLoader::new(gateway.clone(), cache.clone(), host.clone());

        Ok(Self {
            config,
            gateway,
            host,
            cache,
            rows: RowTable::new(),
            search,
            detail,
            status: StatusTracker::new(),
            overview: RwLock::new(Overview::default()),
            view: RwLock::new(View::default()),
        })
    }

    /// Session with the default configuration.
    pub fn with_defaults(gateway: Arc<dyn Gateway>, host: Arc<dyn HostDocument>) -> Result<Self> {
        Self::new(gateway, host, DashboardConfig::default())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Load stats, region totals and the first operator page together.
    pub async fn start(&self) -> StartReport {
        let (stats_loaded, regions_loaded, search) =
            tokio::join!(self.load_stats(), self.load_regions(), self.search.search(1));
        StartReport {
            stats_loaded,
            regions_loaded,
            search,
        }
    }

    // -------------------------------------------------------------------------
    // Overview
    // -------------------------------------------------------------------------

    /// Fetch the aggregate stats. Drives the status indicator.
    pub async fn load_stats(&self) -> bool {
        {
            let mut overview = self.overview.write();
            overview.loading_stats = true;
            overview.stats_error = None;
        }

        let result = self.gateway.stats().await;

        let mut overview = self.overview.write();
        overview.loading_stats = false;
        match result {
            Ok(stats) => {
                overview.stats = Some(stats);
                self.status.record_success();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load statistics");
                overview.stats_error = Some(messages::STATS_UNAVAILABLE.to_string());
                self.status.record_failure();
                false
            }
        }
    }

    /// Fetch region totals and rebuild the region view.
    pub async fn load_regions(&self) -> bool {
        {
            let mut overview = self.overview.write();
            overview.loading_regions = true;
            overview.regions_error = None;
        }

        let result = self.gateway.region_stats().await;

        let mut overview = self.overview.write();
        overview.loading_regions = false;
        match result {
            Ok(totals) => {
                overview.regions = Some(RegionView::build(totals, self.config.chart_limit));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load region totals");
                overview.regions_error = Some(messages::REGIONS_UNAVAILABLE.to_string());
                false
            }
        }
    }

    pub fn status(&self) -> ApiStatus {
        self.status.current()
    }

    pub fn stats(&self) -> Option<AggregateStats> {
        self.overview.read().stats.clone()
    }

    pub fn top_operators(&self) -> Vec<TopOperator> {
        self.overview
            .read()
            .stats
            .as_ref()
            .map(|stats| aggregation::top_operators(stats, self.config.top_limit))
            .unwrap_or_default()
    }

    pub fn region_view(&self) -> Option<RegionView> {
        self.overview.read().regions.clone()
    }

    pub fn overview(&self) -> OverviewSnapshot {
        let top_operators = self.top_operators();
        let overview = self.overview.read();
        OverviewSnapshot {
            stats: overview.stats.clone(),
            top_operators,
            regions: overview.regions.clone(),
            loading_stats: overview.loading_stats,
            stats_error: overview.stats_error.clone(),
            loading_regions: overview.loading_regions,
            regions_error: overview.regions_error.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn view(&self) -> View {
        *self.view.read()
    }

    pub fn navigate(&self, view: View) {
        *self.view.write() = view;
        self.host.scroll_to_top();
    }

    // -------------------------------------------------------------------------
    // Search, rows, detail
    // -------------------------------------------------------------------------

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub async fn toggle_row(&self, operator: &Operator) -> RowTransition {
        self.rows
            .toggle(operator, &self.cache, self.host.as_ref())
            .await
    }

    pub fn row_state(&self, registro_ans: u64) -> RowState {
        self.rows.state(registro_ans)
    }

    pub fn rows(&self) -> &RowTable {
        &self.rows
    }

    pub fn cache(&self) -> &ExpenseCache {
        &self.cache
    }

    /// Cached expenses of `cnpj`, if already resolved.
    pub fn expenses_for(&self, cnpj: &str) -> Option<CacheEntry> {
        self.cache.get(cnpj)
    }

    pub async fn open_detail(&self, stub: impl Into<OperatorStub>) -> DetailOutcome {
        self.detail.open(stub).await
    }

    pub fn close_detail(&self) {
        self.detail.close();
    }

    pub fn modal(&self) -> ModalSnapshot {
        self.detail.snapshot()
    }
}
