//! ANS Dashboard - Session Controller
//!
//! State and caching controller behind the ANS operator expense dashboard.
//! Coordinates debounced search, paginated listing, lazily loaded and
//! memoized expense lists, the operator detail modal and the aggregate views,
//! all against an asynchronous and possibly unreliable API.
//!
//! Key Features:
//! - Debounced search with stale-response protection
//! - Session-wide expense cache with in-flight deduplication
//! - Row expand/collapse state independent of cached data
//! - Detail modal that upgrades partial data as it arrives
//! - Top-N projections for charts
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub mod aggregation;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod format;
pub mod host;
pub mod messages;
pub mod rows;
pub mod search;
pub mod state;
pub mod status;

pub use aggregation::RegionView;
pub use cache::{CacheEntry, CacheLookup, ExpenseCache, LookupOrigin};
pub use config::DashboardConfig;
pub use detail::{DetailLoader, DetailOutcome, ModalSnapshot, OperatorStub, Presented};
pub use error::DashboardError;
pub use host::{HostDocument, HostEvent, NoopHost, RecordingHost};
pub use rows::{RowState, RowTable, RowTransition};
pub use search::{total_pages, SearchController, SearchOutcome, SearchResultPage, SearchSnapshot};
pub use state::{Dashboard, OverviewSnapshot, StartReport, View};
pub use status::{ApiStatus, StatusTracker};
