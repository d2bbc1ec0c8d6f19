//! ANS Dashboard Expense Cache
//!
//! Session-wide memo of expense lists keyed by CNPJ. Search rows and top
//! ranking entries for the same operator share one slot. A failed fetch is
//! remembered as a permanent empty sentinel so it is never retried within the
//! session. Concurrent lookups of a key that is still loading wait on the
//! same fetch instead of issuing a second one.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use ans_client::{ExpenseRecord, Gateway};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

// =============================================================================
// Cache Entry
// =============================================================================

/// A resolved cache slot.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// Expenses as returned by the backend (possibly empty).
    Loaded(Arc<[ExpenseRecord]>),
    /// The fetch failed; reads as an empty list for the rest of the session.
    Failed,
}

impl CacheEntry {
    pub fn records(&self) -> &[ExpenseRecord] {
        match self {
            Self::Loaded(records) => records,
            Self::Failed => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Sum of `valor_despesas` over the entry.
    pub fn total(&self) -> f64 {
        self.records().iter().map(|r| r.valor_despesas).sum()
    }
}

/// How a lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOrigin {
    /// Already resolved; no network access.
    Hit,
    /// This call issued the fetch.
    Fetched,
    /// Waited on a fetch issued by another caller.
    Joined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup {
    pub entry: CacheEntry,
    pub origin: LookupOrigin,
}

impl CacheLookup {
    /// True only for the caller whose own fetch just failed, so the failure
    /// is surfaced once.
    pub fn is_fresh_failure(&self) -> bool {
        self.origin == LookupOrigin::Fetched && self.entry.is_failed()
    }
}

// =============================================================================
// Expense Cache
// =============================================================================

pub struct ExpenseCache {
    gateway: Arc<dyn Gateway>,
    slots: Mutex<HashMap<String, Arc<OnceCell<CacheEntry>>>>,
}

impl ExpenseCache {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resolved entry for `cnpj`, without touching the network.
    pub fn get(&self, cnpj: &str) -> Option<CacheEntry> {
        self.slots
            .lock()
            .get(cnpj)
            .and_then(|slot| slot.get().cloned())
    }

    /// Whether `cnpj` has a resolved entry (loaded or failed).
    pub fn contains(&self, cnpj: &str) -> bool {
        self.slots
            .lock()
            .get(cnpj)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached entry, fetching it on a miss.
    pub async fn get_or_fetch(&self, cnpj: &str) -> CacheLookup {
        let slot = self
            .slots
            .lock()
            .entry(cnpj.to_string())
            .or_default()
            .clone();

        if let Some(entry) = slot.get() {
            tracing::debug!(cnpj, "expense cache hit");
            return CacheLookup {
                entry: entry.clone(),
                origin: LookupOrigin::Hit,
            };
        }

        let fetched = AtomicBool::new(false);
        let entry = slot
            .get_or_init(|| {
                let fetched = &fetched;
                async move {
                    fetched.store(true, Ordering::SeqCst);
                    self.fetch(cnpj).await
                }
            })
            .await
            .clone();

        let origin = if fetched.load(Ordering::SeqCst) {
            LookupOrigin::Fetched
        } else {
            tracing::debug!(cnpj, "joined in-flight expense fetch");
            LookupOrigin::Joined
        };
        CacheLookup { entry, origin }
    }

    async fn fetch(&self, cnpj: &str) -> CacheEntry {
        tracing::debug!(cnpj, "expense cache miss, fetching");
        match self.gateway.expenses(cnpj).await {
            Ok(records) => CacheEntry::Loaded(records.into()),
            Err(e) => {
                tracing::error!(cnpj, error = %e, "failed to load expenses, caching empty sentinel");
                CacheEntry::Failed
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
