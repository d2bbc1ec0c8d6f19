//! Row expand/collapse state
//!
//! Per-row UI flags keyed by registry number. The flags are independent of
//! the expense cache: collapsing a row never discards its cached data.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::cache::{ExpenseCache, LookupOrigin};
use crate::host::HostDocument;
use crate::messages;
use ans_client::Operator;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Visible state of one result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Collapsed,
    Loading,
    Ready,
}

impl RowState {
    pub fn is_expanded(&self) -> bool {
        !matches!(self, Self::Collapsed)
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTransition {
    /// Expanded → Collapsed; local only.
    Collapsed,
    /// Collapsed → Ready straight from the cache; no network call.
    ExpandedFromCache,
    /// Collapsed → Loading → Ready.
    ExpandedAfterLoad { origin: LookupOrigin, failed: bool },
}

#[derive(Debug, Default, Clone, Copy)]
struct RowFlags {
    expanded: bool,
    loading: bool,
}

#[derive(Debug, Default)]
pub struct RowTable {
    rows: Mutex<HashMap<u64, RowFlags>>,
}

impl RowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, registro_ans: u64) -> RowState {
        match self.rows.lock().get(&registro_ans) {
            Some(flags) if flags.expanded && flags.loading => RowState::Loading,
            Some(flags) if flags.expanded => RowState::Ready,
            _ => RowState::Collapsed,
        }
    }

    pub fn is_expanded(&self, registro_ans: u64) -> bool {
        self.state(registro_ans).is_expanded()
    }

    /// Whether an expense fetch started by this row is still outstanding,
    /// even if the row was collapsed meanwhile.
    pub fn is_loading(&self, registro_ans: u64) -> bool {
        self.rows
            .lock()
            .get(&registro_ans)
            .is_some_and(|flags| flags.loading)
    }

    /// Registry numbers of all expanded rows, ascending.
    pub fn expanded(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .rows
            .lock()
            .iter()
            .filter(|(_, flags)| flags.expanded)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Flip the row of `operator`, loading its expenses on first expansion.
    pub async fn toggle(
        &self,
        operator: &Operator,
        cache: &ExpenseCache,
        host: &dyn HostDocument,
    ) -> RowTransition {
        let id = operator.registro_ans;
        {
            let mut rows = self.rows.lock();
            let flags = rows.entry(id).or_default();
            if flags.expanded {
                flags.expanded = false;
                return RowTransition::Collapsed;
            }
            flags.expanded = true;

            if cache.contains(&operator.cnpj) {
                tracing::debug!(registro_ans = id, "using cached expenses");
                return RowTransition::ExpandedFromCache;
            }
            flags.loading = true;
        }

        let lookup = cache.get_or_fetch(&operator.cnpj).await;

        if let Some(flags) = self.rows.lock().get_mut(&id) {
            flags.loading = false;
        }
        if lookup.is_fresh_failure() {
            host.alert(messages::EXPENSES_UNAVAILABLE);
        }

        RowTransition::ExpandedAfterLoad {
            origin: lookup.origin,
            failed: lookup.entry.is_failed(),
        }
    }
}
