//! ANS Dashboard Detail Loader
//!
//! Opens the operator detail modal. Whatever is already known about the
//! operator is shown at once. Then the full profile fetch and the expense
//! cache fill run side by side. A failed profile fetch leaves the modal open
//! on the data it already shows.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::cache::{CacheLookup, ExpenseCache};
use crate::host::HostDocument;
use crate::messages;
use ans_client::{Gateway, Operator, TopOperator};
use parking_lot::Mutex;
use std::sync::Arc;

// =============================================================================
// Stubs
// =============================================================================

/// Partial operator data the modal can be opened from.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorStub {
    /// A row of the search results.
    Row(Operator),
    /// An entry of the top ranking (no registry number).
    Ranked(TopOperator),
}

impl OperatorStub {
    pub fn cnpj(&self) -> &str {
        match self {
            Self::Row(op) => &op.cnpj,
            Self::Ranked(top) => &top.cnpj,
        }
    }

    pub fn razao_social(&self) -> &str {
        match self {
            Self::Row(op) => &op.razao_social,
            Self::Ranked(top) => &top.razao_social,
        }
    }
}

impl From<Operator> for OperatorStub {
    fn from(op: Operator) -> Self {
        Self::Row(op)
    }
}

impl From<TopOperator> for OperatorStub {
    fn from(top: TopOperator) -> Self {
        Self::Ranked(top)
    }
}

/// What the modal currently displays.
#[derive(Debug, Clone, PartialEq)]
pub enum Presented {
    Stub(OperatorStub),
    Profile(Operator),
}

impl Presented {
    pub fn cnpj(&self) -> &str {
        match self {
            Self::Stub(stub) => stub.cnpj(),
            Self::Profile(op) => &op.cnpj,
        }
    }

    pub fn razao_social(&self) -> &str {
        match self {
            Self::Stub(stub) => stub.razao_social(),
            Self::Profile(op) => &op.razao_social,
        }
    }

    /// The full profile, once it has arrived.
    pub fn profile(&self) -> Option<&Operator> {
        match self {
            Self::Profile(op) => Some(op),
            Self::Stub(_) => None,
        }
    }
}

// =============================================================================
// Modal State
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalSnapshot {
    pub presented: Option<Presented>,
    pub busy: bool,
    pub error: Option<String>,
}

impl ModalSnapshot {
    pub fn is_open(&self) -> bool {
        self.presented.is_some()
    }
}

#[derive(Debug, Default)]
struct ModalState {
    presented: Option<Presented>,
    busy: bool,
    error: Option<String>,
    /// Bumped on every open and close; a completion for an older
    /// generation must not touch the modal.
    generation: u64,
}

/// Result of one `open` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailOutcome {
    pub profile_loaded: bool,
    pub expenses: CacheLookup,
    /// The modal was closed or reopened before the fetches finished.
    pub superseded: bool,
}

// =============================================================================
// Detail Loader
// =============================================================================

pub struct DetailLoader {
    gateway: Arc<dyn Gateway>,
    cache: Arc<ExpenseCache>,
    host: Arc<dyn HostDocument>,
    state: Mutex<ModalState>,
}

impl DetailLoader {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        cache: Arc<ExpenseCache>,
        host: Arc<dyn HostDocument>,
    ) -> Self {
        Self {
            gateway,
            cache,
            host,
            state: Mutex::new(ModalState::default()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().presented.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().busy
    }

    pub fn presented(&self) -> Option<Presented> {
        self.state.lock().presented.clone()
    }

    pub fn snapshot(&self) -> ModalSnapshot {
        let state = self.state.lock();
        ModalSnapshot {
            presented: state.presented.clone(),
            busy: state.busy,
            error: state.error.clone(),
        }
    }

    /// Show `stub` immediately, then upgrade it to the full profile while
    /// making sure the operator's expenses are cached.
    pub async fn open(&self, stub: impl Into<OperatorStub>) -> DetailOutcome {
        let stub = stub.into();
        let cnpj = stub.cnpj().to_string();
        let from_ranking = matches!(stub, OperatorStub::Ranked(_));

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.presented = Some(Presented::Stub(stub));
            state.busy = true;
            state.error = None;
            state.generation
        };
        self.host.set_scroll_lock(true);

        let (profile, expenses) = tokio::join!(
            self.gateway.operator(&cnpj),
            self.cache.get_or_fetch(&cnpj)
        );

        let mut state = self.state.lock();
        let superseded = state.generation != generation;
        let profile_loaded = match profile {
            Ok(op) => {
                if !superseded {
                    state.presented = Some(Presented::Profile(op));
                }
                true
            }
            Err(e) => {
                tracing::error!(cnpj = %cnpj, error = %e, "failed to load operator details");
                if !superseded {
                    state.error = Some(messages::DETAIL_UNAVAILABLE.to_string());
                }
                false
            }
        };
        if !superseded {
            state.busy = false;
        }
        drop(state);

        if !profile_loaded && from_ranking && !superseded {
            self.host.alert(messages::DETAIL_UNAVAILABLE);
        }

        DetailOutcome {
            profile_loaded,
            expenses,
            superseded,
        }
    }

    /// Clear the modal and release the scroll lock.
    pub fn close(&self) {
        {
            let mut state = self.state.lock();
            state.generation += 1;
            state.presented = None;
            state.busy = false;
            state.error = None;
        }
        self.host.set_scroll_lock(false);
    }
}

// =============================================================================
// Tests
// =============================================================================
