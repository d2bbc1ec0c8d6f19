//! ANS Dashboard Search Controller
//!
//! Owns the search term, the current page and the debounce timer, and keeps
//! the last successful result page. Typing schedules a search after a quiet
//! period; paging issues one immediately, but only for pages that exist.
//!
//! Every issued request takes a sequence number. A response that arrives
//! after a newer request was issued is discarded, so a slow earlier search
//! can never overwrite a later one.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::config::DashboardConfig;
use crate::debounce::Debouncer;
use crate::host::HostDocument;
use crate::messages;
use ans_client::{Gateway, Operator, OperatorQuery};
use parking_lot::Mutex;
use std::sync::Arc;

// =============================================================================
// Result Page
// =============================================================================

/// Number of pages for `total` rows, never less than one.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One successfully fetched page of operators.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultPage {
    pub term: String,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub items: Vec<Operator>,
}

impl SearchResultPage {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether any paging control should be enabled.
    pub fn is_paginated(&self) -> bool {
        self.total_pages() > 1
    }
}

// =============================================================================
// Controller State
// =============================================================================

/// Point-in-time view of the search state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub term: String,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub result: Option<Arc<SearchResultPage>>,
    pub loading: bool,
    pub error: Option<String>,
    /// False until the first search is issued; hides "no results".
    pub started: bool,
}

/// What happened to a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response replaced the current page.
    Applied,
    /// A newer request was issued first; the response was dropped.
    Superseded,
    /// The request failed; the previous page is kept.
    Failed,
    /// The page was out of range; nothing was sent.
    OutOfRange,
}

/// Which term a request is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TermSource {
    /// The term as last typed.
    Typed,
    /// The term of the page on screen; paging stays within its result set.
    Shown,
}

#[derive(Debug)]
struct SearchState {
    term: String,
    page: u32,
    total: u64,
    result: Option<Arc<SearchResultPage>>,
    loading: bool,
    error: Option<String>,
    started: bool,
    latest_request: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
            total: 0,
            result: None,
            loading: false,
            error: None,
            started: false,
            latest_request: 0,
        }
    }
}

struct SearchInner {
    gateway: Arc<dyn Gateway>,
    host: Arc<dyn HostDocument>,
    limit: u32,
    state: Mutex<SearchState>,
    debounce: Debouncer,
}

// =============================================================================
// Search Controller
// =============================================================================

/// Debounced, paginated operator search. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<SearchInner>,
}

impl SearchController {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        host: Arc<dyn HostDocument>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                gateway,
                host,
                limit: config.page_size,
                state: Mutex::new(SearchState::default()),
                debounce: Debouncer::new(config.debounce),
            }),
        }
    }

    pub fn term(&self) -> String {
        self.inner.state.lock().term.clone()
    }

    pub fn page(&self) -> u32 {
        self.inner.state.lock().page
    }

    pub fn limit(&self) -> u32 {
        self.inner.limit
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.inner.state.lock().total, self.inner.limit)
    }

    /// Last successfully fetched page.
    pub fn current_page(&self) -> Option<Arc<SearchResultPage>> {
        self.inner.state.lock().result.clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let state = self.inner.state.lock();
        SearchSnapshot {
            term: state.term.clone(),
            page: state.page,
            limit: self.inner.limit,
            total: state.total,
            total_pages: total_pages(state.total, self.inner.limit),
            result: state.result.clone(),
            loading: state.loading,
            error: state.error.clone(),
            started: state.started,
        }
    }

    /// Whether a typed term is still waiting out the quiet period.
    pub fn is_search_scheduled(&self) -> bool {
        self.inner.debounce.is_pending()
    }

    /// Record the typed term and schedule a page-1 search after the quiet
    /// period, replacing any search scheduled earlier.
    pub fn set_term(&self, term: impl Into<String>) {
        self.inner.state.lock().term = term.into();
        let this = self.clone();
        self.inner.debounce.schedule(async move {
            this.search(1).await;
        });
    }

    /// Drop a scheduled search. In-flight requests are not affected.
    pub fn cancel_scheduled(&self) -> bool {
        self.inner.debounce.cancel()
    }

    /// Search page 1 now, dropping any scheduled search.
    pub async fn submit(&self) -> SearchOutcome {
        self.inner.debounce.cancel();
        self.search(1).await
    }

    /// Fetch page `page` of the listing on screen if it exists; otherwise do
    /// nothing. A term typed since that listing arrived is left to its own
    /// scheduled search.
    pub async fn goto_page(&self, page: i64) -> SearchOutcome {
        self.request(page, TermSource::Shown).await
    }

    /// Move `delta` pages from the current one, within bounds.
    pub async fn change_page(&self, delta: i64) -> SearchOutcome {
        let target = i64::from(self.page()) + delta;
        self.goto_page(target).await
    }

    /// Issue a request for `page` with the current term.
    pub async fn search(&self, page: u32) -> SearchOutcome {
        self.request(i64::from(page.max(1)), TermSource::Typed).await
    }

    async fn request(&self, page: i64, source: TermSource) -> SearchOutcome {
        let (request, query) = {
            let mut state = self.inner.state.lock();
            let term = match source {
                TermSource::Typed => state.term.clone(),
                TermSource::Shown => {
                    let pages = total_pages(state.total, self.inner.limit);
                    if page < 1 || page > i64::from(pages) {
                        tracing::debug!(page, pages, "ignoring out-of-range page request");
                        return SearchOutcome::OutOfRange;
                    }
                    match &state.result {
                        Some(result) => result.term.clone(),
                        None => state.term.clone(),
                    }
                }
            };
            // Typed pages come from a u32; shown pages are bounded above.
            let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
            state.latest_request += 1;
            state.loading = true;
            state.error = None;
            state.started = true;
            (
                state.latest_request,
                OperatorQuery::new(term, page, self.inner.limit),
            )
        };
        let page = query.page;

        tracing::debug!(request, term = %query.cnpj, page, "searching operators");
        let response = self.inner.gateway.search_operators(&query).await;

        let mut state = self.inner.state.lock();
        if request != state.latest_request {
            tracing::debug!(request, latest = state.latest_request, "discarding superseded search response");
            return SearchOutcome::Superseded;
        }
        state.loading = false;

        match response {
            Ok(result) => {
                state.page = page;
                state.total = result.total;
                state.result = Some(Arc::new(SearchResultPage {
                    term: query.cnpj,
                    page,
                    limit: query.limit,
                    total: result.total,
                    items: result.items,
                }));
                drop(state);
                self.inner.host.scroll_to_top();
                SearchOutcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "operator search failed");
                state.error = Some(messages::SEARCH_FAILED.to_string());
                SearchOutcome::Failed
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
