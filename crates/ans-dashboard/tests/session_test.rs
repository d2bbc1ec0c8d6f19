//! Session start, status indicator, aggregate views and navigation.

mod common;

use ans_client::{
    AggregateStats, Dataset, Endpoint, ExpenseRecord, Gateway, MemoryGateway, Operator,
    OperatorPage, OperatorQuery, RegionTotal,
};
use async_trait::async_trait;
use ans_dashboard::{
    messages, ApiStatus, Dashboard, DashboardConfig, DashboardError, NoopHost, SearchOutcome, View,
};
use common::harness;
use std::sync::Arc;

#[tokio::test]
async fn test_start_loads_everything() {
    let h = harness();
    assert_eq!(h.dashboard.status(), ApiStatus::Connecting);

    let report = h.dashboard.start().await;
    assert!(report.stats_loaded);
    assert!(report.regions_loaded);
    assert_eq!(report.search, SearchOutcome::Applied);

    assert_eq!(h.dashboard.status(), ApiStatus::Online);
    let overview = h.dashboard.overview();
    assert!(!overview.loading_stats);
    assert!(overview.stats_error.is_none());
    assert_eq!(overview.top_operators.len(), 5);
    assert_eq!(overview.regions.unwrap().listing().len(), 6);

    let page = h.dashboard.search().current_page().unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 12);
}

#[tokio::test]
async fn test_stats_failure_goes_offline_but_search_works() {
    let h = harness();
    h.gateway.fail(Endpoint::Stats);

    let report = h.dashboard.start().await;
    assert!(!report.stats_loaded);
    assert_eq!(report.search, SearchOutcome::Applied);
    assert_eq!(h.dashboard.status(), ApiStatus::Offline);
    assert_eq!(
        h.dashboard.overview().stats_error.as_deref(),
        Some(messages::STATS_UNAVAILABLE)
    );
    assert!(h.dashboard.top_operators().is_empty());

    // No retry loop: only the one attempt.
    assert_eq!(h.gateway.call_count(Endpoint::Stats), 1);

    h.gateway.recover(Endpoint::Stats);
    assert!(h.dashboard.load_stats().await);
    assert_eq!(h.dashboard.status(), ApiStatus::Online);
    assert!(h.dashboard.overview().stats_error.is_none());
}

#[tokio::test]
async fn test_region_failure_does_not_touch_status() {
    let h = harness();
    h.gateway.fail(Endpoint::RegionStats);

    h.dashboard.start().await;
    assert_eq!(h.dashboard.status(), ApiStatus::Online);
    let overview = h.dashboard.overview();
    assert!(overview.regions.is_none());
    assert_eq!(
        overview.regions_error.as_deref(),
        Some(messages::REGIONS_UNAVAILABLE)
    );
}

#[tokio::test]
async fn test_region_chart_is_bounded_projection() {
    const UFS: [&str; 15] = [
        "SP", "RJ", "MG", "RS", "PR", "BA", "SC", "PE", "CE", "GO", "DF", "ES", "PA", "AM", "MT",
    ];
    let mut operators = Vec::new();
    let mut expenses = Vec::new();
    for (i, uf) in UFS.iter().enumerate() {
        let registro_ans = 1 + i as u64;
        operators.push(Operator::new(registro_ans, format!("{:08}000100", i), "OP").with_uf(*uf));
        expenses.push(ExpenseRecord {
            registro_ans,
            ano: 2024,
            trimestre: "1T".to_string(),
            valor_despesas: 10_000.0 - i as f64 * 100.0,
        });
    }
    let gateway = Arc::new(MemoryGateway::new(Dataset::new(operators, expenses)));
    let dashboard = Dashboard::with_defaults(gateway, Arc::new(NoopHost)).unwrap();

    assert!(dashboard.load_regions().await);
    let view = dashboard.region_view().unwrap();
    assert_eq!(view.listing().len(), 15);
    assert_eq!(view.chart().len(), 10);
    assert_eq!(view.chart(), &view.listing()[..10]);

    let (labels, _) = view.chart_series();
    assert_eq!(labels, UFS[..10].iter().map(|s| s.to_string()).collect::<Vec<_>>());
}

/// Serves region totals in a fixed order; everything else comes from memory.
struct FixedRegions {
    inner: MemoryGateway,
    regions: Vec<RegionTotal>,
}

#[async_trait]
impl Gateway for FixedRegions {
    async fn stats(&self) -> ans_client::Result<AggregateStats> {
        self.inner.stats().await
    }

    async fn region_stats(&self) -> ans_client::Result<Vec<RegionTotal>> {
        Ok(self.regions.clone())
    }

    async fn search_operators(&self, query: &OperatorQuery) -> ans_client::Result<OperatorPage> {
        self.inner.search_operators(query).await
    }

    async fn operator(&self, cnpj: &str) -> ans_client::Result<Operator> {
        self.inner.operator(cnpj).await
    }

    async fn expenses(&self, cnpj: &str) -> ans_client::Result<Vec<ExpenseRecord>> {
        self.inner.expenses(cnpj).await
    }
}

#[tokio::test]
async fn test_unordered_regions_are_ranked_for_chart_only() {
    let totals = [
        ("BA", 300.0),
        ("SP", 900.0),
        ("AC", 10.0),
        ("RJ", 700.0),
        ("MG", 700.0),
        ("PR", 50.0),
    ];
    let regions: Vec<RegionTotal> = totals
        .iter()
        .map(|(uf, total)| RegionTotal {
            uf: uf.to_string(),
            total: *total,
        })
        .collect();
    let gateway = Arc::new(FixedRegions {
        inner: MemoryGateway::default(),
        regions: regions.clone(),
    });
    let dashboard = Dashboard::new(
        gateway,
        Arc::new(NoopHost),
        DashboardConfig::default().with_chart_limit(4),
    )
    .unwrap();

    assert!(dashboard.load_regions().await);
    let view = dashboard.region_view().unwrap();
    assert_eq!(view.listing(), regions.as_slice());

    let (labels, values) = view.chart_series();
    assert_eq!(labels, vec!["SP", "RJ", "MG", "BA"]);
    assert_eq!(values, vec![900.0, 700.0, 700.0, 300.0]);
}

#[tokio::test]
async fn test_navigation_scrolls_to_top() {
    let h = harness();
    assert_eq!(h.dashboard.view(), View::Dashboard);

    h.dashboard.navigate(View::Operators);
    assert_eq!(h.dashboard.view(), View::Operators);
    assert_eq!(h.host.scroll_to_top_count(), 1);
}

#[test]
fn test_invalid_config_rejected() {
    let gateway = Arc::new(MemoryGateway::default());
    let result = Dashboard::new(
        gateway,
        Arc::new(NoopHost),
        DashboardConfig::default().with_page_size(0),
    );
    assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
}
