//! ANS Dashboard Aggregation Views
//!
//! Bounded projections of aggregate datasets for chart display. The full
//! dataset is fetched once; the chart and the textual listing are both views
//! of the same in-memory copy.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use ans_client::{AggregateStats, RegionTotal, TopOperator};
use std::cmp::Ordering;

// =============================================================================
// Top-N Projection
// =============================================================================

/// Whether `items` is ranked by `score`, highest first.
pub fn is_ranked<T, F>(items: &[T], score: F) -> bool
where
    F: Fn(&T) -> f64,
{
    items.windows(2).all(|pair| score(&pair[0]) >= score(&pair[1]))
}

/// The `limit` highest-scoring items.
///
/// Input already ranked highest-first is cut as given. Anything else is
/// stable-sorted by score first, so ties keep their input order.
pub fn top_n<T, F>(items: &[T], limit: usize, score: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    if is_ranked(items, &score) {
        return items.iter().take(limit).cloned().collect();
    }

    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(limit).cloned().collect()
}

// =============================================================================
// Region View
// =============================================================================

/// Expense totals per federative unit, for a chart plus a full listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionView {
    listing: Vec<RegionTotal>,
    chart: Vec<RegionTotal>,
}

impl RegionView {
    pub fn build(totals: Vec<RegionTotal>, chart_limit: usize) -> Self {
        let chart = top_n(&totals, chart_limit, |r| r.total);
        Self {
            listing: totals,
            chart,
        }
    }

    /// Bounded projection for the chart.
    pub fn chart(&self) -> &[RegionTotal] {
        &self.chart
    }

    /// Every region, in the order received.
    pub fn listing(&self) -> &[RegionTotal] {
        &self.listing
    }

    /// Chart labels and values as parallel vectors.
    pub fn chart_series(&self) -> (Vec<String>, Vec<f64>) {
        self.chart
            .iter()
            .map(|r| (r.uf.clone(), r.total))
            .unzip()
    }

    pub fn grand_total(&self) -> f64 {
        self.listing.iter().map(|r| r.total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }
}

/// Highest-spending operators from a stats snapshot.
pub fn top_operators(stats: &AggregateStats, limit: usize) -> Vec<TopOperator> {
    top_n(&stats.top_5, limit, |op| op.total)
}

// =============================================================================
// Tests
// =============================================================================
