//! ANS Client In-Memory Gateway
//!
//! A gateway serving a dataset held in memory, applying the same filtering,
//! paging and aggregation rules as the API server. Every call is counted per
//! endpoint, and endpoints can be made to fail or respond slowly.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::{ClientError, Result};
use crate::gateway::{Endpoint, Gateway};
use crate::types::{
    AggregateStats, ExpenseRecord, Operator, OperatorPage, OperatorQuery, RegionTotal, TopOperator,
};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

/// Largest page size the server accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

const TOP_RANKING_SIZE: usize = 5;

// =============================================================================
// Dataset
// =============================================================================

/// Operators and their expense records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub operators: Vec<Operator>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl Dataset {
    pub fn new(operators: Vec<Operator>, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            operators,
            expenses,
        }
    }

    /// Load a dataset from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn find_by_cnpj(&self, cnpj: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.cnpj == cnpj)
    }

    fn search(&self, query: &OperatorQuery) -> Result<OperatorPage> {
        if query.page == 0 || query.limit == 0 || query.limit > MAX_PAGE_SIZE {
            return Err(ClientError::Status {
                status: 422,
                message: format!(
                    "page must be >= 1 and limit within 1..={}",
                    MAX_PAGE_SIZE
                ),
            });
        }

        let needle = query.cnpj.to_lowercase();
        let mut matches: Vec<&Operator> = self
            .operators
            .iter()
            .filter(|op| {
                needle.is_empty()
                    || op.cnpj.to_lowercase().contains(&needle)
                    || op.razao_social.to_lowercase().contains(&needle)
            })
            .collect();
        matches.sort_by_key(|op| op.registro_ans);

        let offset = (query.page as usize - 1) * query.limit as usize;
        let items = matches
            .iter()
            .skip(offset)
            .take(query.limit as usize)
            .map(|op| (*op).clone())
            .collect();

        Ok(OperatorPage {
            items,
            total: matches.len() as u64,
            pagina_atual: Some(query.page),
            tamanho_pagina: Some(query.limit),
        })
    }

    fn stats(&self) -> AggregateStats {
        let total: f64 = self.expenses.iter().map(|e| e.valor_despesas).sum();
        let mean = if self.expenses.is_empty() {
            0.0
        } else {
            total / self.expenses.len() as f64
        };

        let mut per_operator: HashMap<u64, f64> = HashMap::new();
        for expense in &self.expenses {
            *per_operator.entry(expense.registro_ans).or_default() += expense.valor_despesas;
        }

        let mut ranking: Vec<TopOperator> = self
            .operators
            .iter()
            .filter_map(|op| {
                per_operator.get(&op.registro_ans).map(|total| TopOperator {
                    razao_social: op.razao_social.clone(),
                    cnpj: op.cnpj.clone(),
                    total: *total,
                })
            })
            .collect();
        ranking.sort_by(|a, b| b.total.total_cmp(&a.total));
        ranking.truncate(TOP_RANKING_SIZE);

        AggregateStats {
            total_geral: total,
            media_por_lancamento: mean,
            top_5: ranking,
        }
    }

    fn region_totals(&self) -> Vec<RegionTotal> {
        let uf_by_registry: HashMap<u64, &str> = self
            .operators
            .iter()
            .map(|op| (op.registro_ans, op.uf.as_str()))
            .collect();

        let mut per_uf: HashMap<String, f64> = HashMap::new();
        for expense in &self.expenses {
            if let Some(uf) = uf_by_registry.get(&expense.registro_ans) {
                *per_uf.entry((*uf).to_string()).or_default() += expense.valor_despesas;
            }
        }

        let mut totals: Vec<RegionTotal> = per_uf
            .into_iter()
            .map(|(uf, total)| RegionTotal { uf, total })
            .collect();
        totals.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.uf.cmp(&b.uf)));
        totals
    }

    fn expenses_of(&self, cnpj: &str) -> Result<Vec<ExpenseRecord>> {
        let operator = self
            .find_by_cnpj(cnpj)
            .ok_or_else(|| ClientError::NotFound(format!("operadoras/{}/despesas", cnpj)))?;

        let mut records: Vec<ExpenseRecord> = self
            .expenses
            .iter()
            .filter(|e| e.registro_ans == operator.registro_ans)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.ano.cmp(&b.ano).then_with(|| a.trimestre.cmp(&b.trimestre)));
        Ok(records)
    }
}

// =============================================================================
// Memory Gateway
// =============================================================================

/// Gateway answering from an in-memory [`Dataset`].
#[derive(Default)]
pub struct MemoryGateway {
    dataset: RwLock<Dataset>,
    calls: Mutex<HashMap<Endpoint, usize>>,
    failing: RwLock<HashSet<Endpoint>>,
    delays: RwLock<HashMap<Endpoint, Duration>>,
}

impl MemoryGateway {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            ..Default::default()
        }
    }

    /// Load the dataset from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Dataset::from_json_file(path)?))
    }

    /// Make every call to `endpoint` fail until [`recover`](Self::recover).
    pub fn fail(&self, endpoint: Endpoint) {
        self.failing.write().insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.failing.write().remove(&endpoint);
    }

    /// Delay responses of `endpoint`. The delay is read when a call starts.
    pub fn set_delay(&self, endpoint: Endpoint, delay: Duration) {
        if delay.is_zero() {
            self.delays.write().remove(&endpoint);
        } else {
            self.delays.write().insert(endpoint, delay);
        }
    }

    /// Number of calls made to `endpoint`.
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls.lock().get(&endpoint).copied().unwrap_or(0)
    }

    /// Number of calls across all endpoints.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    async fn enter(&self, endpoint: Endpoint) -> Result<()> {
        *self.calls.lock().entry(endpoint).or_default() += 1;

        let delay = self.delays.read().get(&endpoint).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.read().contains(&endpoint) {
            tracing::debug!(%endpoint, "injected failure");
            return Err(ClientError::Unavailable(format!("{} is failing", endpoint)));
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn stats(&self) -> Result<AggregateStats> {
        self.enter(Endpoint::Stats).await?;
        Ok(self.dataset.read().stats())
    }

    async fn region_stats(&self) -> Result<Vec<RegionTotal>> {
        self.enter(Endpoint::RegionStats).await?;
        Ok(self.dataset.read().region_totals())
    }

    async fn search_operators(&self, query: &OperatorQuery) -> Result<OperatorPage> {
        self.enter(Endpoint::Operators).await?;
        self.dataset.read().search(query)
    }

    async fn operator(&self, cnpj: &str) -> Result<Operator> {
        self.enter(Endpoint::Operator).await?;
        self.dataset
            .read()
            .find_by_cnpj(cnpj)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("operadoras/{}", cnpj)))
    }

    async fn expenses(&self, cnpj: &str) -> Result<Vec<ExpenseRecord>> {
        self.enter(Endpoint::Expenses).await?;
        self.dataset.read().expenses_of(cnpj)
    }
}

// =============================================================================
// Tests
// =============================================================================
