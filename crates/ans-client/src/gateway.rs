//! ANS Client Gateway
//!
//! The read-only API surface the dashboard consumes, and its HTTP
//! implementation.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::{AggregateStats, ExpenseRecord, Operator, OperatorPage, OperatorQuery, RegionTotal};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use url::Url;

// =============================================================================
// Endpoints
// =============================================================================

/// The endpoints exposed by the expense API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /estatisticas`
    Stats,
    /// `GET /estatisticas/uf`
    RegionStats,
    /// `GET /operadoras`
    Operators,
    /// `GET /operadoras/{cnpj}`
    Operator,
    /// `GET /operadoras/{cnpj}/despesas`
    Expenses,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stats => "estatisticas",
            Self::RegionStats => "estatisticas/uf",
            Self::Operators => "operadoras",
            Self::Operator => "operadoras/{cnpj}",
            Self::Expenses => "operadoras/{cnpj}/despesas",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Gateway Trait
// =============================================================================

/// Read-only access to the expense API.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Aggregate statistics with the top-5 ranking.
    async fn stats(&self) -> Result<AggregateStats>;

    /// Expense totals per federative unit.
    async fn region_stats(&self) -> Result<Vec<RegionTotal>>;

    /// One page of operators matching a CNPJ/name substring.
    async fn search_operators(&self, query: &OperatorQuery) -> Result<OperatorPage>;

    /// Full operator profile.
    async fn operator(&self, cnpj: &str) -> Result<Operator>;

    /// Expense list of one operator.
    async fn expenses(&self, cnpj: &str) -> Result<Vec<ExpenseRecord>>;
}

// =============================================================================
// HTTP Gateway
// =============================================================================

/// Gateway backed by real HTTP calls.
pub struct HttpGateway {
    config: ClientConfig,
    base_url: Url,
    http: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout.connect)
            .timeout(config.timeout.request)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    /// Create a gateway with the default configuration.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an endpoint URL; path segments are percent-encoded.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%endpoint, error = %e, "request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(response.url().path().to_string()));
        }
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string();
            tracing::warn!(%endpoint, status = status.as_u16(), "server returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%endpoint, status = status.as_u16(), "response received");
        response.json::<T>().await.map_err(ClientError::from)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn stats(&self) -> Result<AggregateStats> {
        let url = self.endpoint_url(&["estatisticas"])?;
        self.get_json(Endpoint::Stats, self.http.get(url)).await
    }

    async fn region_stats(&self) -> Result<Vec<RegionTotal>> {
        let url = self.endpoint_url(&["estatisticas", "uf"])?;
        self.get_json(Endpoint::RegionStats, self.http.get(url)).await
    }

    async fn search_operators(&self, query: &OperatorQuery) -> Result<OperatorPage> {
        let url = self.endpoint_url(&["operadoras"])?;
        let request = self.http.get(url).query(&[
            ("cnpj", query.cnpj.clone()),
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ]);
        self.get_json(Endpoint::Operators, request).await
    }

    async fn operator(&self, cnpj: &str) -> Result<Operator> {
        let url = self.endpoint_url(&["operadoras", cnpj])?;
        self.get_json(Endpoint::Operator, self.http.get(url)).await
    }

    async fn expenses(&self, cnpj: &str) -> Result<Vec<ExpenseRecord>> {
        let url = self.endpoint_url(&["operadoras", cnpj, "despesas"])?;
        self.get_json(Endpoint::Expenses, self.http.get(url)).await
    }
}

// =============================================================================
// Tests
// =============================================================================
