//! ANS Client - Expense API Gateway
//!
//! Rust client for the read-only ANS operator expense API.
//! Provides the gateway trait consumed by the dashboard, an HTTP
//! implementation and an in-memory implementation.
//!
//! Key Features:
//! - Async-first API with tokio integration
//! - Typed wire models for operators, expenses and aggregates
//! - Percent-encoded endpoint building on a configurable base URL
//! - In-memory dataset gateway with per-endpoint call accounting
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub mod config;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod types;

pub use config::{ClientConfig, TimeoutConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use gateway::{Endpoint, Gateway, HttpGateway};
pub use memory::{Dataset, MemoryGateway};
pub use types::{
    AggregateStats, ExpenseRecord, Operator, OperatorPage, OperatorQuery, RegionTotal, TopOperator,
};
