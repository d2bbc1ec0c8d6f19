//! Shared fixtures for dashboard integration tests.

#![allow(dead_code)]

use ans_client::{Dataset, ExpenseRecord, MemoryGateway, Operator};
use ans_dashboard::{Dashboard, DashboardConfig, RecordingHost};
use std::sync::Arc;

/// CNPJs containing the substring "000100".
pub const MATCHING_CNPJS: [&str; 8] = [
    "11111111000100",
    "22222222000100",
    "33333333000100",
    "44444444000100",
    "55555555000100",
    "66666666000100",
    "77777777000100",
    "88888888000100",
];

/// CNPJs without it.
pub const OTHER_CNPJS: [&str; 4] = [
    "12345678000299",
    "23456789000388",
    "34567890000477",
    "45678901000566",
];

const UFS: [&str; 6] = ["SP", "RJ", "MG", "RS", "PR", "BA"];

pub fn dataset() -> Dataset {
    let mut operators = Vec::new();
    let mut expenses = Vec::new();

    for (i, cnpj) in MATCHING_CNPJS.iter().chain(OTHER_CNPJS.iter()).enumerate() {
        let registro_ans = 300_000 + i as u64;
        operators.push(
            Operator::new(registro_ans, *cnpj, format!("OPERADORA {}", i + 1))
                .with_modalidade("Medicina de Grupo")
                .with_uf(UFS[i % UFS.len()]),
        );
        for (q, trimestre) in ["1T", "2T"].iter().enumerate() {
            expenses.push(ExpenseRecord {
                registro_ans,
                ano: 2024,
                trimestre: trimestre.to_string(),
                valor_despesas: 1000.0 * (i + 1) as f64 + q as f64,
            });
        }
    }

    Dataset::new(operators, expenses)
}

pub struct Harness {
    pub gateway: Arc<MemoryGateway>,
    pub host: Arc<RecordingHost>,
    pub dashboard: Arc<Dashboard>,
}

pub fn harness() -> Harness {
    harness_with(DashboardConfig::default())
}

pub fn harness_with(config: DashboardConfig) -> Harness {
    let gateway = Arc::new(MemoryGateway::new(dataset()));
    let host = Arc::new(RecordingHost::new());
    let dashboard = Arc::new(
        Dashboard::new(gateway.clone(), host.clone(), config).expect("valid config"),
    );
    Harness {
        gateway,
        host,
        dashboard,
    }
}

pub fn operator(harness: &Harness, cnpj: &str) -> Operator {
    let page = harness
        .dashboard
        .search()
        .current_page()
        .expect("a page was loaded");
    page.items
        .iter()
        .find(|op| op.cnpj == cnpj)
        .cloned()
        .expect("operator on the current page")
}
