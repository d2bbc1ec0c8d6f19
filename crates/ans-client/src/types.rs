//! Wire types for the ANS expense API
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A regulated health-plan operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operator {
    pub registro_ans: u64,
    pub cnpj: String,
    pub razao_social: String,
    #[serde(default)]
    pub modalidade: String,
    #[serde(default)]
    pub uf: String,
    /// Any other summary fields the backend sends along.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Operator {
    pub fn new(
        registro_ans: u64,
        cnpj: impl Into<String>,
        razao_social: impl Into<String>,
    ) -> Self {
        Self {
            registro_ans,
            cnpj: cnpj.into(),
            razao_social: razao_social.into(),
            modalidade: String::new(),
            uf: String::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_modalidade(mut self, modalidade: impl Into<String>) -> Self {
        self.modalidade = modalidade.into();
        self
    }

    pub fn with_uf(mut self, uf: impl Into<String>) -> Self {
        self.uf = uf.into();
        self
    }
}

/// One expense line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub registro_ans: u64,
    pub ano: i32,
    pub trimestre: String,
    pub valor_despesas: f64,
}

/// Entry of the top-5 ranking in the aggregate statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopOperator {
    pub razao_social: String,
    pub cnpj: String,
    pub total: f64,
}

/// Process-wide aggregate snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AggregateStats {
    pub total_geral: f64,
    pub media_por_lancamento: f64,
    #[serde(default)]
    pub top_5: Vec<TopOperator>,
}

/// Expense total for one federative unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionTotal {
    pub uf: String,
    pub total: f64,
}

/// One page of the operator listing as the server returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OperatorPage {
    pub items: Vec<Operator>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagina_atual: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tamanho_pagina: Option<u32>,
}

/// Query for `GET /operadoras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorQuery {
    /// Substring filter.
    pub cnpj: String,
    pub page: u32,
    pub limit: u32,
}

impl OperatorQuery {
    pub fn new(term: impl Into<String>, page: u32, limit: u32) -> Self {
        Self {
            cnpj: term.into(),
            page,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_keeps_extra_fields() {
        let json = r#"{
            "registro_ans": 321456,
            "cnpj": "12345678000100",
            "razao_social": "SAUDE EXEMPLO S.A.",
            "modalidade": "Medicina de Grupo",
            "uf": "SP",
            "cidade": "Campinas"
        }"#;
        let op: Operator = serde_json::from_str(json).unwrap();
        assert_eq!(op.registro_ans, 321456);
        assert_eq!(op.uf, "SP");
        assert_eq!(op.extra["cidade"], "Campinas");

        let back = serde_json::to_value(&op).unwrap();
        assert_eq!(back["cidade"], "Campinas");
    }

    #[test]
    fn test_page_without_paging_echo() {
        let page: OperatorPage = serde_json::from_str(r#"{"items": [], "total": 0}"#).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.pagina_atual.is_none());
    }

    #[test]
    fn test_stats_decoding() {
        let json = r#"{
            "total_geral": 1500.5,
            "media_por_lancamento": 750.25,
            "top_5": [{"razao_social": "A", "cnpj": "1", "total": 1000.0}]
        }"#;
        let stats: AggregateStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.top_5.len(), 1);
        assert_eq!(stats.top_5[0].cnpj, "1");
    }
}
