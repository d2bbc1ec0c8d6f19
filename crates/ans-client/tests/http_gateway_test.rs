//! HTTP gateway tests against a local fake API server.

use ans_client::{ClientError, Gateway, HttpGateway, MemoryGateway, OperatorQuery};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;

fn fake_api() -> Router {
    Router::new()
        .route(
            "/api/estatisticas",
            get(|| async {
                Json(json!({
                    "total_geral": 1000.0,
                    "media_por_lancamento": 250.0,
                    "top_5": [
                        {"razao_social": "ALFA SAUDE", "cnpj": "11000000000100", "total": 600.0}
                    ]
                }))
            }),
        )
        .route(
            "/api/estatisticas/uf",
            get(|| async {
                Json(json!([
                    {"uf": "SP", "total": 700.0},
                    {"uf": "RJ", "total": 300.0}
                ]))
            }),
        )
        .route(
            "/api/operadoras",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // Echo the query back through the extra fields.
                Json(json!({
                    "items": [{
                        "registro_ans": 1,
                        "cnpj": "11000000000100",
                        "razao_social": "ALFA SAUDE",
                        "modalidade": "Cooperativa Medica",
                        "uf": "SP",
                        "echo_cnpj": params.get("cnpj"),
                        "echo_page": params.get("page"),
                        "echo_limit": params.get("limit")
                    }],
                    "total": 1
                }))
            }),
        )
        .route(
            "/api/operadoras/:cnpj",
            get(|Path(cnpj): Path<String>| async move {
                match cnpj.as_str() {
                    "404" => Err(StatusCode::NOT_FOUND),
                    "500" => Err(StatusCode::INTERNAL_SERVER_ERROR),
                    _ => Ok(Json(json!({
                        "registro_ans": 1,
                        "cnpj": cnpj,
                        "razao_social": "ALFA SAUDE",
                        "modalidade": "Cooperativa Medica",
                        "uf": "SP"
                    }))),
                }
            }),
        )
        .route(
            "/api/operadoras/:cnpj/despesas",
            get(|Path(cnpj): Path<String>| async move {
                if cnpj == "garbage" {
                    return Json(json!({"unexpected": true}));
                }
                Json(json!([
                    {"registro_ans": 1, "ano": 2024, "trimestre": "1T", "valor_despesas": 10.5},
                    {"registro_ans": 1, "ano": 2024, "trimestre": "2T", "valor_despesas": 20.0}
                ]))
            }),
        )
}

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fake_api()).await.unwrap();
    });
    format!("http://{}/api", addr)
}

#[tokio::test]
async fn test_stats_and_regions() {
    let gateway = HttpGateway::with_base_url(&spawn_server().await).unwrap();

    let stats = gateway.stats().await.unwrap();
    assert_eq!(stats.total_geral, 1000.0);
    assert_eq!(stats.top_5[0].cnpj, "11000000000100");

    let regions = gateway.region_stats().await.unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].uf, "SP");
}

#[tokio::test]
async fn test_search_sends_query_params() {
    let gateway = HttpGateway::with_base_url(&spawn_server().await).unwrap();

    let page = gateway
        .search_operators(&OperatorQuery::new("000100", 2, 10))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    let op = &page.items[0];
    assert_eq!(op.extra["echo_cnpj"], Value::from("000100"));
    assert_eq!(op.extra["echo_page"], Value::from("2"));
    assert_eq!(op.extra["echo_limit"], Value::from("10"));
}

#[tokio::test]
async fn test_operator_and_expenses() {
    let gateway = HttpGateway::with_base_url(&spawn_server().await).unwrap();

    let op = gateway.operator("11000000000100").await.unwrap();
    assert_eq!(op.razao_social, "ALFA SAUDE");

    let expenses = gateway.expenses("11000000000100").await.unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[1].valor_despesas, 20.0);
}

#[tokio::test]
async fn test_error_statuses() {
    let gateway = HttpGateway::with_base_url(&spawn_server().await).unwrap();

    let err = gateway.operator("404").await.unwrap_err();
    assert!(err.is_not_found());

    let err = gateway.operator("500").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(err.is_retryable());

    let err = gateway.expenses("garbage").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpGateway::with_base_url(&format!("http://{}/api", addr)).unwrap();
    let err = gateway.stats().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::RequestFailed(_) | ClientError::Timeout(_)
    ));
}

#[tokio::test]
async fn test_memory_gateway_from_fixture_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "operators": [
                {{"registro_ans": 7, "cnpj": "70000000000100", "razao_social": "SETE", "uf": "MG"}}
            ],
            "expenses": [
                {{"registro_ans": 7, "ano": 2024, "trimestre": "1T", "valor_despesas": 42.0}}
            ]
        }}"#
    )
    .unwrap();

    let gateway = MemoryGateway::from_json_file(file.path()).unwrap();
    let stats = gateway.stats().await.unwrap();
    assert_eq!(stats.total_geral, 42.0);
    assert_eq!(gateway.operator("70000000000100").await.unwrap().uf, "MG");
}
