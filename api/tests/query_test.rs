// Read-path and emission-log tests against a mocked database backend

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use uuid::Uuid;

use carbon_ledger_api::db::Repositories;
use carbon_ledger_api::entity::{emissions, offset_projects, user_offset_balances};
use carbon_ledger_api::error::LedgerError;
use carbon_ledger_api::handlers::{AppContext, AppState};
use carbon_ledger_api::models::{BalanceData, LogEmissionRequest, PaginationParams};
use carbon_ledger_api::services::estimator::StaticFactorEstimator;
use carbon_ledger_api::services::offset_service::OffsetLedgerService;
use carbon_ledger_api::services::{emission_service, summary_service};

fn app_state(conn: DatabaseConnection) -> AppState {
    Arc::new(AppContext {
        repositories: Repositories::new(conn.clone()),
        ledger: OffsetLedgerService::new(conn),
        estimator: Arc::new(StaticFactorEstimator::new()),
    })
}

fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
}

fn project_fixture(name: &str) -> offset_projects::Model {
    offset_projects::Model {
        id: Uuid::new_v4(),
        project_id: format!("GS-{}", name.len()),
        name: name.to_string(),
        description: "description".to_string(),
        location: "Kenya".to_string(),
        project_type: "reforestation".to_string(),
        cost_per_kg: dec!(0.40),
        available_credits: 1000,
        verification_standard: "Gold Standard".to_string(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn emission_fixture(user_id: Uuid, category: &str) -> emissions::Model {
    emissions::Model {
        id: Uuid::new_v4(),
        user_id,
        emission_type: "travel".to_string(),
        category: category.to_string(),
        amount: dec!(120),
        unit: "km".to_string(),
        co2e_kg: dec!(25.2),
        date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
        description: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn marketplace_returns_active_projects_with_total() {
    let projects = vec![project_fixture("Mangrove Belt"), project_fixture("Wind Farm")];

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(2)]])
        .append_query_results([projects.clone()])
        .into_connection();

    let repositories = Repositories::new(conn);
    let (rows, total) = repositories
        .project
        .find_marketplace(Some("reforestation"), &PaginationParams::default())
        .await
        .expect("marketplace query should succeed");

    assert_eq!(total, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Mangrove Belt");
}

#[tokio::test]
async fn history_returns_paginated_records() {
    let user_id = Uuid::new_v4();
    let records = vec![
        emission_fixture(user_id, "car"),
        emission_fixture(user_id, "flight"),
    ];

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(25)]])
        .append_query_results([records])
        .into_connection();

    let repositories = Repositories::new(conn);
    let (rows, total) = repositories
        .emission
        .find_history(
            user_id,
            None,
            &PaginationParams { page: 1, limit: 2 },
        )
        .await
        .expect("history query should succeed");

    assert_eq!(total, 25);
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn balance_rows_join_project_details() {
    let user_id = Uuid::new_v4();
    let project = project_fixture("Peatland Recovery");
    let balance = user_offset_balances::Model {
        id: Uuid::new_v4(),
        user_id,
        project_id: project.id,
        token_balance: 80,
        total_kg_co2e: dec!(80.0),
        last_updated: Utc::now(),
    };

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![(balance.clone(), project.clone())]])
        .into_connection();

    let repositories = Repositories::new(conn);
    let rows = repositories
        .balance
        .find_by_user(user_id)
        .await
        .expect("balance query should succeed");

    assert_eq!(rows.len(), 1);
    let (balance_row, project_row) = rows.into_iter().next().unwrap();
    let data = BalanceData::from_join(balance_row, project_row.expect("project should join"));
    assert_eq!(data.project_name, "Peatland Recovery");
    assert_eq!(data.token_balance, 80);
    assert_eq!(data.total_kg_co2e, dec!(80.0));
}

#[tokio::test]
async fn summary_nets_emissions_against_offsets() {
    let user_id = Uuid::new_v4();

    let emissions_total: BTreeMap<&str, Value> =
        BTreeMap::from([("total", Value::from(dec!(340.5)))]);
    let offsets_total: BTreeMap<&str, Value> =
        BTreeMap::from([("total", Value::from(dec!(120.0)))]);

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![emissions_total], vec![offsets_total]])
        .into_connection();

    let state = app_state(conn);
    let summary = summary_service::get_summary(&state, user_id)
        .await
        .expect("summary should succeed");

    assert_eq!(summary.total_emissions_kg, dec!(340.5));
    assert_eq!(summary.total_offset_kg, dec!(120.0));
    assert_eq!(summary.net_footprint_kg, dec!(220.5));
}

#[tokio::test]
async fn log_emission_rejects_unknown_type() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = app_state(conn);

    let request = LogEmissionRequest {
        emission_type: "teleportation".to_string(),
        category: "misc".to_string(),
        amount: dec!(1),
        unit: "km".to_string(),
        co2e_kg: dec!(1),
        date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
        description: None,
    };

    let result = emission_service::log_emission(&state, Uuid::new_v4(), request).await;
    assert!(matches!(result, Err(LedgerError::InvalidRequest(_))));
}

#[tokio::test]
async fn log_emission_rejects_non_positive_amount() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = app_state(conn);

    let request = LogEmissionRequest {
        emission_type: "travel".to_string(),
        category: "car".to_string(),
        amount: dec!(0),
        unit: "km".to_string(),
        co2e_kg: dec!(1),
        date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
        description: None,
    };

    let result = emission_service::log_emission(&state, Uuid::new_v4(), request).await;
    assert!(matches!(result, Err(LedgerError::InvalidRequest(_))));
}

#[tokio::test]
async fn log_emission_inserts_record() {
    let user_id = Uuid::new_v4();
    let stored = emission_fixture(user_id, "car");

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection();

    let state = app_state(conn);
    let request = LogEmissionRequest {
        emission_type: "travel".to_string(),
        category: "car".to_string(),
        amount: dec!(120),
        unit: "km".to_string(),
        co2e_kg: dec!(25.2),
        date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
        description: None,
    };

    let logged = emission_service::log_emission(&state, user_id, request)
        .await
        .expect("log should succeed");

    assert_eq!(logged.category, "car");
    assert_eq!(logged.co2e_kg, dec!(25.2));
}
