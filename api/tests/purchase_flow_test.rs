// Purchase flow tests against a mocked database backend

use std::time::Duration;

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use uuid::Uuid;

use carbon_ledger_api::entity::{offset_projects, offset_purchases, user_offset_balances};
use carbon_ledger_api::error::LedgerError;
use carbon_ledger_api::models::PurchaseRequest;
use carbon_ledger_api::services::offset_service::{OffsetLedgerService, STATUS_COMPLETED};

fn project_fixture(available_credits: i32) -> offset_projects::Model {
    offset_projects::Model {
        id: Uuid::new_v4(),
        project_id: "VCS-1234".to_string(),
        name: "Rainforest Restoration".to_string(),
        description: "Reforestation of degraded pasture".to_string(),
        location: "Brazil".to_string(),
        project_type: "reforestation".to_string(),
        cost_per_kg: dec!(0.50),
        available_credits,
        verification_standard: "VCS".to_string(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn purchase_fixture(
    user_id: Uuid,
    project_id: Uuid,
    quantity: i32,
    idempotency_key: Option<String>,
) -> offset_purchases::Model {
    offset_purchases::Model {
        id: Uuid::new_v4(),
        user_id,
        project_id,
        quantity,
        total_co2e_kg: dec!(50.0),
        total_hbar_cost: dec!(25.0),
        status: STATUS_COMPLETED.to_string(),
        idempotency_key,
        created_at: Utc::now(),
    }
}

fn request_fixture(quantity: i32) -> PurchaseRequest {
    PurchaseRequest {
        project_id: "VCS-1234".to_string(),
        quantity,
        total_co2e_kg: dec!(50.0),
        total_hbar_cost: dec!(25.0),
        idempotency_key: None,
    }
}

/// Service under test with local retries disabled so conflict paths
/// surface on the first attempt
fn single_attempt_service(conn: DatabaseConnection) -> OffsetLedgerService {
    OffsetLedgerService::with_config(conn, 1, 1, Duration::from_secs(5))
}

#[tokio::test]
async fn completed_purchase_applies_all_three_mutations() {
    let user_id = Uuid::new_v4();
    let project = project_fixture(200);
    let purchase = purchase_fixture(user_id, project.id, 50, None);

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        // project resolution, then the purchase insert RETURNING row
        .append_query_results([vec![project.clone()]])
        .append_query_results([vec![purchase.clone()]])
        // inventory decrement, then the additive balance update
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let service = single_attempt_service(conn);
    let result = service.purchase(user_id, &request_fixture(50)).await;

    let applied = result.expect("purchase should complete");
    assert_eq!(applied.status, STATUS_COMPLETED);
    assert_eq!(applied.quantity, 50);
    assert_eq!(applied.project_id, project.id);
    assert_eq!(applied.user_id, user_id);
}

#[tokio::test]
async fn first_purchase_inserts_a_balance_row() {
    let user_id = Uuid::new_v4();
    let project = project_fixture(200);
    let purchase = purchase_fixture(user_id, project.id, 50, None);
    let balance = user_offset_balances::Model {
        id: Uuid::new_v4(),
        user_id,
        project_id: project.id,
        token_balance: 50,
        total_kg_co2e: dec!(50.0),
        last_updated: Utc::now(),
    };

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project.clone()]])
        .append_query_results([vec![purchase.clone()]])
        // no existing balance row: the additive update touches nothing
        // and the insert takes over
        .append_query_results([vec![balance]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let service = single_attempt_service(conn);
    let result = service.purchase(user_id, &request_fixture(50)).await;

    assert_eq!(result.expect("purchase should complete").quantity, 50);
}

#[tokio::test]
async fn insufficient_inventory_fails_before_any_write() {
    let user_id = Uuid::new_v4();
    let project = project_fixture(5);

    // Only the project read is queued: the operation must not reach
    // any exec statement
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project]])
        .into_connection();

    let service = single_attempt_service(conn);
    let result = service.purchase(user_id, &request_fixture(10)).await;

    match result {
        Err(LedgerError::InsufficientInventory {
            requested,
            available,
        }) => {
            assert_eq!(requested, 10);
            assert_eq!(available, 5);
        }
        other => panic!("expected InsufficientInventory, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_project_fails_with_not_found() {
    let user_id = Uuid::new_v4();

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<offset_projects::Model>::new()])
        .into_connection();

    let service = single_attempt_service(conn);
    let result = service.purchase(user_id, &request_fixture(10)).await;

    assert!(matches!(result, Err(LedgerError::NotFound(_))));
}

#[tokio::test]
async fn non_positive_quantity_is_rejected_without_touching_the_store() {
    let user_id = Uuid::new_v4();

    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let service = single_attempt_service(conn);
    let result = service.purchase(user_id, &request_fixture(0)).await;

    assert!(matches!(result, Err(LedgerError::InvalidRequest(_))));
}

#[tokio::test]
async fn lost_decrement_race_surfaces_consistency_conflict() {
    let user_id = Uuid::new_v4();
    let project = project_fixture(10);

    // The read passes the inventory check, but a concurrent purchase
    // drains the credits before the conditional decrement lands
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let service = single_attempt_service(conn);
    let result = service.purchase(user_id, &request_fixture(10)).await;

    assert!(matches!(result, Err(LedgerError::ConsistencyConflict)));
}

#[tokio::test]
async fn idempotent_replay_returns_existing_purchase() {
    let user_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let key = "retry-7c2f".to_string();
    let existing = purchase_fixture(user_id, project_id, 50, Some(key.clone()));

    // The replay lookup matches before any project read or write
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing.clone()]])
        .into_connection();

    let service = single_attempt_service(conn);
    let request = PurchaseRequest {
        idempotency_key: Some(key),
        ..request_fixture(50)
    };
    let result = service.purchase(user_id, &request).await;

    let replayed = result.expect("replay should succeed");
    assert_eq!(replayed.id, existing.id);
    assert_eq!(replayed.quantity, 50);
}
