// Offset ledger service - the transactional core of the carbon ledger
//
// A purchase is one state transition across three tables: insert into
// offset_purchases, decrement offset_projects.available_credits, and
// upsert user_offset_balances. All three run inside a single database
// transaction; the decrement is conditional on remaining inventory and
// the balance update is additive, so concurrent purchases can never
// drive available_credits negative or leave a half-applied ledger entry.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use uuid::Uuid;

use crate::db::DbError;
use crate::error::{LedgerError, LedgerResult};
use crate::handlers::AppState;
use crate::models::{
    BalanceData, BalanceResponse, MarketplaceQuery, MarketplaceResponse, PaginationMeta,
    PurchaseRequest,
};
use crate::entity::{offset_projects, offset_purchases, user_offset_balances};

/// Status written for purchases applied by the ledger transaction
pub const STATUS_COMPLETED: &str = "completed";

fn store_err(err: sea_orm::DbErr) -> LedgerError {
    DbError::from(err).into()
}

/// Executes offset purchases as atomic ledger transitions
pub struct OffsetLedgerService {
    conn: DatabaseConnection,
    max_retries: u32,
    base_delay_ms: u64,
    txn_timeout: Duration,
}

impl OffsetLedgerService {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self::with_config(conn, 3, 100, Duration::from_secs(10))
    }

    pub fn with_config(
        conn: DatabaseConnection,
        max_retries: u32,
        base_delay_ms: u64,
        txn_timeout: Duration,
    ) -> Self {
        Self {
            conn,
            max_retries,
            base_delay_ms,
            txn_timeout,
        }
    }

    /// Purchases offset credits for a user.
    ///
    /// Validation failures are terminal. Conflicts with concurrent
    /// purchases and transient store failures are retried with
    /// exponential backoff, re-running the whole transaction from the
    /// inventory re-check; the caller never sees a partial application.
    pub async fn purchase(
        &self,
        user_id: Uuid,
        request: &PurchaseRequest,
    ) -> LedgerResult<offset_purchases::Model> {
        if request.quantity <= 0 {
            return Err(LedgerError::InvalidRequest(
                "quantity must be a positive integer".to_string(),
            ));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;

            let outcome = match timeout(self.txn_timeout, self.apply_purchase(user_id, request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(LedgerError::StoreUnavailable(
                    "ledger transaction timed out".to_string(),
                )),
            };

            match outcome {
                Ok(purchase) => {
                    if attempt > 1 {
                        tracing::info!(
                            user_id = %user_id,
                            project = %request.project_id,
                            "purchase succeeded after {} attempts",
                            attempt
                        );
                    }
                    return Ok(purchase);
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_delay_ms * 2u64.pow(attempt.saturating_sub(1));
                    tracing::warn!(
                        user_id = %user_id,
                        project = %request.project_id,
                        "purchase attempt {}/{} failed: {}. Retrying in {}ms",
                        attempt,
                        self.max_retries,
                        err,
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Runs one purchase attempt inside a transaction; any failure rolls
    /// the whole transition back
    async fn apply_purchase(
        &self,
        user_id: Uuid,
        request: &PurchaseRequest,
    ) -> LedgerResult<offset_purchases::Model> {
        let txn = self.conn.begin().await.map_err(store_err)?;

        match self.apply_purchase_in(&txn, user_id, request).await {
            Ok(purchase) => {
                txn.commit().await.map_err(store_err)?;
                Ok(purchase)
            }
            Err(err) => {
                // Rollback failures are secondary to the original error
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!("purchase rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn apply_purchase_in(
        &self,
        txn: &DatabaseTransaction,
        user_id: Uuid,
        request: &PurchaseRequest,
    ) -> LedgerResult<offset_purchases::Model> {
        // Replay of a retried purchase must not double-apply
        if let Some(key) = &request.idempotency_key {
            let existing = offset_purchases::Entity::find()
                .filter(offset_purchases::Column::IdempotencyKey.eq(key.clone()))
                .one(txn)
                .await
                .map_err(store_err)?;
            if let Some(purchase) = existing {
                tracing::info!(
                    idempotency_key = %key,
                    "returning existing purchase for replayed request"
                );
                return Ok(purchase);
            }
        }

        let project = offset_projects::Entity::find()
            .filter(offset_projects::Column::ProjectId.eq(request.project_id.as_str()))
            .filter(offset_projects::Column::IsActive.eq(true))
            .one(txn)
            .await
            .map_err(store_err)?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("project {} not found", request.project_id))
            })?;

        if project.available_credits < request.quantity {
            return Err(LedgerError::InsufficientInventory {
                requested: request.quantity,
                available: project.available_credits,
            });
        }

        // Conditional decrement: only succeeds while enough credits remain,
        // closing the check-then-act race between concurrent purchases
        let decremented = offset_projects::Entity::update_many()
            .col_expr(
                offset_projects::Column::AvailableCredits,
                Expr::col(offset_projects::Column::AvailableCredits).sub(request.quantity),
            )
            .col_expr(
                offset_projects::Column::UpdatedAt,
                Expr::current_timestamp().into(),
            )
            .filter(offset_projects::Column::Id.eq(project.id))
            .filter(offset_projects::Column::AvailableCredits.gte(request.quantity))
            .exec(txn)
            .await
            .map_err(store_err)?;

        if decremented.rows_affected == 0 {
            // Inventory moved under us after the read above
            return Err(LedgerError::ConsistencyConflict);
        }

        let purchase = offset_purchases::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            project_id: Set(project.id),
            quantity: Set(request.quantity),
            total_co2e_kg: Set(request.total_co2e_kg),
            total_hbar_cost: Set(request.total_hbar_cost),
            status: Set(STATUS_COMPLETED.to_string()),
            idempotency_key: Set(request.idempotency_key.clone()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(txn)
        .await
        .map_err(store_err)?;

        self.credit_balance(txn, user_id, project.id, request)
            .await?;

        Ok(purchase)
    }

    /// Adds the purchased quantity and mass to the user's balance row for
    /// this project, inserting the row on first purchase.
    ///
    /// The update is additive in SQL rather than read-modify-write, and
    /// the unique (user_id, project_id) index turns a concurrent first
    /// purchase into a conflict that the caller retries.
    async fn credit_balance(
        &self,
        txn: &DatabaseTransaction,
        user_id: Uuid,
        project_id: Uuid,
        request: &PurchaseRequest,
    ) -> LedgerResult<()> {
        let updated = user_offset_balances::Entity::update_many()
            .col_expr(
                user_offset_balances::Column::TokenBalance,
                Expr::col(user_offset_balances::Column::TokenBalance).add(request.quantity),
            )
            .col_expr(
                user_offset_balances::Column::TotalKgCo2e,
                Expr::col(user_offset_balances::Column::TotalKgCo2e).add(request.total_co2e_kg),
            )
            .col_expr(
                user_offset_balances::Column::LastUpdated,
                Expr::current_timestamp().into(),
            )
            .filter(user_offset_balances::Column::UserId.eq(user_id))
            .filter(user_offset_balances::Column::ProjectId.eq(project_id))
            .exec(txn)
            .await
            .map_err(store_err)?;

        if updated.rows_affected > 0 {
            return Ok(());
        }

        // First purchase for this (user, project) pair
        user_offset_balances::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            project_id: Set(project_id),
            token_balance: Set(request.quantity),
            total_kg_co2e: Set(request.total_co2e_kg),
            last_updated: Set(chrono::Utc::now()),
        }
        .insert(txn)
        .await
        .map(|_| ())
        .map_err(store_err)
    }
}

/// Get active marketplace projects, optionally filtered by type
pub async fn get_marketplace(
    state: &AppState,
    query: &MarketplaceQuery,
) -> LedgerResult<MarketplaceResponse> {
    let pagination = query.pagination();
    let (projects, total) = state
        .repositories
        .project
        .find_marketplace(query.project_type.as_deref(), &pagination)
        .await?;

    Ok(MarketplaceResponse {
        projects: projects.into_iter().map(Into::into).collect(),
        pagination: PaginationMeta::new(total, &pagination),
    })
}

/// Get all offset balances for a user, joined with project details
pub async fn get_balance(state: &AppState, user_id: Uuid) -> LedgerResult<BalanceResponse> {
    let rows = state.repositories.balance.find_by_user(user_id).await?;

    let balances = rows
        .into_iter()
        .filter_map(|(balance, project)| project.map(|p| BalanceData::from_join(balance, p)))
        .collect();

    Ok(BalanceResponse { balances })
}
