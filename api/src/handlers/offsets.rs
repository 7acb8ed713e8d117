// Handlers for offset marketplace, purchase, and balance endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::LedgerResult;
use crate::handlers::{AppState, AuthUser};
use crate::models::{
    BalanceResponse, MarketplaceQuery, MarketplaceResponse, PurchaseData, PurchaseRequest,
};
use crate::services::offset_service;

/// GET /offsets/marketplace?page=..&limit=..&type=..
/// Returns active projects ordered by name
pub async fn get_marketplace(
    State(state): State<AppState>,
    Query(params): Query<MarketplaceQuery>,
) -> LedgerResult<Json<MarketplaceResponse>> {
    let response = offset_service::get_marketplace(&state, &params).await?;
    Ok(Json(response))
}

/// POST /offsets/purchase
/// Applies one offset purchase as an atomic ledger transition
pub async fn purchase_offset(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<PurchaseRequest>,
) -> LedgerResult<Json<PurchaseData>> {
    let purchase = state.ledger.purchase(user_id, &request).await?;
    Ok(Json(purchase.into()))
}

/// GET /offsets/balance
/// Returns the caller's balances across all projects
pub async fn get_balance(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> LedgerResult<Json<BalanceResponse>> {
    let response = offset_service::get_balance(&state, user_id).await?;
    Ok(Json(response))
}
