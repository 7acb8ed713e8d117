// Handlers for emission log endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::LedgerResult;
use crate::handlers::{AppState, AuthUser};
use crate::models::{
    CategoriesResponse, EmissionData, EstimateQuery, EstimateResponse, HistoryQuery,
    HistoryResponse, LogEmissionRequest,
};
use crate::services::emission_service;

/// POST /emissions/log
/// Records one emission for the caller
pub async fn log_emission(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<LogEmissionRequest>,
) -> LedgerResult<Json<EmissionData>> {
    let emission = emission_service::log_emission(&state, user_id, request).await?;
    Ok(Json(emission))
}

/// GET /emissions/history?page=..&limit=..&type=..
/// Returns the caller's emissions, newest first
pub async fn get_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<HistoryQuery>,
) -> LedgerResult<Json<HistoryResponse>> {
    let response = emission_service::get_history(&state, user_id, &params).await?;
    Ok(Json(response))
}

/// GET /emissions/categories
/// Returns the emission type catalogue
pub async fn get_categories() -> Json<CategoriesResponse> {
    Json(emission_service::get_categories())
}

/// GET /emissions/estimate?category=..&amount=..
/// Estimates CO2e mass for an activity without recording anything
pub async fn estimate_co2e(
    State(state): State<AppState>,
    Query(params): Query<EstimateQuery>,
) -> LedgerResult<Json<EstimateResponse>> {
    let co2e_kg = state.estimator.estimate(&params.category, params.amount)?;

    Ok(Json(EstimateResponse {
        category: params.category,
        amount: params.amount,
        co2e_kg,
    }))
}
