// Handler for the footprint summary endpoint

use axum::{extract::State, Json};

use crate::error::LedgerResult;
use crate::handlers::{AppState, AuthUser};
use crate::models::SummaryResponse;
use crate::services::summary_service;

/// GET /summary
/// Returns the caller's total emissions, total offsets, and net footprint
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> LedgerResult<Json<SummaryResponse>> {
    let response = summary_service::get_summary(&state, user_id).await?;
    Ok(Json(response))
}
