// Footprint summary business logic

use uuid::Uuid;

use crate::error::LedgerResult;
use crate::handlers::AppState;
use crate::models::SummaryResponse;

/// Get a user's total logged emissions, total purchased offsets, and
/// the net footprint (emissions minus offsets)
pub async fn get_summary(state: &AppState, user_id: Uuid) -> LedgerResult<SummaryResponse> {
    let total_emissions_kg = state
        .repositories
        .emission
        .total_emissions_kg(user_id)
        .await?;
    let total_offset_kg = state.repositories.balance.total_offset_kg(user_id).await?;

    Ok(SummaryResponse {
        total_emissions_kg,
        total_offset_kg,
        net_footprint_kg: total_emissions_kg - total_offset_kg,
    })
}
