// Emission log business logic

use rust_decimal::Decimal;
use sea_orm::Set;
use uuid::Uuid;

use crate::entity::emissions;
use crate::error::{LedgerError, LedgerResult};
use crate::handlers::AppState;
use crate::models::{
    CategoriesResponse, EmissionData, EmissionTypeInfo, HistoryQuery, HistoryResponse,
    LogEmissionRequest, PaginationMeta,
};

/// Emission types accepted by the log endpoint
pub const EMISSION_TYPES: [&str; 4] = ["travel", "energy", "food", "other"];

/// Records one emission for a user
pub async fn log_emission(
    state: &AppState,
    user_id: Uuid,
    request: LogEmissionRequest,
) -> LedgerResult<EmissionData> {
    if !EMISSION_TYPES.contains(&request.emission_type.as_str()) {
        return Err(LedgerError::InvalidRequest(format!(
            "unknown emission type: {}",
            request.emission_type
        )));
    }
    if request.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidRequest(
            "amount must be positive".to_string(),
        ));
    }
    if request.co2e_kg <= Decimal::ZERO {
        return Err(LedgerError::InvalidRequest(
            "co2eKg must be positive".to_string(),
        ));
    }

    let record = emissions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        emission_type: Set(request.emission_type),
        category: Set(request.category),
        amount: Set(request.amount),
        unit: Set(request.unit),
        co2e_kg: Set(request.co2e_kg),
        date: Set(request.date),
        description: Set(request.description),
        created_at: Set(chrono::Utc::now()),
    };

    let inserted = state.repositories.emission.insert(record).await?;

    Ok(inserted.into())
}

/// Get a user's emission history, newest first
pub async fn get_history(
    state: &AppState,
    user_id: Uuid,
    query: &HistoryQuery,
) -> LedgerResult<HistoryResponse> {
    let pagination = query.pagination();
    let (records, total) = state
        .repositories
        .emission
        .find_history(user_id, query.emission_type.as_deref(), &pagination)
        .await?;

    Ok(HistoryResponse {
        emissions: records.into_iter().map(Into::into).collect(),
        pagination: PaginationMeta::new(total, &pagination),
    })
}

/// Static catalogue of emission types and their categories
pub fn get_categories() -> CategoriesResponse {
    CategoriesResponse {
        types: vec![
            EmissionTypeInfo {
                value: "travel",
                label: "Travel",
                categories: vec!["car", "flight", "train", "bus"],
            },
            EmissionTypeInfo {
                value: "energy",
                label: "Energy",
                categories: vec!["electricity", "gas", "heating"],
            },
            EmissionTypeInfo {
                value: "food",
                label: "Food",
                categories: vec!["meat", "dairy", "produce"],
            },
            EmissionTypeInfo {
                value: "other",
                label: "Other",
                categories: vec!["waste", "shopping", "misc"],
            },
        ],
    }
}
