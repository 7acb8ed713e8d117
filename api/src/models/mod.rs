// API request/response models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{emissions, offset_projects, offset_purchases, user_offset_balances};

/// Common pagination parameters for API endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        PaginationParams {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

/// Pagination metadata included in list responses
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, params: &PaginationParams) -> Self {
        let limit = params.limit.max(1);
        PaginationMeta {
            total,
            page: params.page,
            limit: params.limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// Query parameters for GET /offsets/marketplace
#[derive(Debug, Deserialize)]
pub struct MarketplaceQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
}

impl MarketplaceQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Request body for POST /offsets/purchase
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// External project code, e.g. "VCS-1234"
    pub project_id: String,
    pub quantity: i32,
    pub total_co2e_kg: Decimal,
    pub total_hbar_cost: Decimal,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Purchase record returned from POST /offsets/purchase
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseData {
    pub id: Uuid,
    pub project_id: Uuid,
    pub quantity: i32,
    pub total_co2e_kg: Decimal,
    pub total_hbar_cost: Decimal,
    pub status: String,
    pub created_at: String,
}

impl From<offset_purchases::Model> for PurchaseData {
    fn from(m: offset_purchases::Model) -> Self {
        PurchaseData {
            id: m.id,
            project_id: m.project_id,
            quantity: m.quantity,
            total_co2e_kg: m.total_co2e_kg,
            total_hbar_cost: m.total_hbar_cost,
            status: m.status,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// Offset project entry in GET /offsets/marketplace responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub project_type: String,
    pub cost_per_kg: Decimal,
    pub available_credits: i32,
    pub verification_standard: String,
}

impl From<offset_projects::Model> for ProjectData {
    fn from(m: offset_projects::Model) -> Self {
        ProjectData {
            project_id: m.project_id,
            name: m.name,
            description: m.description,
            location: m.location,
            project_type: m.project_type,
            cost_per_kg: m.cost_per_kg,
            available_credits: m.available_credits,
            verification_standard: m.verification_standard,
        }
    }
}

/// Response structure for GET /offsets/marketplace
#[derive(Debug, Serialize)]
pub struct MarketplaceResponse {
    pub projects: Vec<ProjectData>,
    pub pagination: PaginationMeta,
}

/// One user balance row joined with its project for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceData {
    pub project_id: String,
    pub project_name: String,
    pub project_type: String,
    pub token_balance: i32,
    pub total_kg_co2e: Decimal,
    pub last_updated: String,
}

impl BalanceData {
    pub fn from_join(
        balance: user_offset_balances::Model,
        project: offset_projects::Model,
    ) -> Self {
        BalanceData {
            project_id: project.project_id,
            project_name: project.name,
            project_type: project.project_type,
            token_balance: balance.token_balance,
            total_kg_co2e: balance.total_kg_co2e,
            last_updated: balance.last_updated.to_rfc3339(),
        }
    }
}

/// Response structure for GET /offsets/balance
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balances: Vec<BalanceData>,
}

/// Request body for POST /emissions/log
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEmissionRequest {
    pub emission_type: String,
    pub category: String,
    pub amount: Decimal,
    pub unit: String,
    pub co2e_kg: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// Emission record in API responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionData {
    pub id: Uuid,
    pub emission_type: String,
    pub category: String,
    pub amount: Decimal,
    pub unit: String,
    pub co2e_kg: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl From<emissions::Model> for EmissionData {
    fn from(m: emissions::Model) -> Self {
        EmissionData {
            id: m.id,
            emission_type: m.emission_type,
            category: m.category,
            amount: m.amount,
            unit: m.unit,
            co2e_kg: m.co2e_kg,
            date: m.date,
            description: m.description,
        }
    }
}

/// Query parameters for GET /emissions/history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(rename = "type")]
    pub emission_type: Option<String>,
}

impl HistoryQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Response structure for GET /emissions/history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub emissions: Vec<EmissionData>,
    pub pagination: PaginationMeta,
}

/// One emission type with its categories, for GET /emissions/categories
#[derive(Debug, Serialize)]
pub struct EmissionTypeInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub categories: Vec<&'static str>,
}

/// Response structure for GET /emissions/categories
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub types: Vec<EmissionTypeInfo>,
}

/// Query parameters for GET /emissions/estimate
#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    pub category: String,
    pub amount: Decimal,
}

/// Response structure for GET /emissions/estimate
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub category: String,
    pub amount: Decimal,
    pub co2e_kg: Decimal,
}

/// Response structure for GET /summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_emissions_kg: Decimal,
    pub total_offset_kg: Decimal,
    pub net_footprint_kg: Decimal,
}
