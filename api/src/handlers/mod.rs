// Handlers Module
// This module contains the API endpoint handlers

mod auth;
mod emissions;
mod health;
mod offsets;
mod summary;

pub use auth::AuthUser;
pub use emissions::{estimate_co2e, get_categories, get_history, log_emission};
pub use health::health_check;
pub use offsets::{get_balance, get_marketplace, purchase_offset};
pub use summary::get_summary;

use std::sync::Arc;

use crate::db::Repositories;
use crate::services::estimator::EmissionEstimator;
use crate::services::offset_service::OffsetLedgerService;

/// Shared application context handed to every handler
pub struct AppContext {
    pub repositories: Repositories,
    pub ledger: OffsetLedgerService,
    pub estimator: Arc<dyn EmissionEstimator>,
}

// Type alias for the application state
pub type AppState = Arc<AppContext>;
