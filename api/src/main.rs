// Carbon ledger API server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, Router};
use http::{header, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carbon_ledger_api::config::ApiConfig;
use carbon_ledger_api::db::DbPool;
use carbon_ledger_api::handlers::{
    estimate_co2e, get_balance, get_categories, get_history, get_marketplace, get_summary,
    health_check, log_emission, purchase_offset, AppContext,
};
use carbon_ledger_api::services::estimator::StaticFactorEstimator;
use carbon_ledger_api::services::offset_service::OffsetLedgerService;

fn load_env() {
    dotenv::dotenv().ok();
}

#[tokio::main]
async fn main() {
    load_env();
    // Configure logging with tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load API configuration from environment
    let config = ApiConfig::from_env();
    tracing::info!("Configuration loaded");

    // Establish database connection pool
    let db_pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    // Initialize repositories and the ledger service
    let repositories = db_pool.repositories();
    let ledger = OffsetLedgerService::with_config(
        db_pool.get_connection().clone(),
        config.ledger_max_retries,
        config.ledger_retry_base_delay_ms,
        Duration::from_secs(config.ledger_txn_timeout_secs),
    );
    let app_state = Arc::new(AppContext {
        repositories,
        ledger,
        estimator: Arc::new(StaticFactorEstimator::new()),
    });

    // Configure CORS policy
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-user-id"),
        ])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(3600));

    // Set up API routes
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/offsets/marketplace", get(get_marketplace))
        .route("/offsets/purchase", post(purchase_offset))
        .route("/offsets/balance", get(get_balance))
        .route("/emissions/log", post(log_emission))
        .route("/emissions/history", get(get_history))
        .route("/emissions/categories", get(get_categories))
        .route("/emissions/estimate", get(estimate_co2e))
        .route("/summary", get(get_summary))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Parse server address from config
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");

    // Start HTTP server
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
