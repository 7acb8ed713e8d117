use sea_orm::Database;
use sea_orm_migration::prelude::*;
use std::error::Error;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::migration;

/// Execute the migrate command
pub async fn execute(steps: Option<u32>) -> Result<(), Box<dyn Error>> {
    // Load configuration
    let config = DatabaseConfig::from_env()?;

    info!("Connecting to database: {}", config.url);

    // Connect to the database
    let connection = match Database::connect(&config.url).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(Box::new(e));
        }
    };

    info!("Running migrations...");

    // Log migration files to be applied
    let all_migrations = migration::Migrator::get_migration_files();
    info!("Found {} migration files", all_migrations.len());
    for m in &all_migrations {
        info!("Migration file: {}", m.name());
    }

    // Run migrations
    match steps {
        Some(n) => {
            info!("Running {} migrations", n);
            match migration::Migrator::up(&connection, Some(n)).await {
                Ok(_) => {
                    info!("Successfully ran {} migrations", n);
                    Ok(())
                }
                Err(e) => {
                    error!("Failed to run migrations: {}", e);
                    Err(Box::new(e))
                }
            }
        }
        None => {
            info!("Running all pending migrations");
            match migration::Migrator::up(&connection, None).await {
                Ok(_) => {
                    info!("Successfully ran all migrations");
                    Ok(())
                }
                Err(e) => {
                    error!("Failed to run migrations: {}", e);
                    Err(Box::new(e))
                }
            }
        }
    }
}

/// Drop everything and re-run all migrations
pub async fn reset() -> Result<(), Box<dyn Error>> {
    let config = DatabaseConfig::from_env()?;

    info!("Connecting to database: {}", config.url);
    let connection = Database::connect(&config.url).await?;

    info!("Resetting database (drop all tables, re-run migrations)");
    match migration::Migrator::fresh(&connection).await {
        Ok(_) => {
            info!("Database reset complete");
            Ok(())
        }
        Err(e) => {
            error!("Failed to reset database: {}", e);
            Err(Box::new(e))
        }
    }
}

/// Report applied and pending migrations
pub async fn status() -> Result<(), Box<dyn Error>> {
    let config = DatabaseConfig::from_env()?;

    info!("Connecting to database: {}", config.url);
    let connection = Database::connect(&config.url).await?;

    let applied = migration::Migrator::get_applied_migrations(&connection).await?;
    info!("Applied migrations: {}", applied.len());
    for m in &applied {
        info!("  [applied] {}", m.name());
    }

    let pending = migration::Migrator::get_pending_migrations(&connection).await?;
    info!("Pending migrations: {}", pending.len());
    for m in &pending {
        info!("  [pending] {}", m.name());
    }

    Ok(())
}
