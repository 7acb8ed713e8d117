// Database repository management

mod balance_repository;
mod emission_repository;
mod project_repository;

pub use balance_repository::BalanceRepository;
pub use emission_repository::EmissionRepository;
pub use project_repository::ProjectRepository;

use sea_orm::DatabaseConnection;

/// Container for all database repositories
pub struct Repositories {
    pub project: ProjectRepository,
    pub balance: BalanceRepository,
    pub emission: EmissionRepository,
}

impl Repositories {
    /// Creates a new repositories container with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Repositories {
            project: ProjectRepository::new(conn.clone()),
            balance: BalanceRepository::new(conn.clone()),
            emission: EmissionRepository::new(conn),
        }
    }
}
