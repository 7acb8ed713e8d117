pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_carbon_tables;
mod m20250802_000001_add_idempotency_to_purchases;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_carbon_tables::Migration),
            Box::new(m20250802_000001_add_idempotency_to_purchases::Migration),
        ]
    }
}
