// Emission record database operations

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::db::error::DbError;
use crate::entity::{emissions, prelude::Emissions};
use crate::models::PaginationParams;

#[derive(Debug, FromQueryResult)]
struct Co2eTotal {
    total: Option<Decimal>,
}

/// Repository for emission record database operations
pub struct EmissionRepository {
    conn: DatabaseConnection,
}

impl EmissionRepository {
    /// Creates a new emission repository with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        EmissionRepository { conn }
    }

    /// Inserts one emission record; rows are immutable after this
    pub async fn insert(
        &self,
        record: emissions::ActiveModel,
    ) -> Result<emissions::Model, DbError> {
        record.insert(&self.conn).await.map_err(Into::into)
    }

    /// Retrieves a user's emissions ordered by date descending, optionally
    /// filtered by emission type, with an exact total count for pagination
    pub async fn find_history(
        &self,
        user_id: Uuid,
        emission_type: Option<&str>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<emissions::Model>, u64), DbError> {
        let mut query = Emissions::find().filter(emissions::Column::UserId.eq(user_id));

        if let Some(emission_type) = emission_type {
            query = query.filter(emissions::Column::EmissionType.eq(emission_type));
        }

        let total = query.clone().count(&self.conn).await?;

        let offset = (pagination.page.max(1) - 1) * pagination.limit;
        let records = query
            .order_by_desc(emissions::Column::Date)
            .order_by_desc(emissions::Column::CreatedAt)
            .limit(pagination.limit)
            .offset(offset)
            .all(&self.conn)
            .await?;

        Ok((records, total))
    }

    /// Sums the CO2e mass a user has logged across all emission records
    pub async fn total_emissions_kg(&self, user_id: Uuid) -> Result<Decimal, DbError> {
        let row = Emissions::find()
            .select_only()
            .column_as(emissions::Column::Co2eKg.sum(), "total")
            .filter(emissions::Column::UserId.eq(user_id))
            .into_model::<Co2eTotal>()
            .one(&self.conn)
            .await?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }
}
