// User offset balance database operations

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::db::error::DbError;
use crate::entity::{offset_projects, prelude::UserOffsetBalances, user_offset_balances};

#[derive(Debug, FromQueryResult)]
struct Co2eTotal {
    total: Option<Decimal>,
}

/// Repository for user offset balance database operations
pub struct BalanceRepository {
    conn: DatabaseConnection,
}

impl BalanceRepository {
    /// Creates a new balance repository with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        BalanceRepository { conn }
    }

    /// Retrieves all balance rows for a user joined with their projects
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(user_offset_balances::Model, Option<offset_projects::Model>)>, DbError> {
        UserOffsetBalances::find()
            .filter(user_offset_balances::Column::UserId.eq(user_id))
            .find_also_related(offset_projects::Entity)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Sums the offset mass accumulated by a user across all projects
    pub async fn total_offset_kg(&self, user_id: Uuid) -> Result<Decimal, DbError> {
        let row = user_offset_balances::Entity::find()
            .select_only()
            .column_as(user_offset_balances::Column::TotalKgCo2e.sum(), "total")
            .filter(user_offset_balances::Column::UserId.eq(user_id))
            .into_model::<Co2eTotal>()
            .one(&self.conn)
            .await?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }
}
