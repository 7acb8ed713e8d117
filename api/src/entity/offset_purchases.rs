//! SeaORM Entity for the offset_purchases table

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offset_purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,

    pub quantity: i32,
    pub total_co2e_kg: Decimal,
    pub total_hbar_cost: Decimal,

    /// pending | completed | failed
    #[sea_orm(column_type = "Text")]
    pub status: String,

    /// Client-supplied key for at-most-once replay of retried purchases
    #[sea_orm(column_type = "Text", nullable, unique)]
    pub idempotency_key: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offset_projects::Entity",
        from = "Column::ProjectId",
        to = "super::offset_projects::Column::Id"
    )]
    OffsetProjects,
}

impl Related<super::offset_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OffsetProjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
