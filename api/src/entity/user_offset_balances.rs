//! SeaORM Entity for the user_offset_balances table
//!
//! One row per (user_id, project_id); both totals are running sums
//! over the user's completed purchases for that project.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_offset_balances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,

    pub token_balance: i32,
    pub total_kg_co2e: Decimal,

    pub last_updated: chrono::DateTime<chrono::Utc>,
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
