//! SeaORM Entity for the offset_projects table

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offset_projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// External project code shown to clients, e.g. "VCS-1234"
    #[sea_orm(column_type = "Text", unique)]
    pub project_id: String,

    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub project_type: String,

    pub cost_per_kg: Decimal,

    /// Never negative; decremented only by completed purchases
    pub available_credits: i32,

    #[sea_orm(column_type = "Text")]
    pub verification_standard: String,
    pub is_active: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::offset_purchases::Entity")]
    OffsetPurchases,
    #[sea_orm(has_many = "super::user_offset_balances::Entity")]
    UserOffsetBalances,
}

impl Related<super::offset_purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OffsetPurchases.def()
    }
}

impl Related<super::user_offset_balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserOffsetBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
