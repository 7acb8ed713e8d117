//! SeaORM Entity for the emissions table

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub emission_type: String,
    #[sea_orm(column_type = "Text")]
    pub category: String,

    pub amount: Decimal,
    #[sea_orm(column_type = "Text")]
    pub unit: String,
    pub co2e_kg: Decimal,

    pub date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
