//! Prelude module for convenient imports

pub use super::emissions::Entity as Emissions;
pub use super::offset_projects::Entity as OffsetProjects;
pub use super::offset_purchases::Entity as OffsetPurchases;
pub use super::user_offset_balances::Entity as UserOffsetBalances;
