use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250801_000001_create_carbon_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the emissions table
        manager
            .create_table(
                Table::create()
                    .table(Emissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Emissions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Emissions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Emissions::EmissionType).text().not_null())
                    .col(ColumnDef::new(Emissions::Category).text().not_null())
                    .col(
                        ColumnDef::new(Emissions::Amount)
                            .decimal_len(14, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Emissions::Unit).text().not_null())
                    .col(
                        ColumnDef::new(Emissions::Co2eKg)
                            .decimal_len(14, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Emissions::Date).date().not_null())
                    .col(ColumnDef::new(Emissions::Description).text().null())
                    .col(
                        ColumnDef::new(Emissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // History queries filter by user and order by date
        manager
            .create_index(
                Index::create()
                    .name("idx_emissions_user_date")
                    .table(Emissions::Table)
                    .col(Emissions::UserId)
                    .col(Emissions::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create the offset_projects table
        manager
            .create_table(
                Table::create()
                    .table(OffsetProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OffsetProjects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::ProjectId)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(OffsetProjects::Name).text().not_null())
                    .col(
                        ColumnDef::new(OffsetProjects::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OffsetProjects::Location).text().not_null())
                    .col(
                        ColumnDef::new(OffsetProjects::ProjectType)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::CostPerKg)
                            .decimal_len(14, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::AvailableCredits)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(OffsetProjects::AvailableCredits).gte(0)),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::VerificationStandard)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OffsetProjects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Marketplace filters on type over active projects
        manager
            .create_index(
                Index::create()
                    .name("idx_offset_projects_type")
                    .table(OffsetProjects::Table)
                    .col(OffsetProjects::ProjectType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create the offset_purchases table
        manager
            .create_table(
                Table::create()
                    .table(OffsetPurchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OffsetPurchases::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OffsetPurchases::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(OffsetPurchases::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OffsetPurchases::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(OffsetPurchases::Quantity).gt(0)),
                    )
                    .col(
                        ColumnDef::new(OffsetPurchases::TotalCo2eKg)
                            .decimal_len(14, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OffsetPurchases::TotalHbarCost)
                            .decimal_len(14, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OffsetPurchases::Status).text().not_null())
                    .col(
                        ColumnDef::new(OffsetPurchases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offset_purchases_project")
                            .from(OffsetPurchases::Table, OffsetPurchases::ProjectId)
                            .to(OffsetProjects::Table, OffsetProjects::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_offset_purchases_user")
                    .table(OffsetPurchases::Table)
                    .col(OffsetPurchases::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create the user_offset_balances table
        manager
            .create_table(
                Table::create()
                    .table(UserOffsetBalances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserOffsetBalances::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserOffsetBalances::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserOffsetBalances::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserOffsetBalances::TokenBalance)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(UserOffsetBalances::TokenBalance).gte(0)),
                    )
                    .col(
                        ColumnDef::new(UserOffsetBalances::TotalKgCo2e)
                            .decimal_len(14, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserOffsetBalances::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_offset_balances_project")
                            .from(UserOffsetBalances::Table, UserOffsetBalances::ProjectId)
                            .to(OffsetProjects::Table, OffsetProjects::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Upsert semantics: at most one balance row per (user, project)
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_balances_user_project_unique")
                    .table(UserOffsetBalances::Table)
                    .col(UserOffsetBalances::UserId)
                    .col(UserOffsetBalances::ProjectId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserOffsetBalances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OffsetPurchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OffsetProjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Emissions::Table).to_owned())
            .await
    }
}

/// Emissions table definition
#[derive(Iden)]
enum Emissions {
    Table,
    Id,
    UserId,
    EmissionType,
    Category,
    Amount,
    Unit,
    Co2eKg,
    Date,
    Description,
    CreatedAt,
}

/// Offset projects table definition
#[derive(Iden)]
enum OffsetProjects {
    Table,
    Id,
    ProjectId,
    Name,
    Description,
    Location,
    ProjectType,
    CostPerKg,
    AvailableCredits,
    VerificationStandard,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Offset purchases table definition
#[derive(Iden)]
enum OffsetPurchases {
    Table,
    Id,
    UserId,
    ProjectId,
    Quantity,
    TotalCo2eKg,
    TotalHbarCost,
    Status,
    CreatedAt,
}

/// User offset balances table definition
#[derive(Iden)]
enum UserOffsetBalances {
    Table,
    Id,
    UserId,
    ProjectId,
    TokenBalance,
    TotalKgCo2e,
    LastUpdated,
}
