use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250802_000001_add_idempotency_to_purchases"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Add idempotency_key for at-most-once replay of retried purchases
        manager
            .alter_table(
                Table::alter()
                    .table(OffsetPurchases::Table)
                    .add_column(
                        ColumnDef::new(OffsetPurchases::IdempotencyKey)
                            .text()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_offset_purchases_idempotency_key")
                    .table(OffsetPurchases::Table)
                    .col(OffsetPurchases::IdempotencyKey)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_offset_purchases_idempotency_key")
                    .table(OffsetPurchases::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(OffsetPurchases::Table)
                    .drop_column(OffsetPurchases::IdempotencyKey)
                    .to_owned(),
            )
            .await
    }
}

/// Offset purchases table definition
#[derive(Iden)]
enum OffsetPurchases {
    Table,
    IdempotencyKey,
}
