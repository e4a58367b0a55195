//! Token blocklist migration.
//!
//! Stores the ids of revoked access and refresh tokens.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TokenBlocklist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TokenBlocklist::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TokenBlocklist::Jti)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TokenBlocklist::RevokedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TokenBlocklist::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TokenBlocklist {
    Table,
    Id,
    Jti,
    RevokedAt,
}
