//! Create `users` table.
//!
//! Regular users and admins share this table; the `type` column is the
//! discriminator. `id` is a database identity column.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Kind, 16).not_null().default("user"))
                    .col(string_len(Users::Username, 64).unique_key().not_null())
                    .col(string_len(Users::PasswordHash, 255).not_null())
                    .col(string_len(Users::DisplayName, 128).not_null())
                    .col(string_len_null(Users::Phone, 32).unique_key())
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(integer(Users::ReputationScore).not_null().default(0))
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    #[sea_orm(iden = "type")]
    Kind,
    Username,
    PasswordHash,
    DisplayName,
    Phone,
    Email,
    ReputationScore,
    CreatedAt,
}
