//! Create `badge_master` (reference list of badge kinds) and
//! `user_badges` (award records linking users to badges).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BadgeMaster::Table)
                    .if_not_exists()
                    .col(pk_auto(BadgeMaster::Id))
                    .col(string_len(BadgeMaster::Badge, 64).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserBadges::Table)
                    .if_not_exists()
                    .col(pk_auto(UserBadges::Id))
                    .col(integer(UserBadges::BadgeId).not_null())
                    .col(integer(UserBadges::UserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_badges_badge")
                            .from(UserBadges::Table, UserBadges::BadgeId)
                            .to(BadgeMaster::Table, BadgeMaster::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_badges_user")
                            .from(UserBadges::Table, UserBadges::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserBadges::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(BadgeMaster::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BadgeMaster { Table, Id, Badge }

#[derive(DeriveIden)]
enum UserBadges { Table, Id, BadgeId, UserId }

#[derive(DeriveIden)]
enum Users { Table, Id }
