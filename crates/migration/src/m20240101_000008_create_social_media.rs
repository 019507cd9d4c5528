//! Create `social_media_master` (platforms such as Twitter or LinkedIn) and
//! `user_social_media` (a user's handle on one platform).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocialMediaMaster::Table)
                    .if_not_exists()
                    .col(pk_auto(SocialMediaMaster::Id))
                    .col(string_len(SocialMediaMaster::Name, 64).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSocialMedia::Table)
                    .if_not_exists()
                    .col(pk_auto(UserSocialMedia::Id))
                    .col(string_len(UserSocialMedia::Handle, 255).not_null())
                    .col(integer(UserSocialMedia::SocialMediaId).not_null())
                    .col(integer(UserSocialMedia::UserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_social_media_platform")
                            .from(UserSocialMedia::Table, UserSocialMedia::SocialMediaId)
                            .to(SocialMediaMaster::Table, SocialMediaMaster::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_social_media_user")
                            .from(UserSocialMedia::Table, UserSocialMedia::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserSocialMedia::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(SocialMediaMaster::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SocialMediaMaster { Table, Id, Name }

#[derive(DeriveIden)]
enum UserSocialMedia { Table, Id, Handle, SocialMediaId, UserId }

#[derive(DeriveIden)]
enum Users { Table, Id }
