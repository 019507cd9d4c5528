//! Create `post_likes` table. One like per (user, post) is enforced by
//! `uniq_post_likes_user_post` in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostLikes::Table)
                    .if_not_exists()
                    .col(pk_auto(PostLikes::Id))
                    .col(integer(PostLikes::UserId).not_null())
                    .col(integer(PostLikes::BlogPostId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_likes_user")
                            .from(PostLikes::Table, PostLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_likes_blog_post")
                            .from(PostLikes::Table, PostLikes::BlogPostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostLikes::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostLikes { Table, Id, UserId, BlogPostId }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum BlogPosts { Table, Id }
