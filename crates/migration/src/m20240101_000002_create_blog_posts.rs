//! Create `blog_posts` table with FK to the authoring admin in `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(pk_auto(BlogPosts::Id))
                    .col(timestamp_with_time_zone(BlogPosts::PostDate).not_null())
                    .col(string_len(BlogPosts::Title, 255).not_null())
                    .col(text(BlogPosts::Content).not_null())
                    .col(boolean(BlogPosts::IsVisible).not_null().default(false))
                    .col(integer(BlogPosts::AuthorId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_author")
                            .from(BlogPosts::Table, BlogPosts::AuthorId)
                            .to(Users::Table, Users::Id)
                            // an author with posts cannot disappear underneath them
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BlogPosts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BlogPosts { Table, Id, PostDate, Title, Content, IsVisible, AuthorId }

#[derive(DeriveIden)]
enum Users { Table, Id }
