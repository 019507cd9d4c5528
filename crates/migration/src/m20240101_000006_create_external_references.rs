//! Create `external_references` table (citations attached to a post).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExternalReferences::Table)
                    .if_not_exists()
                    .col(pk_auto(ExternalReferences::Id))
                    .col(string_len(ExternalReferences::Description, 255).not_null())
                    .col(string_len(ExternalReferences::Url, 1024).not_null())
                    .col(integer(ExternalReferences::BlogPostId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_references_blog_post")
                            .from(ExternalReferences::Table, ExternalReferences::BlogPostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExternalReferences::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExternalReferences { Table, Id, Description, Url, BlogPostId }

#[derive(DeriveIden)]
enum BlogPosts { Table, Id }
