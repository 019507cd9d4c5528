use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Posts: listing filters on visibility
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_visible")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::IsVisible)
                    .to_owned(),
            )
            .await?;

        // Comments: loaded per post
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_blog_post")
                    .table(Comments::Table)
                    .col(Comments::BlogPostId)
                    .to_owned(),
            )
            .await?;

        // Tags: loaded per post
        manager
            .create_index(
                Index::create()
                    .name("idx_tags_blog_post")
                    .table(Tags::Table)
                    .col(Tags::BlogPostId)
                    .to_owned(),
            )
            .await?;

        // PostLikes: composite unique (user_id, blog_post_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_post_likes_user_post")
                    .table(PostLikes::Table)
                    .col(PostLikes::UserId)
                    .col(PostLikes::BlogPostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // UserBadges: a badge is awarded to a user at most once
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_badges_user_badge")
                    .table(UserBadges::Table)
                    .col(UserBadges::UserId)
                    .col(UserBadges::BadgeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // UserSocialMedia: one handle per platform per user
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_social_media_user_platform")
                    .table(UserSocialMedia::Table)
                    .col(UserSocialMedia::UserId)
                    .col(UserSocialMedia::SocialMediaId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_blog_posts_visible").table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comments_blog_post").table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tags_blog_post").table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_post_likes_user_post").table(PostLikes::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_user_badges_user_badge").table(UserBadges::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_user_social_media_user_platform")
                    .table(UserSocialMedia::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPosts { Table, IsVisible }

#[derive(DeriveIden)]
enum Comments { Table, BlogPostId }

#[derive(DeriveIden)]
enum Tags { Table, BlogPostId }

#[derive(DeriveIden)]
enum PostLikes { Table, UserId, BlogPostId }

#[derive(DeriveIden)]
enum UserBadges { Table, UserId, BadgeId }

#[derive(DeriveIden)]
enum UserSocialMedia { Table, UserId, SocialMediaId }
