//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_blog_posts;
mod m20240101_000003_create_comments;
mod m20240101_000004_create_post_likes;
mod m20240101_000005_create_tags;
mod m20240101_000006_create_external_references;
mod m20240101_000007_create_badges;
mod m20240101_000008_create_social_media;
mod m20240101_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_blog_posts::Migration),
            Box::new(m20240101_000003_create_comments::Migration),
            Box::new(m20240101_000004_create_post_likes::Migration),
            Box::new(m20240101_000005_create_tags::Migration),
            Box::new(m20240101_000006_create_external_references::Migration),
            Box::new(m20240101_000007_create_badges::Migration),
            Box::new(m20240101_000008_create_social_media::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000009_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn up_and_down_on_sqlite() -> Result<(), DbErr> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await?;

        Migrator::up(&db, None).await?;
        let manager = SchemaManager::new(&db);
        for table in ["users", "blog_posts", "comments", "post_likes", "tags", "external_references", "badge_master", "user_badges", "social_media_master", "user_social_media"] {
            assert!(manager.has_table(table).await?, "missing table {table}");
        }

        Migrator::down(&db, None).await?;
        assert!(!manager.has_table("users").await?);
        Ok(())
    }
}
