use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{info, instrument};

use models::{badge, social_media, user, user_badge, user_social_media};
use crate::errors::ServiceError;

async fn ensure_user(db: &DatabaseConnection, user_id: i32) -> Result<(), ServiceError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("user"))
}

/// Award a badge by name, creating the badge kind on first use.
/// Awarding the same badge twice is a no-op.
#[instrument(skip(db))]
pub async fn award_badge(db: &DatabaseConnection, user_id: i32, badge_name: &str) -> Result<badge::Model, ServiceError> {
    ensure_user(db, user_id).await?;
    let b = badge::find_or_create(db, badge_name).await?;
    user_badge::award(db, user_id, b.id).await?;
    info!(event = "badge_awarded", user_id, badge = %b.badge);
    Ok(b)
}

/// Badge names held by a user, alphabetically.
pub async fn list_badges(db: &DatabaseConnection, user_id: i32) -> Result<Vec<String>, ServiceError> {
    let rows = user_badge::Entity::find()
        .filter(user_badge::Column::UserId.eq(user_id))
        .find_also_related(badge::Entity)
        .all(db)
        .await?;
    let mut names: Vec<String> = rows.into_iter().filter_map(|(_, b)| b.map(|b| b.badge)).collect();
    names.sort();
    Ok(names)
}

/// Set the user's handle on a platform, replacing any previous one.
#[instrument(skip(db))]
pub async fn set_social_handle(
    db: &DatabaseConnection,
    user_id: i32,
    platform: &str,
    handle: &str,
) -> Result<user_social_media::Model, ServiceError> {
    ensure_user(db, user_id).await?;
    let p = social_media::find_or_create(db, platform).await?;
    let saved = user_social_media::upsert_handle(db, user_id, p.id, handle).await?;
    info!(event = "social_handle_set", user_id, platform = %p.name);
    Ok(saved)
}

/// `(platform, handle)` pairs for a user, ordered by platform name.
pub async fn list_social_handles(db: &DatabaseConnection, user_id: i32) -> Result<Vec<(String, String)>, ServiceError> {
    let rows = user_social_media::Entity::find()
        .filter(user_social_media::Column::UserId.eq(user_id))
        .order_by_asc(user_social_media::Column::Id)
        .find_also_related(social_media::Entity)
        .all(db)
        .await?;
    let mut pairs: Vec<(String, String)> =
        rows.into_iter().filter_map(|(h, p)| p.map(|p| (p.name, h.handle))).collect();
    pairs.sort();
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::user::{AccountKind, NewUser};

    async fn seed_user(db: &DatabaseConnection) -> anyhow::Result<i32> {
        let u = user::create(
            db,
            NewUser {
                kind: AccountKind::User,
                username: "gina".into(),
                password_hash: "x".into(),
                display_name: "Gina".into(),
                phone: None,
                email: "gina@example.com".into(),
            },
        )
        .await?;
        Ok(u.id)
    }

    #[tokio::test]
    async fn badges_are_idempotent_and_sorted() -> anyhow::Result<()> {
        let db = get_db().await?;
        let uid = seed_user(&db).await?;

        award_badge(&db, uid, "Top Commenter").await?;
        award_badge(&db, uid, "Early Adopter").await?;
        award_badge(&db, uid, "Top Commenter").await?;
        assert_eq!(list_badges(&db, uid).await?, vec!["Early Adopter".to_string(), "Top Commenter".to_string()]);

        let err = award_badge(&db, uid + 1, "Ghost").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn social_handles_upsert_per_platform() -> anyhow::Result<()> {
        let db = get_db().await?;
        let uid = seed_user(&db).await?;

        set_social_handle(&db, uid, "Twitter", "@gina").await?;
        set_social_handle(&db, uid, "GitHub", "gina-dev").await?;
        set_social_handle(&db, uid, "Twitter", "@gina_b").await?;
        assert_eq!(
            list_social_handles(&db, uid).await?,
            vec![("GitHub".to_string(), "gina-dev".to_string()), ("Twitter".to_string(), "@gina_b".to_string())]
        );
        assert!(set_social_handle(&db, uid, "Twitter", "  ").await.is_err());
        Ok(())
    }
}
