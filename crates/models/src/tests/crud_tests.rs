use sea_orm::{EntityTrait, PaginatorTrait};

use super::{create_admin, new_user, setup_test_db};
use crate::errors::ModelError;
use crate::user::{self, AccountKind};
use crate::{badge, blog_post, comment, external_reference, post_like, social_media, tag, user_badge, user_social_media};

#[tokio::test]
async fn test_user_create_assigns_distinct_ids() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    let a = user::create(&db, new_user(AccountKind::User, "alice")).await?;
    let b = user::create(&db, new_user(AccountKind::Admin, "bob")).await?;
    assert_ne!(a.id, b.id);
    assert_eq!(a.kind, AccountKind::User);
    assert_eq!(b.kind, AccountKind::Admin);
    assert_eq!(a.reputation_score, 0);

    let found = user::Entity::find_by_id(b.id).one(&db).await?.expect("bob stored");
    assert_eq!(found.username, "bob");
    assert_eq!(found.kind, AccountKind::Admin);
    Ok(())
}

#[tokio::test]
async fn test_user_unique_username_is_reported() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    user::create(&db, new_user(AccountKind::User, "carol")).await?;
    let mut dup = new_user(AccountKind::User, "carol");
    dup.email = "other@example.com".into();
    let err = user::create(&db, dup).await.unwrap_err();
    match err {
        ModelError::UniqueViolation(msg) => assert!(msg.contains("username"), "unexpected message {msg}"),
        other => panic!("expected unique violation, got {other:?}"),
    }
    assert_eq!(user::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    let mut bad = new_user(AccountKind::User, "dave");
    bad.email = "not-an-email".into();
    assert!(matches!(user::create(&db, bad).await, Err(ModelError::Validation(_))));

    let bad = new_user(AccountKind::User, "has space");
    assert!(matches!(user::create(&db, bad).await, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_user_column_widths_are_enforced() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    let mut bad = new_user(AccountKind::User, "fay");
    bad.display_name = "d".repeat(129);
    assert!(matches!(user::create(&db, bad).await, Err(ModelError::Validation(m)) if m.contains("display name")));

    let mut bad = new_user(AccountKind::User, "fay");
    bad.email = format!("{}@example.com", "e".repeat(250));
    assert!(matches!(user::create(&db, bad).await, Err(ModelError::Validation(m)) if m.contains("email")));

    let mut bad = new_user(AccountKind::User, "fay");
    bad.phone = Some("5".repeat(33));
    assert!(matches!(user::create(&db, bad).await, Err(ModelError::Validation(m)) if m.contains("phone")));

    let mut ok = new_user(AccountKind::User, "fay");
    ok.display_name = "d".repeat(128);
    ok.phone = Some("5".repeat(32));
    user::create(&db, ok).await?;
    assert_eq!(user::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_reputation_score() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user(AccountKind::User, "erin")).await?;

    let updated = user::add_reputation_score(&db, u.id, 5).await?.expect("user exists");
    assert_eq!(updated.reputation_score, 5);
    let updated = user::add_reputation_score(&db, u.id, -2).await?.expect("user exists");
    assert_eq!(updated.reputation_score, 3);
    assert!(user::add_reputation_score(&db, 9999, 1).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_post_tags_and_references() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let admin = create_admin(&db, "admin").await?;

    assert!(matches!(blog_post::create(&db, admin.id, "   ", "body", true).await, Err(ModelError::Validation(_))));

    let post = blog_post::create(&db, admin.id, " Hello ", "body", true).await?;
    assert_eq!(post.title, "Hello");

    tag::replace_for_post(&db, post.id, &["rust".into(), "web".into()]).await?;
    tag::replace_for_post(&db, post.id, &["web".into(), "axum".into(), "web".into()]).await?;
    let tags: Vec<String> = tag::list_for_post(&db, post.id).await?.into_iter().map(|t| t.tag).collect();
    assert_eq!(tags, vec!["web".to_string(), "axum".to_string()]);

    assert!(external_reference::create(&db, post.id, "docs", "ftp://nope").await.is_err());
    let r = external_reference::create(&db, post.id, "", "https://docs.rs").await?;
    assert_eq!(r.description, "https://docs.rs");

    let long_url = format!("https://example.com/{}", "a".repeat(400));
    let r = external_reference::create(&db, post.id, "  ", &long_url).await?;
    assert_eq!(r.description.chars().count(), 255);
    assert!(long_url.starts_with(&r.description));
    assert!(matches!(
        external_reference::create(&db, post.id, &"x".repeat(256), "https://docs.rs").await,
        Err(ModelError::Validation(_))
    ));
    let huge_url = format!("https://example.com/{}", "a".repeat(1024));
    assert!(external_reference::create(&db, post.id, "big", &huge_url).await.is_err());
    assert_eq!(external_reference::list_for_post(&db, post.id).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_comments_and_likes() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let admin = create_admin(&db, "admin").await?;
    let reader = user::create(&db, new_user(AccountKind::User, "reader")).await?;
    let post = blog_post::create(&db, admin.id, "Hello", "body", true).await?;

    assert!(comment::create(&db, post.id, reader.id, "  ").await.is_err());
    let c = comment::create(&db, post.id, reader.id, " nice post ").await?;
    assert_eq!(c.content, "nice post");

    post_like::like(&db, reader.id, post.id).await?;
    post_like::like(&db, reader.id, post.id).await?;
    post_like::like(&db, admin.id, post.id).await?;
    assert_eq!(post_like::count_for_post(&db, post.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_badges_and_social_handles() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user(AccountKind::User, "frank")).await?;

    let b1 = badge::find_or_create(&db, "First Comment").await?;
    let b2 = badge::find_or_create(&db, " First Comment ").await?;
    assert_eq!(b1.id, b2.id);
    let a1 = user_badge::award(&db, u.id, b1.id).await?;
    let a2 = user_badge::award(&db, u.id, b1.id).await?;
    assert_eq!(a1.id, a2.id);

    let tw = social_media::find_or_create(&db, "Twitter").await?;
    user_social_media::upsert_handle(&db, u.id, tw.id, "@frank").await?;
    let h = user_social_media::upsert_handle(&db, u.id, tw.id, "@frank2").await?;
    assert_eq!(h.handle, "@frank2");
    assert_eq!(user_social_media::Entity::find().count(&db).await?, 1);
    Ok(())
}
