use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tower::Service;

use configs::{AppConfig, SessionConfig};
use server::session::SessionKeys;
use service::account::{Identity, Role};

async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.session.secret = "test-secret".into();
    let db = models::db::connect_with_config(&cfg.database).await?;
    let app = server::startup::build_app(db.clone(), &cfg).await?;
    Ok((app, db))
}

fn get(uri: &str, cookie: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    Ok(b.body(Body::empty())?)
}

fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    Ok(b.body(Body::from(form.to_string()))?)
}

/// `blog_session=<token>` from a Set-Cookie header, ready to send back.
fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("blog_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn body_text(resp: Response<Body>) -> anyhow::Result<String> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

async fn login(app: &Router, username: &str, password: &str) -> anyhow::Result<String> {
    let form = format!("username={username}&password={password}");
    let resp = app.clone().call(post_form("/login/", &form, None)?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    Ok(session_cookie(&resp).expect("login sets session cookie"))
}

async fn register(app: &Router, username: &str) -> anyhow::Result<Response<Body>> {
    let form = format!("username={username}&password=pw123&display_name={username}&email={username}%40example.com");
    Ok(app.clone().call(post_form("/register/", &form, None)?).await?)
}

/// Create a post as admin and return its id.
async fn create_post(app: &Router, admin: &str, title: &str, visible: bool) -> anyhow::Result<i32> {
    let mut form = format!("title={title}&content={title}+content&tags=rust%2C+web");
    if visible {
        form.push_str("&is_visible=on");
    }
    let resp = app.clone().call(post_form("/posts/", &form, Some(admin))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let loc = location(&resp);
    Ok(loc.trim_start_matches("/posts/").parse()?)
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let resp = app.clone().call(get("/health", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(resp).await?)?;
    assert_eq!(json["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;

    let first = register(&app, "alice").await?;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert!(session_cookie(&first).is_some(), "registration logs the user in");

    let second = register(&app, "alice").await?;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert!(body_text(second).await?.contains("username already exists"));

    let alices = models::user::Entity::find()
        .filter(models::user::Column::Username.eq("alice"))
        .count(&db)
        .await?;
    assert_eq!(alices, 1);

    let form = "username=bob&password=pw&display_name=+&email=bob%40example.com";
    let resp = app.clone().call(post_form("/register/", form, None)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await?.contains("display name"));
    Ok(())
}

#[tokio::test]
async fn test_login_failure_shows_form() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let resp = app.clone().call(post_form("/login/", "username=admin&password=wrong", None)?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&resp).is_none());
    assert!(body_text(resp).await?.contains("Invalid credentials."));
    Ok(())
}

#[tokio::test]
async fn test_visibility_of_posts() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, "admin", "password").await?;

    let hello = create_post(&app, &admin, "Hello", true).await?;
    let draft = create_post(&app, &admin, "Draft", false).await?;

    let resp = app.clone().call(get(&format!("/posts/{hello}"), None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await?;
    assert!(html.contains("Hello content"));
    assert!(html.contains("rust"));

    let resp = app.clone().call(get(&format!("/posts/{draft}"), None)?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.clone().call(get(&format!("/posts/{draft}"), Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await?.contains("only visible to admins"));

    let index = body_text(app.clone().call(get("/", None)?).await?).await?;
    assert!(index.contains("Hello"));
    assert!(!index.contains("Draft"));
    let index = body_text(app.clone().call(get("/index/", Some(&admin))?).await?).await?;
    assert!(index.contains("Draft"));
    Ok(())
}

#[tokio::test]
async fn test_admin_actions_are_guarded() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, "admin", "password").await?;
    let id = create_post(&app, &admin, "Hello", true).await?;

    let resp = app.clone().call(get("/posts/", None)?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");

    let reader = register(&app, "reader").await?;
    let reader = session_cookie(&reader).expect("session");

    let resp = app.clone().call(get("/posts/", Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = app.clone().call(post_form("/posts/", "title=Nope&content=x", Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = app.clone().call(get(&format!("/deletepost/{id}/"), Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = app.clone().call(post_form(&format!("/editpost/{id}/"), "title=Hijack&content=x", Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app.clone().call(get(&format!("/posts/{id}"), None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_edit_and_delete_post() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, "admin", "password").await?;
    let id = create_post(&app, &admin, "Draft", false).await?;

    let resp = app
        .clone()
        .call(post_form(&format!("/editpost/{id}/"), "title=Published&content=Now+public&tags=&is_visible=on", Some(&admin))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await?.contains("Post Updated Successfully."));

    let resp = app.clone().call(get(&format!("/posts/{id}"), None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await?.contains("Now public"));

    let resp = app.clone().call(post_form("/editpost/999/", "title=Ghost&content=x", Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.clone().call(get(&format!("/deletepost/{id}/"), Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let resp = app.clone().call(get(&format!("/posts/{id}"), Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_comments_and_likes() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    let admin = login(&app, "admin", "password").await?;
    let shown = create_post(&app, &admin, "Hello", true).await?;
    let hidden = create_post(&app, &admin, "Draft", false).await?;

    let resp = app.clone().call(post_form(&format!("/posts/{shown}/comments/"), "comment=hi", None)?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");

    let reader = register(&app, "reader").await?;
    let reader = session_cookie(&reader).expect("session");

    let resp = app.clone().call(post_form(&format!("/posts/{shown}/comments/"), "comment=Great+post", Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{shown}"));

    let resp = app.clone().call(post_form(&format!("/posts/{hidden}/comments/"), "comment=sneaky", Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = app.clone().call(post_form("/posts/999/comments/", "comment=lost", Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(models::comment::Entity::find().count(&db).await?, 1);

    for _ in 0..2 {
        let resp = app.clone().call(post_form(&format!("/posts/{shown}/likes/"), "", Some(&reader))?).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
    let html = body_text(app.clone().call(get(&format!("/posts/{shown}"), None)?).await?).await?;
    assert!(html.contains("Great post"));
    assert!(html.contains("1 like(s)"));
    Ok(())
}

#[tokio::test]
async fn test_stale_session_is_cleared() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    let resp = register(&app, "ghost").await?;
    let cookie = session_cookie(&resp).expect("session");

    let ghost = models::user::Entity::find()
        .filter(models::user::Column::Username.eq("ghost"))
        .one(&db)
        .await?
        .expect("ghost registered");
    models::user::Entity::delete_by_id(ghost.id).exec(&db).await?;

    let resp = app.clone().call(get("/index/", Some(&cookie))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = session_cookie(&resp).expect("cookie is cleared");
    assert_eq!(cleared, "blog_session=");
    assert!(body_text(resp).await?.contains(r#"href="/login/""#));
    Ok(())
}

#[tokio::test]
async fn test_profile_page() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    let resp = register(&app, "gina").await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let gina = models::user::Entity::find()
        .filter(models::user::Column::Username.eq("gina"))
        .one(&db)
        .await?
        .expect("gina registered");
    service::profile_service::award_badge(&db, gina.id, "Early Adopter").await?;
    service::profile_service::set_social_handle(&db, gina.id, "GitHub", "gina-dev").await?;

    let resp = app.clone().call(get(&format!("/users/{}/", gina.id), None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await?;
    assert!(html.contains("Early Adopter"));
    assert!(html.contains("GitHub: gina-dev"));

    let resp = app.clone().call(get("/users/999/", None)?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let admin = login(&app, "admin", "password").await?;
    let resp = app.clone().call(get("/deletepost/999/", Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_references_are_admin_only() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    let admin = login(&app, "admin", "password").await?;
    let id = create_post(&app, &admin, "Hello", true).await?;
    let uri = format!("/posts/{id}/references/");
    let form = "description=Rust+docs&url=https%3A%2F%2Fdocs.rs";

    let resp = app.clone().call(post_form(&uri, form, None)?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login/");

    let reader = register(&app, "reader").await?;
    let reader = session_cookie(&reader).expect("session");
    let resp = app.clone().call(post_form(&uri, form, Some(&reader))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(models::external_reference::Entity::find().count(&db).await?, 0);

    let resp = app.clone().call(post_form(&uri, form, Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{id}"));

    let resp = app.clone().call(post_form(&uri, "description=bad&url=ftp%3A%2F%2Fx", Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = app.clone().call(post_form("/posts/999/references/", form, Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let html = body_text(app.clone().call(get(&format!("/posts/{id}"), None)?).await?).await?;
    assert!(html.contains("Rust docs"));
    assert!(html.contains(r#"rel="nofollow""#));
    assert_eq!(models::external_reference::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_forged_or_expired_session_is_cleared() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let identity = Identity { id: 1, display_name: "Admin".into(), role: Role::Admin };

    let forged = SessionKeys::new(&SessionConfig { secret: "not-the-secret".into(), ..Default::default() }).issue(&identity)?;
    let expired = SessionKeys::new(&SessionConfig { secret: "test-secret".into(), ttl_hours: -2, ..Default::default() })
        .issue(&identity)?;

    for token in [forged, expired, "garbage".to_string()] {
        let cookie = format!("blog_session={token}");
        let resp = app.clone().call(get("/posts/", Some(&cookie))?).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/login/");
        assert_eq!(session_cookie(&resp).as_deref(), Some("blog_session="));

        let resp = app.clone().call(get("/index/", Some(&cookie))?).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(session_cookie(&resp).as_deref(), Some("blog_session="));
        assert!(body_text(resp).await?.contains(r#"href="/login/""#));
    }
    Ok(())
}

#[tokio::test]
async fn test_over_long_registration_fields_are_rejected() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    let form = format!("username=hank&password=pw&display_name=Hank&email={}%40example.com", "h".repeat(250));
    let resp = app.clone().call(post_form("/register/", &form, None)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&resp).is_none());
    assert!(body_text(resp).await?.contains("email too long"));
    let hanks = models::user::Entity::find()
        .filter(models::user::Column::Username.eq("hank"))
        .count(&db)
        .await?;
    assert_eq!(hanks, 0);
    Ok(())
}
