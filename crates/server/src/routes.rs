use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::session::resolve_viewer;
use crate::state::ServerState;

pub mod auth;
pub mod posts;
pub mod profile;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: pages, form actions and the health probe.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let pages = Router::new()
        .route("/", get(posts::index))
        .route("/index/", get(posts::index))
        .route("/login/", get(auth::login_form).post(auth::login))
        .route("/logout/", get(auth::logout))
        .route("/register/", get(auth::register_form).post(auth::register))
        .route("/posts/", get(posts::new_post_form).post(posts::create_post))
        .route("/posts/:id", get(posts::show_post))
        .route("/posts/:id/comments/", post(posts::add_comment))
        .route("/posts/:id/likes/", post(posts::like_post))
        .route("/posts/:id/references/", post(posts::add_reference))
        .route("/editpost/:id/", get(posts::edit_post_form).post(posts::edit_post))
        .route("/deletepost/:id/", get(posts::delete_post))
        .route("/users/:id/", get(profile::show_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), resolve_viewer));

    Router::new()
        .route("/health", get(health))
        .merge(pages)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
