use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};

use service::profile_service;

use crate::errors::AppError;
use crate::session::Viewer;
use crate::state::ServerState;

pub async fn show_profile(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let account = state
        .users
        .fetch_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let badges = profile_service::list_badges(&state.db, id).await?;
    let handles = profile_service::list_social_handles(&state.db, id).await?;
    state.views.profile(&viewer, &account, &badges, &handles)
}
