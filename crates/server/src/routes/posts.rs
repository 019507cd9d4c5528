use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use service::blog::{Post, PostInput};

use crate::errors::AppError;
use crate::session::Viewer;
use crate::state::ServerState;
use crate::views::PostForm;

#[derive(Debug, Deserialize)]
pub struct PostFormData {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: String,
    /// Checkbox: present as `on` only when ticked.
    #[serde(default)]
    pub is_visible: Option<String>,
}

impl PostFormData {
    fn into_input(self) -> PostInput {
        let visible = self.is_visible.as_deref() == Some("on");
        PostInput::with_tag_line(self.title, self.content, &self.tags, visible)
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ReferenceForm {
    #[serde(default)]
    pub description: String,
    pub url: String,
}

/// A post the viewer may see: hidden posts only exist for admins.
async fn visible_post(state: &ServerState, viewer: &Viewer, id: i32) -> Result<Post, AppError> {
    match state.blog.fetch_post_by_id(id).await? {
        Some(p) if p.is_visible || viewer.is_admin() => Ok(p),
        _ => Err(AppError::post_not_found()),
    }
}

pub async fn index(State(state): State<ServerState>, Extension(viewer): Extension<Viewer>) -> Result<Html<String>, AppError> {
    let posts = state.blog.fetch_all_posts(viewer.is_admin()).await?;
    state.views.index(&viewer, &posts)
}

pub async fn new_post_form(State(state): State<ServerState>, Extension(viewer): Extension<Viewer>) -> Result<Html<String>, AppError> {
    viewer.require_admin(&state)?;
    let form = PostForm { visible: true, ..Default::default() };
    state.views.post_form(&viewer, "Add post", &form, None)
}

pub async fn create_post(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Form(form): Form<PostFormData>,
) -> Result<Redirect, AppError> {
    let admin = viewer.require_admin(&state)?;
    let post = state.blog.add_post(admin, form.into_input()).await?;
    Ok(Redirect::to(&state.url(&format!("/posts/{}", post.id))))
}

pub async fn show_post(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let detail = state.blog.fetch_post_detail(id).await?.ok_or_else(AppError::post_not_found)?;
    if !detail.post.is_visible && !viewer.is_admin() {
        return Err(AppError::post_not_found());
    }
    state.views.post_detail(&viewer, &detail)
}

fn edit_form(post: &Post, tags: String) -> PostForm<'_> {
    PostForm {
        post_id: Some(post.id),
        title: &post.title,
        content: &post.content,
        tags,
        visible: post.is_visible,
    }
}

pub async fn edit_post_form(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    viewer.require_admin(&state)?;
    let detail = state.blog.fetch_post_detail(id).await?.ok_or_else(AppError::post_not_found)?;
    let form = edit_form(&detail.post, detail.tags.join(", "));
    state.views.post_form(&viewer, "Edit post", &form, None)
}

pub async fn edit_post(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
    Form(form): Form<PostFormData>,
) -> Result<Html<String>, AppError> {
    viewer.require_admin(&state)?;
    let input = form.into_input();
    let tags = models::tag::normalize(&input.tags).join(", ");
    let post = state.blog.edit_post(id, input).await?.ok_or_else(AppError::post_not_found)?;
    let form = edit_form(&post, tags);
    state.views.post_form(&viewer, "Edit post", &form, Some("Post Updated Successfully."))
}

pub async fn add_comment(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    let account = viewer.require_login(&state)?;
    visible_post(&state, &viewer, id).await?;
    let post = state.blog.add_comment(id, &form.comment, account).await?.ok_or_else(AppError::post_not_found)?;
    Ok(Redirect::to(&state.url(&format!("/posts/{}", post.id))))
}

pub async fn like_post(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let account = viewer.require_login(&state)?;
    visible_post(&state, &viewer, id).await?;
    state.blog.like_post(id, account).await?.ok_or_else(AppError::post_not_found)?;
    Ok(Redirect::to(&state.url(&format!("/posts/{id}"))))
}

pub async fn add_reference(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
    Form(form): Form<ReferenceForm>,
) -> Result<Redirect, AppError> {
    viewer.require_admin(&state)?;
    state
        .blog
        .add_reference(id, &form.description, &form.url)
        .await?
        .ok_or_else(AppError::post_not_found)?;
    Ok(Redirect::to(&state.url(&format!("/posts/{id}"))))
}

pub async fn delete_post(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    viewer.require_admin(&state)?;
    if !state.blog.delete_post(id).await? {
        return Err(AppError::post_not_found());
    }
    Ok(Redirect::to(&state.url("/")).into_response())
}
