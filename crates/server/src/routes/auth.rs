use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use service::account::{AccountError, SignUpInput, UniqueField};

use crate::errors::AppError;
use crate::session::{removal_cookie, Viewer};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

pub async fn login_form(State(state): State<ServerState>, Extension(viewer): Extension<Viewer>) -> Result<Response, AppError> {
    if viewer.account().is_some() {
        return Ok(Redirect::to(&state.url("/index/")).into_response());
    }
    Ok(state.views.login_form(&viewer, None)?.into_response())
}

pub async fn login(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if viewer.account().is_some() {
        return Ok(Redirect::to(&state.url("/index/")).into_response());
    }
    match state.users.login(&form.username, &form.password).await? {
        Some(account) => {
            let jar = state.session.login(jar, &account)?;
            Ok((jar, Redirect::to(&state.url("/index/"))).into_response())
        }
        None => {
            let page = state.views.login_form(&viewer, Some("Invalid credentials."))?;
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
    }
}

pub async fn logout(State(state): State<ServerState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    if let Some(a) = viewer.account() {
        info!(event = "user_logged_out", user_id = a.id());
    }
    (jar.remove(removal_cookie()), Redirect::to(&state.url("/index/"))).into_response()
}

pub async fn register_form(State(state): State<ServerState>, Extension(viewer): Extension<Viewer>) -> Result<Response, AppError> {
    if viewer.account().is_some() {
        return Ok(Redirect::to(&state.url("/index/")).into_response());
    }
    Ok(state.views.register_form(&viewer, None)?.into_response())
}

/// User-facing explanation for a failed registration.
fn registration_message(e: &AccountError) -> Option<(StatusCode, String)> {
    match e {
        AccountError::Duplicate(UniqueField::Username) => {
            Some((StatusCode::CONFLICT, "An account with that username already exists.".into()))
        }
        AccountError::Duplicate(UniqueField::Email) => {
            Some((StatusCode::CONFLICT, "An account with that email already exists.".into()))
        }
        AccountError::Duplicate(UniqueField::Phone) => {
            Some((StatusCode::CONFLICT, "An account with that phone number already exists.".into()))
        }
        AccountError::MissingField(field) => {
            Some((StatusCode::BAD_REQUEST, format!("Please fill in the {} field.", field.replace('_', " "))))
        }
        AccountError::Invalid(msg) => Some((StatusCode::BAD_REQUEST, format!("Registration failed: {msg}."))),
        AccountError::HashError(_) | AccountError::Repository(_) => None,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Extension(viewer): Extension<Viewer>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if viewer.account().is_some() {
        return Ok(Redirect::to(&state.url("/index/")).into_response());
    }
    let input = SignUpInput {
        username: form.username,
        password: form.password,
        display_name: form.display_name,
        phone: form.phone,
        email: form.email,
        is_admin: false,
    };
    match state.users.sign_up(input).await {
        Ok(account) => {
            let jar = state.session.login(jar, &account)?;
            Ok((jar, Redirect::to(&state.url("/index/"))).into_response())
        }
        Err(e) => match registration_message(&e) {
            Some((status, msg)) => Ok((status, state.views.register_form(&viewer, Some(&msg))?).into_response()),
            None => Err(e.into()),
        },
    }
}
