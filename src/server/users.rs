//! User registration.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::error::ApiError;
use super::session::session_cookie;
use super::AppState;
use crate::models::User;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// `POST /users`: registers a user and issues the session cookie.
pub async fn create_user(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let Json(req) = payload?;

    let user = User::new(req.name, req.email);
    state.users.create(&user).await?;

    tracing::info!(user_id = %user.id, "Registered user");

    Ok((jar.add(session_cookie(user.id.to_string())), StatusCode::CREATED))
}
