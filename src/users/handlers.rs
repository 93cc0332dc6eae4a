use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{dto::TokenResponse, jwt::JwtKeys, password},
    error::{ApiError, ApiResult, FieldError},
    state::AppState,
    users::{dto::RegisterRequest, gravatar::gravatar_url, repo::User},
    validate::is_valid_email,
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let name = payload.name.unwrap_or_default().trim().to_string();
    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError::new("Name is required", "name"));
    }
    if !is_valid_email(&email) {
        errors.push(FieldError::new("Please include a valid email", "email"));
    }
    if password.len() < 6 {
        errors.push(FieldError::new(
            "Please enter a password with 6 or more characters",
            "password",
        ));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // One account per email.
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Validation(vec![FieldError::bare(
            "User already exists",
        )]));
    }

    let avatar = gravatar_url(&email);
    let hash = password::hash_password(&password)?;
    let user = User::create(&state.db, &name, &email, &avatar, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(TokenResponse { token }))
}
