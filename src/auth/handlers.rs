use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, TokenResponse, UserResponse},
        jwt::{AuthUser, JwtKeys},
        password,
    },
    error::{ApiError, ApiResult, FieldError},
    state::AppState,
    users::repo::User,
    validate::is_valid_email,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(login).get(current_user))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let mut errors = Vec::new();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("Please include a valid email", "email"));
    }
    if password.is_empty() {
        errors.push(FieldError::new("Password is required", "password"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login with unknown email");
            return Err(invalid_credentials());
        }
    };

    if !password::verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(invalid_credentials());
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

// Deliberately the same answer for unknown email and wrong password.
fn invalid_credentials() -> ApiError {
    ApiError::Validation(vec![FieldError::bare("Invalid credentials")])
}

#[instrument(skip(state))]
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "token for a user that no longer exists");
            ApiError::unauthorized("User not found")
        })?;

    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_collects_field_errors() {
        let state = AppState::fake();
        let body = LoginRequest {
            email: Some("not-an-email".into()),
            password: None,
        };

        let err = login(State(state), Json(body))
            .await
            .expect_err("a bad email and a missing password must fail validation");

        match err {
            ApiError::Validation(errors) => {
                let msgs: Vec<_> = errors.iter().map(|e| e.msg.as_str()).collect();
                assert_eq!(
                    msgs,
                    ["Please include a valid email", "Password is required"]
                );
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_trims_and_lowercases_the_email_before_validating() {
        let state = AppState::fake();
        let body = LoginRequest {
            email: Some("  ADA@EXAMPLE.COM  ".into()),
            password: None,
        };

        let err = login(State(state), Json(body))
            .await
            .expect_err("the missing password must still fail");

        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 1, "the email itself must pass: {errors:?}");
                assert_eq!(errors[0].msg, "Password is required");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }
}
