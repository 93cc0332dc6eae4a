use crate::auth::dto::{LoginRequest, TokenResponse, UserResponse};
use crate::client::actions::alert::{set_alert, DEFAULT_TIMEOUT};
use crate::client::actions::{Action, AlertKind, AuthAction, ProfileAction};
use crate::client::api::{ApiClient, RequestFailure};
use crate::client::store::Store;
use crate::users::dto::RegisterRequest;

/// Surfaces each server-side field error as its own danger alert.
fn alert_field_errors(store: &Store, failure: &RequestFailure) {
    for err in &failure.errors {
        set_alert(store, err.msg.clone(), AlertKind::Danger, DEFAULT_TIMEOUT);
    }
}

pub async fn register(
    store: &Store,
    api: &ApiClient,
    body: RegisterRequest,
) -> Result<(), RequestFailure> {
    match api.post::<_, TokenResponse>("/api/users", &body).await {
        Ok(TokenResponse { token }) => {
            api.set_auth_token(Some(token.clone()));
            store.dispatch(Action::Auth(AuthAction::RegisterSuccess { token }));
            load_user(store, api).await;
            Ok(())
        }
        Err(failure) => {
            alert_field_errors(store, &failure);
            api.set_auth_token(None);
            store.dispatch(Action::Auth(AuthAction::RegisterFail));
            Err(failure)
        }
    }
}

pub async fn login(
    store: &Store,
    api: &ApiClient,
    body: LoginRequest,
) -> Result<(), RequestFailure> {
    match api.post::<_, TokenResponse>("/api/auth", &body).await {
        Ok(TokenResponse { token }) => {
            api.set_auth_token(Some(token.clone()));
            store.dispatch(Action::Auth(AuthAction::LoginSuccess { token }));
            load_user(store, api).await;
            Ok(())
        }
        Err(failure) => {
            alert_field_errors(store, &failure);
            api.set_auth_token(None);
            store.dispatch(Action::Auth(AuthAction::LoginFail));
            Err(failure)
        }
    }
}

/// Fetches the caller's user record with the stored token.
pub async fn load_user(store: &Store, api: &ApiClient) {
    match api.get::<UserResponse>("/api/auth").await {
        Ok(user) => store.dispatch(Action::Auth(AuthAction::UserLoaded(user))),
        Err(_) => store.dispatch(Action::Auth(AuthAction::AuthError)),
    }
}

/// Profile state is cleared first so the next login starts clean.
pub fn logout(store: &Store, api: &ApiClient) {
    api.set_auth_token(None);
    store.dispatch(Action::Profile(ProfileAction::Clear));
    store.dispatch(Action::Auth(AuthAction::Logout));
}
