use crate::auth::dto::UserResponse;
use crate::client::actions::AuthAction;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub is_authenticated: bool,
    /// True until the first auth round trip settles.
    pub loading: bool,
    pub user: Option<UserResponse>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            is_authenticated: false,
            loading: true,
            user: None,
        }
    }
}

pub fn reduce(state: &AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::RegisterSuccess { token } | AuthAction::LoginSuccess { token } => AuthState {
            token: Some(token.clone()),
            is_authenticated: true,
            loading: false,
            ..state.clone()
        },
        AuthAction::UserLoaded(user) => AuthState {
            is_authenticated: true,
            loading: false,
            user: Some(user.clone()),
            ..state.clone()
        },
        AuthAction::RegisterFail
        | AuthAction::LoginFail
        | AuthAction::AuthError
        | AuthAction::Logout
        | AuthAction::AccountDeleted => AuthState {
            token: None,
            is_authenticated: false,
            loading: false,
            user: None,
        },
    }
}
