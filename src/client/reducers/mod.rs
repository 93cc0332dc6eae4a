//! Pure reducers: `(previous state, action) -> next state`, no I/O and no
//! side effects anywhere in this tree.

use crate::client::actions::Action;
use crate::client::store::ClientState;

pub mod alert;
pub mod auth;
pub mod post;
pub mod profile;

pub fn reduce(state: &ClientState, action: &Action) -> ClientState {
    match action {
        Action::Alert(action) => ClientState {
            alerts: alert::reduce(&state.alerts, action),
            ..state.clone()
        },
        Action::Auth(action) => ClientState {
            auth: auth::reduce(&state.auth, action),
            ..state.clone()
        },
        Action::Profile(action) => ClientState {
            profile: profile::reduce(&state.profile, action),
            ..state.clone()
        },
        Action::Post(action) => ClientState {
            posts: post::reduce(&state.posts, action),
            ..state.clone()
        },
        Action::Navigate(route) => ClientState {
            route: Some(route.clone()),
            ..state.clone()
        },
    }
}
