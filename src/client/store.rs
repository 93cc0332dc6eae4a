use std::sync::{Arc, PoisonError, RwLock};

use crate::client::actions::{Action, Alert};
use crate::client::reducers::{
    self,
    auth::AuthState,
    post::PostState,
    profile::ProfileState,
};

/// Whole-client state: one slice per concern plus the pending navigation
/// target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub alerts: Vec<Alert>,
    pub auth: AuthState,
    pub profile: ProfileState,
    pub posts: PostState,
    pub route: Option<String>,
}

/// Dispatch funnel. Reducers are the only place state changes; action
/// creators stay on the I/O side and hand their results in here.
#[derive(Clone, Default)]
pub struct Store {
    state: Arc<RwLock<ClientState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: Action) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *state = reducers::reduce(&state, &action);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ClientState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
