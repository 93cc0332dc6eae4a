//! Action creators: the only part of the client allowed to perform I/O.
//! Each creator issues a request, then dispatches the typed actions below;
//! reducers do the rest.

use uuid::Uuid;

use crate::auth::dto::UserResponse;
use crate::client::api::RequestFailure;
use crate::posts::dto::PostResponse;
use crate::posts::repo::{Comment, Like};
use crate::profiles::dto::ProfileResponse;

pub mod alert;
pub mod auth;
pub mod post;
pub mod profile;

/// Every state transition in the client goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Alert(AlertAction),
    Auth(AuthAction),
    Profile(ProfileAction),
    Post(PostAction),
    Navigate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Danger => "danger",
        }
    }
}

/// Transient notification; removed again by a timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub msg: String,
    pub kind: AlertKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertAction {
    Set(Alert),
    Remove(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    RegisterSuccess { token: String },
    RegisterFail,
    LoginSuccess { token: String },
    LoginFail,
    UserLoaded(UserResponse),
    AuthError,
    Logout,
    AccountDeleted,
}

/// Error payload recorded by the profile and post slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceError {
    pub msg: String,
    pub status: u16,
}

impl From<&RequestFailure> for SliceError {
    fn from(failure: &RequestFailure) -> Self {
        Self {
            msg: failure.status_text.clone(),
            status: failure.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    Loaded(ProfileResponse),
    AllLoaded(Vec<ProfileResponse>),
    Error(SliceError),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostAction {
    Loaded(Vec<PostResponse>),
    Single(PostResponse),
    Added(PostResponse),
    Deleted(Uuid),
    LikesUpdated { post_id: Uuid, likes: Vec<Like> },
    CommentsUpdated { post_id: Uuid, comments: Vec<Comment> },
    Error(SliceError),
}
