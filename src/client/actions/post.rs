use uuid::Uuid;

use crate::client::actions::alert::{set_alert, DEFAULT_TIMEOUT};
use crate::client::actions::{Action, AlertKind, PostAction, SliceError};
use crate::client::api::{ApiClient, RequestFailure};
use crate::client::store::Store;
use crate::error::MessageBody;
use crate::posts::dto::{CommentRequest, CreatePostRequest, PostResponse};
use crate::posts::repo::{Comment, Like};

fn post_failure(store: &Store, failure: &RequestFailure) {
    for err in &failure.errors {
        set_alert(store, err.msg.clone(), AlertKind::Danger, DEFAULT_TIMEOUT);
    }
    store.dispatch(Action::Post(PostAction::Error(SliceError::from(failure))));
}

pub async fn get_posts(store: &Store, api: &ApiClient) {
    match api.get::<Vec<PostResponse>>("/api/posts").await {
        Ok(posts) => store.dispatch(Action::Post(PostAction::Loaded(posts))),
        Err(failure) => post_failure(store, &failure),
    }
}

pub async fn get_post(store: &Store, api: &ApiClient, post_id: Uuid) {
    match api
        .get::<PostResponse>(&format!("/api/posts/{post_id}"))
        .await
    {
        Ok(post) => store.dispatch(Action::Post(PostAction::Single(post))),
        Err(failure) => post_failure(store, &failure),
    }
}

pub async fn create_post(
    store: &Store,
    api: &ApiClient,
    body: CreatePostRequest,
) -> Result<(), RequestFailure> {
    match api.post::<_, PostResponse>("/api/posts", &body).await {
        Ok(post) => {
            store.dispatch(Action::Post(PostAction::Added(post)));
            set_alert(store, "Post Created", AlertKind::Success, DEFAULT_TIMEOUT);
            Ok(())
        }
        Err(failure) => {
            post_failure(store, &failure);
            Err(failure)
        }
    }
}

pub async fn delete_post(store: &Store, api: &ApiClient, post_id: Uuid) {
    match api
        .delete::<MessageBody>(&format!("/api/posts/{post_id}"))
        .await
    {
        Ok(_) => {
            store.dispatch(Action::Post(PostAction::Deleted(post_id)));
            set_alert(store, "Post Removed", AlertKind::Success, DEFAULT_TIMEOUT);
        }
        Err(failure) => post_failure(store, &failure),
    }
}

pub async fn like_post(store: &Store, api: &ApiClient, post_id: Uuid) {
    match api
        .put_empty::<Vec<Like>>(&format!("/api/posts/like/{post_id}"))
        .await
    {
        Ok(likes) => store.dispatch(Action::Post(PostAction::LikesUpdated { post_id, likes })),
        Err(failure) => post_failure(store, &failure),
    }
}

pub async fn unlike_post(store: &Store, api: &ApiClient, post_id: Uuid) {
    match api
        .put_empty::<Vec<Like>>(&format!("/api/posts/unlike/{post_id}"))
        .await
    {
        Ok(likes) => store.dispatch(Action::Post(PostAction::LikesUpdated { post_id, likes })),
        Err(failure) => post_failure(store, &failure),
    }
}

pub async fn add_comment(
    store: &Store,
    api: &ApiClient,
    post_id: Uuid,
    body: CommentRequest,
) -> Result<(), RequestFailure> {
    match api
        .post::<_, Vec<Comment>>(&format!("/api/posts/comment/{post_id}"), &body)
        .await
    {
        Ok(comments) => {
            store.dispatch(Action::Post(PostAction::CommentsUpdated { post_id, comments }));
            set_alert(store, "Comment Added", AlertKind::Success, DEFAULT_TIMEOUT);
            Ok(())
        }
        Err(failure) => {
            post_failure(store, &failure);
            Err(failure)
        }
    }
}

pub async fn delete_comment(store: &Store, api: &ApiClient, post_id: Uuid, comment_id: Uuid) {
    match api
        .delete::<Vec<Comment>>(&format!("/api/posts/comment/{post_id}/{comment_id}"))
        .await
    {
        Ok(comments) => {
            store.dispatch(Action::Post(PostAction::CommentsUpdated { post_id, comments }));
            set_alert(store, "Comment Removed", AlertKind::Success, DEFAULT_TIMEOUT);
        }
        Err(failure) => post_failure(store, &failure),
    }
}
