use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiResult, FieldError, MessageBody},
    posts::{
        dto::{CommentRequest, CreatePostRequest, PostResponse},
        repo::{Comment, Like, Post},
    },
    state::AppState,
    users::repo::User,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route("/posts/:post_id", get(get_post).delete(delete_post))
        .route("/posts/user/:user_id", get(user_posts))
        .route("/posts/like/:post_id", put(like_post))
        .route("/posts/unlike/:post_id", put(unlike_post))
        .route("/posts/comment/:post_id", post(add_comment))
        .route("/posts/comment/:post_id/:comment_id", delete(remove_comment))
}

fn post_not_found() -> ApiError {
    ApiError::msg("Post not found")
}

fn stale_token(user_id: Uuid) -> ApiError {
    warn!(user_id = %user_id, "token for a user that no longer exists");
    ApiError::unauthorized("User not found")
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let text = payload.text.unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "Text is required",
            "text",
        )]));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| stale_token(user_id))?;

    let post = Post::create(&state.db, user_id, &user.name, &user.avatar, &text).await?;
    info!(post_id = %post.id, user_id = %user_id, "post created");
    Ok(Json(post.into()))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let posts = Post::list(&state.db).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    // A malformed id gets the same answer as an unknown one.
    let Ok(post_id) = post_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let post = Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(post_not_found)?;
    Ok(Json(post.into()))
}

#[instrument(skip(state))]
pub async fn user_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(author_id): Path<String>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let Ok(author_id) = author_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let posts = Post::list_by_user(&state.db, author_id).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let Ok(post_id) = post_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let post = Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(post_not_found)?;

    if post.user_id != user_id {
        warn!(post_id = %post.id, user_id = %user_id, "delete attempt by a non-author");
        return Err(ApiError::msg("This is not your post"));
    }

    Post::delete(&state.db, post.id).await?;
    info!(post_id = %post.id, user_id = %user_id, "post deleted");
    Ok(Json(MessageBody::new("Post deleted")))
}

#[instrument(skip(state))]
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<Like>>> {
    let Ok(post_id) = post_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let mut post = Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(post_not_found)?;

    if post.liked_by(user_id) {
        return Err(ApiError::msg("Post already liked"));
    }

    post.add_like(user_id);
    Post::set_likes(&state.db, post.id, &post.likes.0).await?;
    Ok(Json(post.likes.0))
}

#[instrument(skip(state))]
pub async fn unlike_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<Like>>> {
    let Ok(post_id) = post_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let mut post = Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(post_not_found)?;

    if !post.liked_by(user_id) {
        return Err(ApiError::msg("Post has not been liked yet"));
    }

    post.remove_like(user_id);
    Post::set_likes(&state.db, post.id, &post.likes.0).await?;
    Ok(Json(post.likes.0))
}

#[instrument(skip(state, payload))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<Json<Vec<Comment>>> {
    let text = payload.text.unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "Text is required",
            "text",
        )]));
    }

    let Ok(post_id) = post_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let mut post = Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(post_not_found)?;
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| stale_token(user_id))?;

    post.add_comment(Comment {
        id: Uuid::new_v4(),
        user: user_id,
        text,
        name: user.name,
        avatar: user.avatar,
        created_at: OffsetDateTime::now_utc(),
    });
    Post::set_comments(&state.db, post.id, &post.comments.0).await?;
    info!(post_id = %post.id, user_id = %user_id, "comment added");
    Ok(Json(post.comments.0))
}

#[instrument(skip(state))]
pub async fn remove_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Comment>>> {
    let Ok(post_id) = post_id.parse::<Uuid>() else {
        return Err(post_not_found());
    };
    let mut post = Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(post_not_found)?;

    let Ok(comment_id) = comment_id.parse::<Uuid>() else {
        return Err(ApiError::msg("Comment not found"));
    };
    let comment_author = post
        .find_comment(comment_id)
        .map(|c| c.user)
        .ok_or_else(|| ApiError::msg("Comment not found"))?;

    if comment_author != user_id {
        warn!(post_id = %post.id, user_id = %user_id, "comment delete by a non-author");
        return Err(ApiError::msg("This is not your post"));
    }

    post.remove_comment(comment_id);
    Post::set_comments(&state.db, post.id, &post.comments.0).await?;
    info!(post_id = %post.id, user_id = %user_id, "comment removed");
    Ok(Json(post.comments.0))
}
