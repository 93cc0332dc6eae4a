use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One like per user, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

/// Commenter name and avatar are snapshots taken when the comment is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
}

/// Author name and avatar are snapshots taken at creation; later profile
/// edits do not propagate here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub text: String,
    pub likes: Json<Vec<Like>>,
    pub comments: Json<Vec<Comment>>,
    pub created_at: OffsetDateTime,
}

impl Post {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        avatar: &str,
        text: &str,
    ) -> anyhow::Result<Post> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, name, avatar, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, avatar, text, likes, comments, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(avatar)
        .bind(text)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, name, avatar, text, likes, comments, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, post_id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, name, avatar, text, likes, comments, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, name, avatar, text, likes, comments, created_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn delete(db: &PgPool, post_id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn set_likes(db: &PgPool, post_id: Uuid, likes: &[Like]) -> anyhow::Result<()> {
        sqlx::query("UPDATE posts SET likes = $2 WHERE id = $1")
            .bind(post_id)
            .bind(Json(likes))
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn set_comments(
        db: &PgPool,
        post_id: Uuid,
        comments: &[Comment],
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE posts SET comments = $2 WHERE id = $1")
            .bind(post_id)
            .bind(Json(comments))
            .execute(db)
            .await?;
        Ok(())
    }

    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.0.iter().any(|l| l.user == user_id)
    }

    /// Callers must check `liked_by` first; the list itself never deduplicates.
    pub fn add_like(&mut self, user_id: Uuid) {
        self.likes.0.insert(0, Like { user: user_id });
    }

    pub fn remove_like(&mut self, user_id: Uuid) {
        self.likes.0.retain(|l| l.user != user_id);
    }

    /// Newest comment first.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.0.insert(0, comment);
    }

    pub fn find_comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.0.iter().find(|c| c.id == comment_id)
    }

    pub fn remove_comment(&mut self, comment_id: Uuid) {
        self.comments.0.retain(|c| c.id != comment_id);
    }
}
