/*
 * Responsibility
 * - comments CRUD (a comment always belongs to one post)
 * - The parent relation lives on the comment row, so "detach from the post,
 *   then delete the record" is a single atomic DELETE here
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: Uuid,

    #[sqlx(rename = "postId")]
    pub post_id: Uuid,

    pub content: String,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,
    #[sqlx(rename = "authorUsername")]
    pub author_username: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<CommentRow, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        WITH inserted AS (
            INSERT INTO comments ("postId", "authorId", content)
            VALUES ($1, $2, $3)
            RETURNING "commentId", "postId", "authorId", content, "createdAt"
        )
        SELECT
            i."commentId", i."postId", i.content, i."authorId",
            u.username AS "authorUsername",
            i."createdAt"
        FROM inserted i
        JOIN users u ON u."userId" = i."authorId"
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, comment_id: Uuid) -> Result<Option<CommentRow>, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT
            c."commentId", c."postId", c.content, c."authorId",
            u.username AS "authorUsername",
            c."createdAt"
        FROM comments c
        JOIN users u ON u."userId" = c."authorId"
        WHERE c."commentId" = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list_for_post(db: &PgPool, post_id: Uuid) -> Result<Vec<CommentRow>, RepoError> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT
            c."commentId", c."postId", c.content, c."authorId",
            u.username AS "authorUsername",
            c."createdAt"
        FROM comments c
        JOIN users u ON u."userId" = c."authorId"
        WHERE c."postId" = $1
        ORDER BY c."createdAt" ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Delete one comment under the given post. Matching on both ids keeps the
/// operation atomic and rejects a comment id that belongs to another post.
pub async fn delete(db: &PgPool, post_id: Uuid, comment_id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE "commentId" = $1 AND "postId" = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
