/*
 * Responsibility
 * - posts CRUD
 * - Every read joins users for the author's display name (the client renders
 *   "by <username>" without a second fetch)
 * - "authorId" FK has no cascade: deleting a user never deletes their posts
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    #[sqlx(rename = "postId")]
    pub post_id: Uuid,

    pub title: String,
    pub content: String,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,
    #[sqlx(rename = "authorUsername")]
    pub author_username: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<PostRow>, RepoError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT
            p."postId", p.title, p.content, p."authorId",
            u.username AS "authorUsername",
            p."createdAt", p."updatedAt"
        FROM posts p
        JOIN users u ON u."userId" = p."authorId"
        ORDER BY p."createdAt" DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    title: &str,
    content: &str,
    author_id: Uuid,
) -> Result<PostRow, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (title, content, "authorId")
            VALUES ($1, $2, $3)
            RETURNING "postId", title, content, "authorId", "createdAt", "updatedAt"
        )
        SELECT
            i."postId", i.title, i.content, i."authorId",
            u.username AS "authorUsername",
            i."createdAt", i."updatedAt"
        FROM inserted i
        JOIN users u ON u."userId" = i."authorId"
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(author_id)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, post_id: Uuid) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT
            p."postId", p.title, p.content, p."authorId",
            u.username AS "authorUsername",
            p."createdAt", p."updatedAt"
        FROM posts p
        JOIN users u ON u."userId" = p."authorId"
        WHERE p."postId" = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    post_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH updated AS (
            UPDATE posts
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                "updatedAt" = now()
            WHERE "postId" = $1
            RETURNING "postId", title, content, "authorId", "createdAt", "updatedAt"
        )
        SELECT
            up."postId", up.title, up.content, up."authorId",
            u.username AS "authorUsername",
            up."createdAt", up."updatedAt"
        FROM updated up
        JOIN users u ON u."userId" = up."authorId"
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(content)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, post_id: Uuid) -> Result<bool, RepoError> {
    // comments."postId" cascades, so a post and its comment thread go
    // together in one statement.
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE "postId" = $1
        "#,
    )
    .bind(post_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
