/*
 * Responsibility
 * - SQLx operations for the users table
 * - Takes a PgPool, provides CRUD
 * - "passwordHash" never leaves this module except through find_by_email,
 *   whose single caller is the login handler
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    #[sqlx(rename = "isAdmin")]
    pub is_admin: bool,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Same as `UserRow` plus the stored password hash. Only `find_by_email`
/// returns this shape.
#[derive(Debug, FromRow)]
pub struct CredentialRow {
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
    #[sqlx(rename = "isAdmin")]
    pub is_admin: bool,
}

pub async fn create(
    db: &PgPool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, username, "passwordHash")
        VALUES ($1, $2, $3)
        RETURNING "userId", email, username, "isAdmin", "createdAt"
        "#,
    )
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<CredentialRow>, RepoError> {
    let row = sqlx::query_as::<_, CredentialRow>(
        r#"
        SELECT "userId", email, "passwordHash", "isAdmin"
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", email, username, "isAdmin", "createdAt"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list(db: &PgPool) -> Result<Vec<UserRow>, RepoError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", email, username, "isAdmin", "createdAt"
        FROM users
        ORDER BY "createdAt" DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn delete(db: &PgPool, user_id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .execute(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(result.rows_affected() > 0)
}
