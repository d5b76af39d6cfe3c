/*
 * Responsibility
 * - /users handlers: register, login, details, admin listing/deletion
 * - Credential checks stay behind services::auth::password; the stored hash
 *   never appears in a response or a log line
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::{
            MessageResponse,
            users::{
                LoginRequest, LoginResponse, RegisterRequest, UserDetailsResponse, UserResponse,
                UsersResponse,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::{error::RepoError, user_repo},
    services::auth::{ownership, password, token::Identity},
    state::AppState,
};

fn user_to_response(row: user_repo::UserRow) -> UserResponse {
    UserResponse {
        id: row.user_id,
        email: row.email,
        username: row.username,
        is_admin: row.is_admin,
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION", msg))?;

    let password_hash = password::hash(&req.password)?;
    let username = req.resolved_username().to_string();

    user_repo::create(&state.db, req.email.trim(), &username, &password_hash)
        .await
        .map_err(|e| match e {
            // email uniqueness is a storage constraint, surfaced as 400
            RepoError::Conflict => AppError::bad_request("EMAIL_TAKEN", "user already exists"),
            other => other.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user registered successfully",
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let cred = user_repo::find_by_email(&state.db, req.email.trim()).await?;

    // Unknown emails still pay the hash cost, so both failure paths take
    // about as long.
    let matched = match &cred {
        Some(c) => password::verify(&req.password, Some(&c.password_hash)),
        None => password::verify_dummy(&req.password),
    };
    let cred = cred
        .filter(|_| matched)
        .ok_or(AppError::Unauthorized("invalid credentials"))?;

    let identity = Identity {
        user_id: cred.user_id,
        email: cred.email,
        is_admin: cred.is_admin,
    };
    let access = state.tokens.issue(&identity).map_err(|e| {
        tracing::error!(error = %e, "failed to sign access token");
        AppError::Internal
    })?;

    Ok(Json(LoginResponse { access }))
}

pub async fn details(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserDetailsResponse>, AppError> {
    let row = user_repo::get(&state.db, ctx.identity.user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(UserDetailsResponse {
        user: user_to_response(row),
    }))
}

pub async fn get_all_users(
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, AppError> {
    let rows = user_repo::list(&state.db).await?;
    let users: Vec<UserResponse> = rows.into_iter().map(user_to_response).collect();

    Ok(Json(UsersResponse {
        count: users.len(),
        users,
    }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    // Self-lockout guard: even an admin cannot delete their own account.
    if !ownership::can_delete_user(&ctx.identity, user_id).is_allowed() {
        return Err(AppError::bad_request(
            "SELF_DELETE",
            "cannot delete your own account",
        ));
    }

    let deleted = user_repo::delete(&state.db, user_id)
        .await
        .map_err(|e| match e {
            RepoError::Referenced => AppError::bad_request(
                "USER_HAS_CONTENT",
                "user still owns posts or comments",
            ),
            other => other.into(),
        })?;

    if !deleted {
        return Err(AppError::not_found("user"));
    }

    Ok(Json(MessageResponse {
        message: "user deleted successfully",
    }))
}
