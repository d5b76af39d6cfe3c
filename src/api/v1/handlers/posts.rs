/*
 * Responsibility
 * - /posts handlers: post CRUD plus the comment thread
 * - Reads are public; every mutation goes through the ownership check with
 *   the identity the gatekeeper resolved
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::{
            MessageResponse,
            posts::{
                AddCommentRequest, CommentResponse, CommentsResponse, CreatePostRequest,
                ListPostsQuery, PostResponse, PostsResponse, UpdatePostRequest,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::{comment_repo, post_repo},
    services::auth::ownership,
    state::AppState,
};

fn comment_to_response(row: comment_repo::CommentRow) -> CommentResponse {
    CommentResponse {
        id: row.comment_id,
        post_id: row.post_id,
        content: row.content,
        author_id: row.author_id,
        author_username: row.author_username,
        created_at: row.created_at,
    }
}

fn row_to_response(row: post_repo::PostRow, comments: Option<Vec<CommentResponse>>) -> PostResponse {
    PostResponse {
        id: row.post_id,
        title: row.title,
        content: row.content,
        author_id: row.author_id,
        author_username: row.author_username,
        created_at: row.created_at,
        updated_at: row.updated_at,
        comments,
    }
}

pub async fn add_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION", msg))?;

    let row = post_repo::create(&state.db, &req.title, &req.content, ctx.identity.user_id).await?;

    Ok((StatusCode::CREATED, Json(row_to_response(row, None))))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostsResponse>, AppError> {
    let rows = post_repo::list(&state.db, query.limit(), query.offset()).await?;
    let posts = rows.into_iter().map(|row| row_to_response(row, None)).collect();

    Ok(Json(PostsResponse { posts }))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, AppError> {
    let row = post_repo::get(&state.db, post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    let comments = comment_repo::list_for_post(&state.db, post_id)
        .await?
        .into_iter()
        .map(comment_to_response)
        .collect();

    Ok(Json(row_to_response(row, Some(comments))))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(post_id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION", msg))?;

    let row = post_repo::get(&state.db, post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    if !ownership::authorize(&ctx.identity, row.author_id).is_allowed() {
        return Err(AppError::Forbidden("not the owner of this post"));
    }

    let row = post_repo::update(&state.db, post_id, req.title.as_deref(), req.content.as_deref())
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(row_to_response(row, None)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(post_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let row = post_repo::get(&state.db, post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    if !ownership::authorize(&ctx.identity, row.author_id).is_allowed() {
        return Err(AppError::Forbidden("not the owner of this post"));
    }

    if !post_repo::delete(&state.db, post_id).await? {
        return Err(AppError::not_found("post"));
    }

    Ok(Json(MessageResponse {
        message: "post deleted successfully",
    }))
}

pub async fn add_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(post_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> Result<Json<PostResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION", msg))?;

    let row = post_repo::get(&state.db, post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    comment_repo::create(&state.db, post_id, ctx.identity.user_id, &req.content).await?;

    let comments = comment_repo::list_for_post(&state.db, post_id)
        .await?
        .into_iter()
        .map(comment_to_response)
        .collect();

    Ok(Json(row_to_response(row, Some(comments))))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<CommentsResponse>, AppError> {
    if post_repo::get(&state.db, post_id).await?.is_none() {
        return Err(AppError::not_found("post"));
    }

    let comments = comment_repo::list_for_post(&state.db, post_id)
        .await?
        .into_iter()
        .map(comment_to_response)
        .collect();

    Ok(Json(CommentsResponse { comments }))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    let comment = comment_repo::get(&state.db, comment_id)
        .await?
        // A comment id under the wrong post is indistinguishable from a
        // missing one.
        .filter(|c| c.post_id == post_id)
        .ok_or(AppError::not_found("comment"))?;

    if !ownership::authorize(&ctx.identity, comment.author_id).is_allowed() {
        return Err(AppError::Forbidden("not the owner of this comment"));
    }

    // Single-statement delete keyed on (comment, post): the detach and the
    // record removal cannot come apart.
    if !comment_repo::delete(&state.db, post_id, comment_id).await? {
        return Err(AppError::not_found("comment"));
    }

    Ok(Json(MessageResponse {
        message: "comment deleted successfully",
    }))
}
