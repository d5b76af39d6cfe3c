/*
 * Responsibility
 * - URL structure for v1 (/users, /posts, /health)
 * - Decide here which route groups sit behind the gatekeeper and which
 *   behind the admin gate; handlers never re-check authentication
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    posts::{
        add_comment, add_post, delete_comment, delete_post, get_comments, get_post, list_posts,
        update_post,
    },
    users::{delete_user, details, get_all_users, login, register},
};

pub fn routes(state: AppState) -> Router<AppState> {
    // No token needed: registration, login, and all reads.
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/posts/getPosts", get(list_posts))
        .route("/posts/getPost/{id}", get(get_post))
        .route("/posts/getComments/{id}", get(get_comments));

    // Any verified identity. Ownership of the targeted resource is checked
    // inside the mutating handlers.
    let authed = Router::new()
        .route("/users/details", get(details))
        .route("/posts/addPost", post(add_post))
        .route("/posts/updatePost/{id}", patch(update_post))
        .route("/posts/deletePost/{id}", delete(delete_post))
        .route("/posts/addComment/{id}", patch(add_comment))
        .route(
            "/posts/deleteComment/{post_id}/{comment_id}",
            delete(delete_comment),
        );

    // Admin flag required on top of a verified identity.
    let admin = Router::new()
        .route("/users/admin/getAllUsers", get(get_all_users))
        .route("/users/admin/deleteUser/{id}", delete(delete_user));

    Router::new()
        .merge(public)
        .merge(access::apply(authed, state.clone()))
        .merge(access::apply_admin(admin, state))
}
