//! Bearer-token gatekeeper: validate `Authorization: Bearer <jwt>` and put
//! the resolved AuthCtx into request extensions.
//!
//! Two variants share the same decode path:
//! - [`apply`]: any verified identity may continue.
//! - [`apply_admin`]: the identity must also carry the admin flag, else 403.
//!
//! Failure is terminal for the request (401/403 with a JSON error body);
//! nothing past this layer ever sees an unauthenticated request. The raw
//! header value is never logged.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Require a verified identity for every route in `router`.
///
/// Example:
/// ```ignore
/// let protected = access::apply(post_routes, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor on its own, so pass
    // the state explicitly via from_fn_with_state.
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Same gate, plus the admin requirement. A request that passes this layer
/// always satisfies [`apply`] as well.
pub fn apply_admin(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, admin_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = verify_bearer(&state, &req)?;

    // middleware -> extractor handoff
    req.extensions_mut().insert(AuthCtx::new(identity));

    Ok(next.run(req).await)
}

async fn admin_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = verify_bearer(&state, &req)?;

    if !identity.is_admin {
        return Err(AppError::Forbidden("admin privileges required"));
    }

    req.extensions_mut().insert(AuthCtx::new(identity));

    Ok(next.run(req).await)
}

fn verify_bearer(
    state: &AppState,
    req: &Request<Body>,
) -> Result<crate::services::auth::token::Identity, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized("missing access token"))?;

    let token = auth
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized("missing access token"))?;

    state.tokens.decode(token).map_err(|err| {
        // Log the rejection kind only, never the token itself.
        tracing::warn!(error = %err, "access token rejected");
        AppError::Unauthorized("invalid access token")
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::api::v1::extractors::AuthCtxExtractor;
    use crate::services::auth::token::{Identity, TokenCodec};

    const SECRET: &str = "unit-test-secret-unit-test-secret!!!";

    fn state() -> AppState {
        // connect_lazy never dials out; the auth layer does not touch the DB.
        let db = sqlx::PgPool::connect_lazy("postgres://postgres@127.0.0.1/blog_test").unwrap();
        AppState::new(db, Arc::new(TokenCodec::new(SECRET, 3600)))
    }

    async fn whoami(AuthCtxExtractor(ctx): AuthCtxExtractor) -> String {
        ctx.identity.user_id.to_string()
    }

    fn protected_app(state: AppState) -> Router {
        let routes = Router::new().route("/whoami", get(whoami));
        apply(routes, state.clone()).with_state(state)
    }

    fn admin_app(state: AppState) -> Router {
        let routes = Router::new().route("/admin", get(|| async { "ok" }));
        apply_admin(routes, state.clone()).with_state(state)
    }

    fn bearer(state: &AppState, identity: &Identity) -> String {
        format!("Bearer {}", state.tokens.issue(identity).unwrap())
    }

    fn identity(is_admin: bool) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "t@example.com".to_string(),
            is_admin,
        }
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let res = protected_app(state())
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_bearer_never_reaches_the_handler() {
        let res = protected_app(state())
            .oneshot(
                Request::get("/whoami")
                    .header("authorization", "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn header_without_bearer_prefix_is_401() {
        let res = protected_app(state())
            .oneshot(
                Request::get("/whoami")
                    .header("authorization", "Basic dXNlcjpwdw==")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_its_identity() {
        let state = state();
        let id = identity(false);
        let res = protected_app(state.clone())
            .oneshot(
                Request::get("/whoami")
                    .header("authorization", bearer(&state, &id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], id.user_id.to_string().as_bytes());
    }

    #[tokio::test]
    async fn non_admin_on_admin_route_is_403() {
        let state = state();
        let res = admin_app(state.clone())
            .oneshot(
                Request::get("/admin")
                    .header("authorization", bearer(&state, &identity(false)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_on_admin_route_continues() {
        let state = state();
        let res = admin_app(state.clone())
            .oneshot(
                Request::get("/admin")
                    .header("authorization", bearer(&state, &identity(true)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_route_without_token_is_401_not_403() {
        let res = admin_app(state())
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
