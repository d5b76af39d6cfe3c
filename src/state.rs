/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - db: PgPool, tokens: TokenCodec
 * - Clone is expected to be cheap (Arc / pool handle inside)
 */
use std::sync::Arc;

use crate::services::auth::token::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, tokens: Arc<TokenCodec>) -> Self {
        Self { db, tokens }
    }
}
