/*
 * Responsibility
 * - The "verified context" type as seen from handlers
 * - The middleware validates the token and stores this in request
 *   extensions; handlers only ever see this type
 *
 * Notes
 * - Token decode/verify logic belongs to middleware/services, not here
 */

use crate::services::auth::token::Identity;

/// Context attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: Identity,
}

impl AuthCtx {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}
