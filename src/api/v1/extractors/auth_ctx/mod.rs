/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the verified request context (AuthCtx) to handlers
 * - HTTP / axum wiring stays in core; the type contract lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
