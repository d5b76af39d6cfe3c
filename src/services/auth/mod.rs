/*
 * Responsibility
 * - Auth building blocks: token codec, password hashing, ownership checks
 * - No axum types in here; middleware/handlers adapt these to HTTP
 */
pub mod ownership;
pub mod password;
pub mod token;
