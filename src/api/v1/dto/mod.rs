pub mod posts;
pub mod users;

use serde::Serialize;

/// Body for operations whose success payload is just a confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
