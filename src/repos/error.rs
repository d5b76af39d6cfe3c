/*
 * Responsibility
 * - Meaning the repos report upward
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("conflict")]
    Conflict,
    #[error("still referenced")]
    Referenced,
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            // 23505: unique_violation, 23503: foreign_key_violation
            match dbe.code().as_deref() {
                Some("23505") => return RepoError::Conflict,
                Some("23503") => return RepoError::Referenced,
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}
