//! Password hashing / verification (argon2id, PHC strings).
//!
//! The stored value is a self-describing PHC string, so the salt and cost
//! parameters travel with the hash. `verify` treats an absent or unparsable
//! stored hash as a plain non-match; it never errors and never logs the
//! plaintext.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::AppError;

pub fn hash(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| AppError::Internal)?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|_| AppError::Internal)?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    Ok(phc)
}

// Well-formed argon2id PHC with default parameters and an all-zero salt
// and digest. Matches nothing; exists so unknown-account login attempts
// run the same hash work as known-account ones.
const DUMMY_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Burn the verification cost without a stored hash. Always false.
pub fn verify_dummy(password: &str) -> bool {
    verify(password, Some(DUMMY_PHC))
}

pub fn verify(password: &str, stored_hash: Option<&str>) -> bool {
    let Some(stored_hash) = stored_hash else {
        return false;
    };
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_matching_password() {
        let phc = hash("hunter2hunter2").unwrap();
        assert!(verify("hunter2hunter2", Some(&phc)));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let phc = hash("correct horse").unwrap();
        assert!(!verify("battery staple", Some(&phc)));
    }

    #[test]
    fn verify_rejects_absent_or_broken_hash() {
        assert!(!verify("anything", None));
        assert!(!verify("anything", Some("not-a-phc-string")));
        assert!(!verify("anything", Some("")));
    }

    #[test]
    fn dummy_hash_parses_and_never_matches() {
        // The dummy must be a parseable PHC string, otherwise verify would
        // bail out before doing any hash work.
        assert!(PasswordHash::new(DUMMY_PHC).is_ok());
        assert!(!verify_dummy("anything"));
        assert!(!verify_dummy(""));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same password").unwrap();
        let b = hash("same password").unwrap();
        assert_ne!(a, b);
    }
}
