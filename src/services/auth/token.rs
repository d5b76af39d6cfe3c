//! HS256 access-token codec.
//!
//! Issues and verifies the bearer token that carries a snapshot of the
//! authenticated identity (user id, email, admin flag). The signing secret
//! and the TTL come from `Config` at construction time; every issuance path
//! shares this one codec, so there is a single expiry policy.
//!
//! - Key material is intentionally not printable via Debug.
//! - Nothing in here logs token contents.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The authenticated actor for the duration of one request.
///
/// Reconstructed fresh from a decoded token on every request; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid signature")]
    SignatureInvalid,
    #[error("token expired")]
    Expired,
}

/// Wire shape of the claims.
///
/// `exp` stays optional on decode: tokens issued before the TTL policy was
/// unified carry no expiry and are still accepted. Tokens we issue always
/// set it.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub admin: bool,
    pub iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is validated when present but is not required, see Claims.
        validation.required_spec_claims.remove("exp");

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Sign a snapshot of the given identity.
    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: identity.user_id,
            email: identity.email.clone(),
            admin: identity.is_admin,
            iat,
            exp: Some(iat + self.ttl_seconds as i64),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify the signature (and expiry, when carried) and rebuild the
    /// identity snapshot.
    pub fn decode(&self, token: &str) -> Result<Identity, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            })?;

        Ok(Identity {
            user_id: data.claims.sub,
            email: data.claims.email,
            is_admin: data.claims.admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, 3600)
    }

    fn identity(is_admin: bool) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            is_admin,
        }
    }

    #[test]
    fn issue_then_decode_round_trips() {
        let codec = codec();
        for admin in [false, true] {
            let id = identity(admin);
            let token = codec.issue(&id).unwrap();
            assert_eq!(codec.decode(&token).unwrap(), id);
        }
    }

    #[test]
    fn decode_rejects_other_secret() {
        let token = TokenCodec::new("another-secret-another-secret-32b!", 3600)
            .issue(&identity(false))
            .unwrap();
        assert_eq!(codec().decode(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn decode_rejects_garbage_as_malformed() {
        assert_eq!(codec().decode("garbage"), Err(TokenError::Malformed));
        assert_eq!(codec().decode(""), Err(TokenError::Malformed));
        assert_eq!(codec().decode("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn decode_rejects_expired_token() {
        let iat = chrono::Utc::now().timestamp() - 7200;
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "old@example.com".to_string(),
            admin: false,
            iat,
            exp: Some(iat + 3600),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn decode_accepts_token_without_expiry() {
        // Expiry is only enforced when the token carries the claim.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "legacy@example.com".to_string(),
            admin: true,
            iat: chrono::Utc::now().timestamp(),
            exp: None,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let decoded = codec().decode(&token).unwrap();
        assert!(decoded.is_admin);
    }
}
