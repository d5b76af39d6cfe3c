/*
 * Responsibility
 * - Users request/response DTOs
 * - validate() does shape checks only; uniqueness etc. is the store's job
 * - Response types never carry the password hash
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: Option<String>,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err("email is required");
        }
        // Local-part check only; real validation is delivery, not regexes.
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err("email is not valid");
        }
        if self.password.len() < 8 {
            return Err("password must be at least 8 characters");
        }
        if let Some(name) = &self.username
            && name.trim().is_empty()
        {
            return Err("username cannot be empty");
        }

        Ok(())
    }

    /// Display name: explicit username, or the email's local part.
    pub fn resolved_username(&self) -> &str {
        match &self.username {
            Some(name) => name.trim(),
            None => self
                .email
                .trim()
                .split('@')
                .next()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct UserDetailsResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(email: &str, username: Option<&str>, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: username.map(|s| s.to_string()),
            password: password.to_string(),
        }
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        assert!(req("", None, "longenough").validate().is_err());
        assert!(req("not-an-email", None, "longenough").validate().is_err());
        assert!(req("a@b.example", None, "short").validate().is_err());
        assert!(req("a@b.example", Some("  "), "longenough").validate().is_err());
        assert!(req("a@b.example", Some("alice"), "longenough").validate().is_ok());
    }

    #[test]
    fn username_defaults_to_email_local_part() {
        assert_eq!(req("alice@b.example", None, "x").resolved_username(), "alice");
        assert_eq!(req("a@b.example", Some("bob"), "x").resolved_username(), "bob");
    }
}
