//! Per-resource authorization decisions.
//!
//! Runs after the gatekeeper has already produced a verified `Identity`.
//! A mutating operation on a post or comment is allowed for the recorded
//! owner and for administrators; everything else is denied.

use uuid::Uuid;

use crate::services::auth::token::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Owner-or-admin rule for mutating a resource.
pub fn authorize(actor: &Identity, owner_id: Uuid) -> Decision {
    if actor.user_id == owner_id || actor.is_admin {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Guard for the admin user-deletion endpoint.
///
/// Deleting your own credential record is denied regardless of privilege,
/// so an administrator cannot lock themselves out. Callers are already
/// behind the admin gate, so any other target is allowed.
pub fn can_delete_user(actor: &Identity, target_id: Uuid) -> Decision {
    if actor.user_id == target_id {
        Decision::Deny
    } else {
        Decision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(is_admin: bool) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            is_admin,
        }
    }

    #[test]
    fn owner_non_admin_is_allowed() {
        let actor = identity(false);
        assert_eq!(authorize(&actor, actor.user_id), Decision::Allow);
    }

    #[test]
    fn owner_admin_is_allowed() {
        let actor = identity(true);
        assert_eq!(authorize(&actor, actor.user_id), Decision::Allow);
    }

    #[test]
    fn non_owner_admin_is_allowed() {
        let actor = identity(true);
        assert_eq!(authorize(&actor, Uuid::new_v4()), Decision::Allow);
    }

    #[test]
    fn non_owner_non_admin_is_denied() {
        let actor = identity(false);
        assert_eq!(authorize(&actor, Uuid::new_v4()), Decision::Deny);
    }

    #[test]
    fn admin_cannot_delete_own_account() {
        let actor = identity(true);
        assert_eq!(can_delete_user(&actor, actor.user_id), Decision::Deny);
    }

    #[test]
    fn admin_can_delete_other_account() {
        let actor = identity(true);
        assert_eq!(can_delete_user(&actor, Uuid::new_v4()), Decision::Allow);
    }
}
