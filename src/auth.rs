//! Caller identity and access guards.
//!
//! The storefront's per-row access rules are enforced here as explicit
//! checks: a caller may act on rows they own, and admins may act on any
//! row. Product and coupon writes are admin-only; catalog reads, coupon
//! validation, and review listings are open to any caller.

use thiserror::Error;
use uuid::Uuid;

/// Role attached to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

/// Authenticated caller identity, as established by the authentication
/// layer upstream of this crate.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    #[must_use]
    pub fn customer(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Customer,
        }
    }

    #[must_use]
    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Access denied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("not permitted to {action}")]
    Denied { action: &'static str },
}

/// The caller must own the row, or hold the admin role.
pub fn ensure_owner(caller: &Caller, owner: Uuid, action: &'static str) -> Result<(), AccessError> {
    if caller.user_id == owner || caller.is_admin() {
        return Ok(());
    }

    Err(AccessError::Denied { action })
}

/// The caller must hold the admin role.
pub fn ensure_admin(caller: &Caller, action: &'static str) -> Result<(), AccessError> {
    if caller.is_admin() {
        return Ok(());
    }

    Err(AccessError::Denied { action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_act_on_own_rows() {
        let caller = Caller::customer(Uuid::now_v7());

        assert!(ensure_owner(&caller, caller.user_id, "read cart").is_ok());
    }

    #[test]
    fn other_customer_is_denied() {
        let caller = Caller::customer(Uuid::now_v7());

        let result = ensure_owner(&caller, Uuid::now_v7(), "read cart");

        assert_eq!(result, Err(AccessError::Denied { action: "read cart" }));
    }

    #[test]
    fn admin_may_act_on_any_row() {
        let caller = Caller::admin(Uuid::now_v7());

        assert!(ensure_owner(&caller, Uuid::now_v7(), "read cart").is_ok());
        assert!(ensure_admin(&caller, "edit products").is_ok());
    }

    #[test]
    fn customer_is_denied_admin_actions() {
        let caller = Caller::customer(Uuid::now_v7());

        let result = ensure_admin(&caller, "edit products");

        assert!(matches!(result, Err(AccessError::Denied { .. })));
    }
}
