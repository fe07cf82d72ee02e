use thiserror::Error;

use crate::{ADMIN_ROLE, RoleSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("forbidden: missing role '{0}'")]
    MissingRole(String),
}

/// Check that the caller holds `role`.
///
/// - No IO
/// - No panics
pub fn require_role(roles: &RoleSet, role: &str) -> Result<(), AccessError> {
    if roles.contains(role) {
        Ok(())
    } else {
        Err(AccessError::MissingRole(role.to_string()))
    }
}

/// Gate shared by every admin page.
pub fn require_admin(roles: &RoleSet) -> Result<(), AccessError> {
    require_role(roles, ADMIN_ROLE)
}
