use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Role that unlocks every admin page.
pub const ADMIN_ROLE: &str = "admin";

/// Role assumed when a user record carries none.
pub const DEFAULT_ROLE: &str = "user";

/// Role identifier used for RBAC.
///
/// Roles are opaque strings at this layer; the auth backend defines them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn admin() -> Self {
        Self(Cow::Borrowed(ADMIN_ROLE))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.as_str() == ADMIN_ROLE
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The caller's roles as handed over by the host.
///
/// Ordered so that anything derived from it is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r.as_str() == role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(ADMIN_ROLE)
    }

    pub fn insert(&mut self, role: impl Into<Role>) -> bool {
        self.0.insert(role.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<R: Into<Role>> FromIterator<R> for RoleSet {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_set_membership() {
        let roles: RoleSet = ["user", "admin"].into_iter().collect();
        assert!(roles.is_admin());
        assert!(roles.contains("user"));
        assert!(!roles.contains("owner"));
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn role_set_deserializes_from_list() {
        let roles: RoleSet = serde_json::from_str(r#"["user","user","support"]"#).unwrap();
        assert_eq!(roles.len(), 2);
        assert!(!roles.is_admin());
    }
}
