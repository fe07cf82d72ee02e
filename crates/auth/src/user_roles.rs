//! Canonical role resolution for user records.
//!
//! Backends disagree on the shape: newer ones send a single `role` string,
//! older ones a `roles` array. The canonical form here is an ordered,
//! de-duplicated list:
//!
//! 1. `role`, when present and non-blank, comes first;
//! 2. entries of `roles` follow in their original order;
//! 3. an empty result becomes `[DEFAULT_ROLE]`.
//!
//! The primary role is the first entry, which matches the
//! `role || roles[0] || "user"` precedence older pages used.

use crate::{DEFAULT_ROLE, Role};

pub fn canonical_roles(role: Option<&str>, roles: &[String]) -> Vec<Role> {
    let mut out: Vec<Role> = Vec::with_capacity(roles.len() + 1);

    let candidates = role.into_iter().chain(roles.iter().map(String::as_str));
    for name in candidates.map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|r| r.as_str() == name) {
            out.push(Role::new(name.to_string()));
        }
    }

    if out.is_empty() {
        out.push(Role::new(DEFAULT_ROLE));
    }
    out
}

pub fn primary_role(role: Option<&str>, roles: &[String]) -> Role {
    canonical_roles(role, roles)
        .into_iter()
        .next()
        .unwrap_or_else(|| Role::new(DEFAULT_ROLE))
}
