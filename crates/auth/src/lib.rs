//! `authadmin-auth`: role checks for the admin surface.
//!
//! The host authenticates the caller upstream and hands over a plain role
//! list; this crate only answers questions about that list. No I/O.

pub mod authorize;
pub mod roles;
pub mod user_roles;

pub use authorize::{AccessError, require_admin, require_role};
pub use roles::{ADMIN_ROLE, DEFAULT_ROLE, Role, RoleSet};
pub use user_roles::{canonical_roles, primary_role};
