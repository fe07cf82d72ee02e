//! `authadmin-pages`: declarative admin pages for the auth feature pack.
//!
//! Each generator turns a [`RequestContext`] into a [`UiSpec`] tree that a
//! separate renderer interprets. Generators are pure: same context, same
//! tree.

pub mod action;
pub mod context;
pub mod options;
pub mod pages;
pub mod uispec;

pub use action::{Action, ApiCall, HttpMethod};
pub use context::RequestContext;
pub use options::{OPTION_SCHEMA, OptionDef, PageOptions};
pub use pages::{
    PageKind, audit_log, dashboard, invites, sessions, user_detail, users,
};
pub use uispec::UiSpec;
