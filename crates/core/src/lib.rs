//! `authadmin-core`: shared primitives for the auth admin feature pack.
//!
//! This crate contains **pure** building blocks (no I/O): pagination
//! arithmetic, typed identifiers and the client error model.

pub mod error;
pub mod id;
pub mod method;
pub mod pagination;

pub use error::{ClientError, ClientResult};
pub use id::{Email, InviteId, SessionId};
pub use method::HttpMethod;
pub use pagination::{PaginatedResponse, QueryParams, SortOrder, total_pages};
