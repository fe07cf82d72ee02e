//! `authadmin-client`
//!
//! **Responsibility:** talk to the auth backend on behalf of the admin pages.
//!
//! This crate provides:
//! - `AuthClientConfig` and the `Transport` seam (`HttpTransport` over reqwest)
//! - Per-resource envelope normalization into `PaginatedResponse`
//! - `ResourceQuery`, a `{ data, loading, error }` binding with
//!   last-issued-wins refetching
//! - Mutation sets for users, sessions, invites and impersonation
//! - Dashboard stats and feature-switch resolution
//!
//! State is pull-based: writes never patch query data, callers refresh.

pub mod config;
pub mod features;
pub mod mutation;
pub mod query;
pub mod resources;
pub mod stats;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::{AUTH_TOKEN_KEY, AuthClientConfig, DEFAULT_AUTH_BASE_URL, HOST_CONFIG_PATH, MemoryTokenStore, RenderSide, TokenStore};
pub use features::{ConfigLayer, ConfigQuery, merge};
pub use mutation::{ImpersonationMutations, InviteMutations, MutationRunner, MutationState, SessionMutations, UserMutations};
pub use query::{AuditLogQuery, InvitesQuery, QueryState, ResourceQuery, SessionsQuery, UsersQuery};
pub use resources::{AuditLogResource, InvitesResource, Resource, SessionsResource, UsersResource};
pub use stats::StatsQuery;
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use types::{AuditLogEntry, AuthAdminConfig, AuthStats, CreateInviteRequest, CreateUserRequest, Invite, Session, User};

pub use authadmin_core::{ClientError, ClientResult, PaginatedResponse, QueryParams, SortOrder};
