//! Per-resource fetch recipes.
//!
//! Each backend endpoint answers with its own envelope. A [`Resource`] knows
//! how to ask for a page and how to turn the envelope into the canonical
//! [`PaginatedResponse`].

pub mod audit_log;
pub mod invites;
pub mod sessions;
pub mod users;

pub use audit_log::AuditLogResource;
pub use invites::InvitesResource;
pub use sessions::SessionsResource;
pub use users::UsersResource;

use serde::de::DeserializeOwned;
use serde_json::Value;

use authadmin_core::{ClientError, ClientResult, PaginatedResponse, QueryParams};

use crate::transport::ApiRequest;

pub trait Resource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    /// Whether a change of `sort_by`/`sort_order` alone refetches.
    const SORT_AWARE: bool = false;

    fn request(params: &QueryParams) -> ApiRequest;

    fn normalize(body: Value, params: &QueryParams) -> ClientResult<PaginatedResponse<Self::Item>>;

    /// Turn a failed fetch into a successful page instead of an error.
    fn recover(_err: &ClientError, _params: &QueryParams) -> Option<PaginatedResponse<Self::Item>> {
        None
    }
}

/// Standard `limit`/`offset` pair.
pub(crate) fn paged(path: &str, params: &QueryParams) -> ApiRequest {
    ApiRequest::get(path)
        .query("limit", params.limit())
        .query("offset", params.offset())
}

pub(crate) fn decode<T: DeserializeOwned>(resource: &str, body: Value) -> ClientResult<T> {
    serde_json::from_value(body)
        .map_err(|e| ClientError::decode(format!("unexpected {resource} response: {e}")))
}
