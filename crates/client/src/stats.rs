//! Dashboard counters.
//!
//! No backend endpoint returns these directly; they are derived from the
//! users list, the sessions total and the pending invites.

use std::sync::Arc;

use serde_json::Value;

use authadmin_core::{ClientResult, QueryParams};

use crate::query::{QueryCell, QueryState};
use crate::resources::invites::InvitesEnvelope;
use crate::resources::sessions::{self, SessionsEnvelope};
use crate::resources::users::UsersEnvelope;
use crate::resources::{Resource, SessionsResource, decode};
use crate::transport::{ApiRequest, Transport};
use crate::types::{AuthStats, User};

pub struct StatsQuery {
    transport: Arc<dyn Transport>,
    cell: QueryCell<AuthStats>,
}

impl StatsQuery {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cell: QueryCell::new(),
        }
    }

    pub async fn mount(transport: Arc<dyn Transport>) -> Self {
        let query = Self::new(transport);
        query.refresh().await;
        query
    }

    pub async fn state(&self) -> QueryState<AuthStats> {
        self.cell.snapshot().await
    }

    pub async fn refresh(&self) {
        let seq = self.cell.begin().await;
        let result = self.load().await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "stats fetch failed");
        }
        self.cell.settle("stats", seq, result).await;
    }

    async fn load(&self) -> ClientResult<AuthStats> {
        let (users, sessions, invites) = tokio::join!(
            self.transport.send(ApiRequest::get("/users")),
            self.transport.send(SessionsResource::request(&QueryParams::new(1, 1))),
            self.transport.send(ApiRequest::get("/invites")),
        );

        let users = decode::<UsersEnvelope>("users", users?)?.into_users();
        let active_sessions = decode::<SessionsEnvelope>("sessions", sessions?)
            .map(|env| sessions::normalize(env, &QueryParams::new(1, 1)).total)?;
        let pending_invites = match invites {
            Ok(body) => count_pending(body)?,
            Err(err) if err.is_feature_disabled() => {
                tracing::debug!(error = %err, "invites disabled; counting none pending");
                0
            }
            Err(err) => return Err(err),
        };

        Ok(summarize(&users, active_sessions, pending_invites))
    }
}

fn count_pending(body: Value) -> ClientResult<u64> {
    let invites = match decode::<InvitesEnvelope>("invites", body)? {
        InvitesEnvelope::List(invites) | InvitesEnvelope::Page { invites, .. } => invites,
    };
    Ok(invites.iter().filter(|i| i.is_pending()).count() as u64)
}

pub fn summarize(users: &[User], active_sessions: u64, pending_invites: u64) -> AuthStats {
    AuthStats {
        total_users: users.len() as u64,
        locked_users: users.iter().filter(|u| u.locked).count() as u64,
        admin_users: users.iter().filter(|u| u.is_admin()).count() as u64,
        active_sessions,
        pending_invites,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use authadmin_core::ClientError;
    use serde_json::json;

    fn users() -> Value {
        json!([
            { "email": "root@x.io", "role": "admin" },
            { "email": "old@x.io", "roles": ["admin", "user"], "locked": true },
            { "email": "joe@x.io" }
        ])
    }

    #[tokio::test]
    async fn counters_come_from_three_endpoints() {
        let transport = Arc::new(
            FakeTransport::new()
                .route("/users", Ok(users()))
                .route("/admin/sessions", Ok(json!({ "sessions": [], "total": 42 })))
                .route(
                    "/invites",
                    Ok(json!({ "invites": [
                        { "id": "1", "email": "a@x.io", "status": "pending" },
                        { "id": "2", "email": "b@x.io", "status": "accepted" },
                        { "id": "3", "email": "c@x.io" }
                    ] })),
                ),
        );
        let stats = StatsQuery::mount(transport.clone()).await;

        let state = stats.state().await;
        assert!(state.error.is_none());
        assert_eq!(
            state.data.unwrap(),
            AuthStats {
                total_users: 3,
                locked_users: 1,
                admin_users: 2,
                active_sessions: 42,
                pending_invites: 2,
            }
        );
        let sessions_req = transport
            .requests()
            .into_iter()
            .find(|r| r.path == "/admin/sessions")
            .unwrap();
        assert_eq!(sessions_req.query_value("limit"), Some("1"));
    }

    #[tokio::test]
    async fn disabled_invites_count_as_zero() {
        let transport = Arc::new(
            FakeTransport::new()
                .route("/users", Ok(users()))
                .route("/admin/sessions", Ok(json!({ "sessions": [], "total": 0 })))
                .route("/invites", Err(ClientError::http(404, "Invite system disabled"))),
        );
        let stats = StatsQuery::mount(transport).await;
        let state = stats.state().await;
        assert!(state.error.is_none());
        assert_eq!(state.data.unwrap().pending_invites, 0);
    }

    #[tokio::test]
    async fn users_failure_surfaces() {
        let transport = Arc::new(
            FakeTransport::new()
                .route("/users", Err(ClientError::http(403, "Forbidden")))
                .route("/admin/sessions", Ok(json!({ "sessions": [], "total": 0 })))
                .route("/invites", Ok(json!([]))),
        );
        let stats = StatsQuery::mount(transport).await;
        let state = stats.state().await;
        assert!(state.data.is_none());
        assert_eq!(state.error.unwrap().status(), Some(403));
    }
}
