//! Named write operations against the auth backend.
//!
//! Each set shares one `{ loading, error }` pair across its operations.
//! Nothing here touches cached query data; callers refresh the relevant
//! query after a successful write. Two operations of the same set running
//! concurrently overwrite each other's state.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use authadmin_core::{ClientError, ClientResult, Email, HttpMethod, InviteId, SessionId};

use crate::transport::{ApiRequest, Transport, path_segment};
use crate::types::{CreateInviteRequest, CreateUserRequest};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<ClientError>,
}

/// Runs one request at a time through the shared state contract.
#[derive(Clone)]
pub struct MutationRunner {
    transport: Arc<dyn Transport>,
    state: Arc<Mutex<MutationState>>,
}

impl MutationRunner {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            state: Arc::new(Mutex::new(MutationState::default())),
        }
    }

    pub async fn state(&self) -> MutationState {
        self.state.lock().await.clone()
    }

    /// Send `request`, recording a failure in state and returning it as well.
    pub async fn run(&self, operation: &'static str, request: ApiRequest) -> ClientResult<Value> {
        self.begin().await;
        let path = request.path.clone();
        let result = self.transport.send(request).await;
        self.finish(operation, &path, result).await
    }

    /// Like [`run`](Self::run) with `body` serialized as the JSON payload.
    ///
    /// A body that cannot be serialized fails the operation like a transport
    /// error would.
    pub async fn run_json<B>(&self, operation: &'static str, request: ApiRequest, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.begin().await;
        let path = request.path.clone();
        let result = match serde_json::to_value(body) {
            Ok(body) => self.transport.send(request.body(body)).await,
            Err(e) => Err(ClientError::invalid_request(format!("unserializable body: {e}"))),
        };
        self.finish(operation, &path, result).await
    }

    async fn begin(&self) {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;
    }

    async fn finish(&self, operation: &'static str, path: &str, result: ClientResult<Value>) -> ClientResult<Value> {
        let mut state = self.state.lock().await;
        state.loading = false;
        match &result {
            Ok(_) => tracing::info!(operation, path, "mutation succeeded"),
            Err(err) => {
                tracing::warn!(operation, path, error = %err, "mutation failed");
                state.error = Some(err.clone());
            }
        }
        result
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct UserMutations {
    runner: MutationRunner,
}

impl UserMutations {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            runner: MutationRunner::new(transport),
        }
    }

    pub async fn state(&self) -> MutationState {
        self.runner.state().await
    }

    pub async fn create(&self, user: &CreateUserRequest) -> ClientResult<Value> {
        self.runner
            .run_json("create_user", ApiRequest::new(HttpMethod::Post, "/users"), user)
            .await
    }

    pub async fn delete(&self, email: &Email) -> ClientResult<Value> {
        self.runner
            .run("delete_user", ApiRequest::new(HttpMethod::Delete, user_path(email)))
            .await
    }

    pub async fn reset_password(&self, email: &Email) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Post, "/forgot-password")
            .body(json!({ "email": email.as_str() }));
        self.runner.run("reset_password", req).await
    }

    pub async fn update_roles(&self, email: &Email, roles: &[String]) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Put, user_path(email)).body(json!({ "roles": roles }));
        self.runner.run("update_roles", req).await
    }

    pub async fn lock(&self, email: &Email) -> ClientResult<Value> {
        self.set_locked(email, true).await
    }

    pub async fn unlock(&self, email: &Email) -> ClientResult<Value> {
        self.set_locked(email, false).await
    }

    async fn set_locked(&self, email: &Email, locked: bool) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Put, user_path(email)).body(json!({ "locked": locked }));
        let op = if locked { "lock_user" } else { "unlock_user" };
        self.runner.run(op, req).await
    }
}

fn user_path(email: &Email) -> String {
    format!("/users/{}", path_segment(email.as_str()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SessionMutations {
    runner: MutationRunner,
}

impl SessionMutations {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            runner: MutationRunner::new(transport),
        }
    }

    pub async fn state(&self) -> MutationState {
        self.runner.state().await
    }

    pub async fn revoke(&self, id: &SessionId) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Delete, format!("/sessions/{}", path_segment(id.as_str())));
        self.runner.run("revoke_session", req).await
    }

    pub async fn revoke_all_for_user(&self, email: &Email) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Delete, "/sessions").query("user_email", email);
        self.runner.run("revoke_user_sessions", req).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Invites
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InviteMutations {
    runner: MutationRunner,
}

impl InviteMutations {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            runner: MutationRunner::new(transport),
        }
    }

    pub async fn state(&self) -> MutationState {
        self.runner.state().await
    }

    pub async fn create(&self, invite: &CreateInviteRequest) -> ClientResult<Value> {
        self.runner
            .run_json("create_invite", ApiRequest::new(HttpMethod::Post, "/invites"), invite)
            .await
    }

    pub async fn resend(&self, id: &InviteId) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Post, format!("/invites/{}/resend", path_segment(id.as_str())));
        self.runner.run("resend_invite", req).await
    }

    pub async fn revoke(&self, id: &InviteId) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Delete, format!("/invites/{}", path_segment(id.as_str())));
        self.runner.run("revoke_invite", req).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Impersonation
// ─────────────────────────────────────────────────────────────────────────────

/// Start and stop acting as another user. The host swaps its auth state
/// from the returned body.
#[derive(Clone)]
pub struct ImpersonationMutations {
    runner: MutationRunner,
}

impl ImpersonationMutations {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            runner: MutationRunner::new(transport),
        }
    }

    pub async fn state(&self) -> MutationState {
        self.runner.state().await
    }

    pub async fn start(&self, email: &Email) -> ClientResult<Value> {
        let req = ApiRequest::new(HttpMethod::Post, "/impersonate/start")
            .body(json!({ "email": email.as_str() }));
        self.runner.run("start_impersonation", req).await
    }

    pub async fn end(&self) -> ClientResult<Value> {
        self.runner
            .run("end_impersonation", ApiRequest::new(HttpMethod::Post, "/impersonate/end"))
            .await
    }
}
