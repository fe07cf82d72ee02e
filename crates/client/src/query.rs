//! Reactive binding between query parameters and a fetched page.
//!
//! A query owns `{ data, loading, error }` and refetches when its parameters
//! change or when asked to. Fetches are tagged with a sequence number and
//! only the latest issued one may settle the state; an older response that
//! arrives late is dropped.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use authadmin_core::{ClientError, ClientResult, PaginatedResponse, QueryParams};

use crate::resources::Resource;
use crate::transport::Transport;

/// Observable state of a query.
///
/// `data == None` with `error == None` means "not loaded yet"; check `error`
/// before reading `None` as "no results".
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

impl<T> QueryState<T> {
    fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// Shared state plus the sequence counter guarding it.
pub(crate) struct QueryCell<T> {
    state: Mutex<QueryState<T>>,
    issued: AtomicU64,
}

impl<T: Clone> QueryCell<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(QueryState::initial()),
            issued: AtomicU64::new(0),
        }
    }

    /// Enter `Loading` and return the number of the fetch being issued.
    pub(crate) async fn begin(&self) -> u64 {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().await.loading = true;
        seq
    }

    /// Apply the outcome of fetch `seq` unless a newer fetch was issued.
    ///
    /// Failures keep the previous data. Returns whether the outcome was applied.
    pub(crate) async fn settle(&self, name: &str, seq: u64, result: ClientResult<T>) -> bool {
        match result {
            Ok(data) => self.settle_parts(name, seq, Some(data), None).await,
            Err(err) => self.settle_parts(name, seq, None, Some(err)).await,
        }
    }

    /// Like [`settle`](Self::settle), for outcomes that carry data and an
    /// error at once. `None` data keeps what was there.
    pub(crate) async fn settle_parts(
        &self,
        name: &str,
        seq: u64,
        data: Option<T>,
        error: Option<ClientError>,
    ) -> bool {
        let mut state = self.state.lock().await;
        let latest = self.issued.load(Ordering::SeqCst);
        if seq != latest {
            tracing::debug!(query = name, seq, latest, "discarding stale response");
            return false;
        }
        if data.is_some() {
            state.data = data;
        }
        state.error = error;
        state.loading = false;
        true
    }

    pub(crate) async fn snapshot(&self) -> QueryState<T> {
        self.state.lock().await.clone()
    }
}

/// Paginated query over one [`Resource`].
pub struct ResourceQuery<R: Resource> {
    transport: Arc<dyn Transport>,
    params: Mutex<QueryParams>,
    cell: QueryCell<PaginatedResponse<R::Item>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceQuery<R> {
    /// Build the query without fetching; state starts as loading.
    pub fn new(transport: Arc<dyn Transport>, params: QueryParams) -> Self {
        Self {
            transport,
            params: Mutex::new(params),
            cell: QueryCell::new(),
            _resource: PhantomData,
        }
    }

    /// Build the query and run its initial fetch.
    pub async fn mount(transport: Arc<dyn Transport>, params: QueryParams) -> Self {
        let query = Self::new(transport, params);
        query.refresh().await;
        query
    }

    /// Refetch with the current parameters.
    pub async fn refresh(&self) {
        let params = self.params.lock().await.clone();
        self.fetch(params).await;
    }

    /// Replace the parameters, refetching when a fetch-relevant field changed.
    ///
    /// Sort-only changes refetch only for resources that act on sorting.
    pub async fn set_params(&self, next: QueryParams) {
        let changed = {
            let mut params = self.params.lock().await;
            let changed =
                params.fetch_changed(&next) || (R::SORT_AWARE && params.sort_changed(&next));
            *params = next.clone();
            changed
        };
        if changed {
            self.fetch(next).await;
        }
    }

    pub async fn params(&self) -> QueryParams {
        self.params.lock().await.clone()
    }

    pub async fn state(&self) -> QueryState<PaginatedResponse<R::Item>> {
        self.cell.snapshot().await
    }

    async fn fetch(&self, params: QueryParams) {
        let seq = self.cell.begin().await;
        let result = self
            .transport
            .send(R::request(&params))
            .await
            .and_then(|body| R::normalize(body, &params));

        let result = match result {
            Ok(page) => Ok(page),
            Err(err) => match R::recover(&err, &params) {
                Some(page) => Ok(page),
                None => {
                    tracing::warn!(query = R::NAME, error = %err, "fetch failed");
                    Err(err)
                }
            },
        };
        self.cell.settle(R::NAME, seq, result).await;
    }
}

/// Users, filtered and sliced on the client.
pub type UsersQuery = ResourceQuery<crate::resources::UsersResource>;
pub type SessionsQuery = ResourceQuery<crate::resources::SessionsResource>;
pub type AuditLogQuery = ResourceQuery<crate::resources::AuditLogResource>;
/// Invites; a disabled invite subsystem reads as an empty list.
pub type InvitesQuery = ResourceQuery<crate::resources::InvitesResource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use authadmin_core::SortOrder;
    use serde_json::json;
    use std::time::Duration;

    fn users(n: usize) -> serde_json::Value {
        json!((0..n).map(|i| json!({ "email": format!("user{i}@x.io") })).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn starts_loading_without_data() {
        let query = UsersQuery::new(Arc::new(FakeTransport::new()), QueryParams::default());
        let state = query.state().await;
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn mount_fetches_once() {
        let transport = Arc::new(FakeTransport::new().reply(users(3)));
        let query = UsersQuery::mount(transport.clone(), QueryParams::default()).await;

        let state = query.state().await;
        assert!(!state.loading);
        assert_eq!(state.data.unwrap().total, 3);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn failure_keeps_previous_data() {
        let transport = Arc::new(
            FakeTransport::new()
                .reply(users(2))
                .fail(ClientError::http(500, "Internal Server Error")),
        );
        let query = UsersQuery::mount(transport, QueryParams::default()).await;
        query.refresh().await;

        let state = query.state().await;
        assert!(!state.loading);
        assert_eq!(state.data.unwrap().total, 2);
        assert_eq!(state.error.unwrap().to_string(), "Internal Server Error");
    }

    #[tokio::test]
    async fn success_clears_error() {
        let transport = Arc::new(
            FakeTransport::new()
                .fail(ClientError::network("refused"))
                .reply(users(1)),
        );
        let query = UsersQuery::mount(transport, QueryParams::default()).await;
        assert!(query.state().await.error.is_some());

        query.refresh().await;
        let state = query.state().await;
        assert!(state.error.is_none());
        assert_eq!(state.data.unwrap().total, 1);
    }

    #[tokio::test]
    async fn unchanged_params_do_not_refetch() {
        let transport = Arc::new(FakeTransport::new().reply(json!({ "sessions": [], "total": 0 })));
        let query = SessionsQuery::mount(transport.clone(), QueryParams::new(1, 50)).await;

        query.set_params(QueryParams::new(1, 50)).await;
        query
            .set_params(QueryParams::new(1, 50).with_sort("created_at", SortOrder::Desc))
            .await;
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn sort_change_refetches_sort_aware_resources() {
        let page = json!({ "events": [], "total": 0 });
        let transport = Arc::new(FakeTransport::new().reply(page.clone()).reply(page));
        let query = AuditLogQuery::mount(transport.clone(), QueryParams::new(1, 50)).await;

        query
            .set_params(QueryParams::new(1, 50).with_sort("timestamp", SortOrder::Desc))
            .await;
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.last_request().query_value("sort_order"), Some("desc"));
    }

    #[tokio::test]
    async fn search_change_refetches() {
        let transport = Arc::new(FakeTransport::new().reply(users(5)).reply(users(5)));
        let query = UsersQuery::mount(transport.clone(), QueryParams::new(1, 10)).await;

        query.set_params(QueryParams::new(1, 10).with_search("user1")).await;
        let state = query.state().await;
        assert_eq!(state.data.unwrap().total, 1);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn sessions_third_page() {
        let sessions: Vec<_> = (0..25)
            .map(|i| json!({ "id": format!("s{i}"), "user_email": "a@x.io" }))
            .collect();
        let transport = Arc::new(FakeTransport::new().reply(json!({ "sessions": sessions, "total": 125 })));
        let query = SessionsQuery::mount(transport.clone(), QueryParams::new(3, 50)).await;

        let page = query.state().await.data.unwrap();
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.total, 125);
        assert_eq!(page.total_pages, 3);
        assert_eq!(transport.last_request().query_value("offset"), Some("100"));
    }

    #[tokio::test]
    async fn disabled_invites_settle_as_empty_success() {
        let transport = Arc::new(FakeTransport::new().fail(ClientError::http(400, "Invites are disabled")));
        let query = InvitesQuery::mount(transport, QueryParams::default()).await;

        let state = query.state().await;
        let page = state.data.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn odd_row_encodings_do_not_lose_the_page() {
        let transport = Arc::new(FakeTransport::new().reply(json!({
            "events": [{ "id": 17, "event_type": "login", "timestamp": "2026-01-02 03:04:05" }],
            "total": 1
        })));
        let query = AuditLogQuery::mount(transport, QueryParams::default()).await;
        let state = query.state().await;
        assert!(state.error.is_none(), "{:?}", state.error);
        let page = state.data.unwrap();
        assert_eq!(page.items[0].id, "17");
        assert!(page.items[0].timestamp.is_some());

        let transport = Arc::new(FakeTransport::new().reply(json!([
            { "email": "a@x.io", "created_at": "2026-01-02 03:04:05" },
            { "email": "b@x.io", "created_at": "not a date" }
        ])));
        let query = UsersQuery::mount(transport, QueryParams::default()).await;
        let state = query.state().await;
        assert!(state.error.is_none(), "{:?}", state.error);
        let page = state.data.unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items[0].created_at.is_some());
        assert!(page.items[1].created_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn last_issued_fetch_wins() {
        let transport = Arc::new(
            FakeTransport::new()
                .reply(users(30))
                // slow answer to the older search
                .delayed(Duration::from_millis(200), Ok(users(30)))
                .delayed(Duration::from_millis(10), Ok(users(30))),
        );
        let query = UsersQuery::mount(transport.clone(), QueryParams::new(1, 50)).await;

        tokio::join!(
            query.set_params(QueryParams::new(1, 50).with_search("user1")),
            async {
                tokio::time::sleep(Duration::from_millis(1)).await;
                query.set_params(QueryParams::new(1, 50).with_search("user2")).await;
            }
        );

        let state = query.state().await;
        assert!(!state.loading);
        let page = state.data.unwrap();
        // user2, user20..user29
        assert_eq!(page.total, 11);
        assert!(page.items.iter().all(|u| u.email.starts_with("user2")));
        assert_eq!(transport.requests().len(), 3);
    }
}
