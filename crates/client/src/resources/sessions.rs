use serde::Deserialize;
use serde_json::Value;

use authadmin_core::{ClientResult, PaginatedResponse, QueryParams};

use crate::resources::{Resource, decode, paged};
use crate::transport::ApiRequest;
use crate::types::Session;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SessionsEnvelope {
    /// Full list with no server-side paging.
    List(Vec<Session>),
    Page {
        sessions: Vec<Session>,
        #[serde(default)]
        total: Option<u64>,
    },
}

pub struct SessionsResource;

impl Resource for SessionsResource {
    type Item = Session;

    const NAME: &'static str = "sessions";

    fn request(params: &QueryParams) -> ApiRequest {
        let req = paged("/admin/sessions", params);
        match params.search_term() {
            Some(email) => req.query("user_email", email),
            None => req,
        }
    }

    fn normalize(body: Value, params: &QueryParams) -> ClientResult<PaginatedResponse<Session>> {
        let envelope: SessionsEnvelope = decode(Self::NAME, body)?;
        Ok(normalize(envelope, params))
    }
}

pub fn normalize(envelope: SessionsEnvelope, params: &QueryParams) -> PaginatedResponse<Session> {
    match envelope {
        SessionsEnvelope::List(sessions) => PaginatedResponse::from_full_list(sessions, params),
        SessionsEnvelope::Page { sessions, total } => {
            // Without a total, assume this page is the last one.
            let total = total.unwrap_or(params.offset() + sessions.len() as u64);
            PaginatedResponse::from_server(sessions, total, params)
        }
    }
}
