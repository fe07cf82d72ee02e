use serde::Deserialize;
use serde_json::Value;

use authadmin_core::{ClientError, ClientResult, PaginatedResponse, QueryParams};

use crate::resources::{Resource, decode, paged};
use crate::transport::ApiRequest;
use crate::types::Invite;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InvitesEnvelope {
    List(Vec<Invite>),
    Page {
        #[serde(default)]
        invites: Vec<Invite>,
        #[serde(default)]
        total: Option<u64>,
    },
}

pub struct InvitesResource;

impl Resource for InvitesResource {
    type Item = Invite;

    const NAME: &'static str = "invites";

    fn request(params: &QueryParams) -> ApiRequest {
        paged("/invites", params)
    }

    fn normalize(body: Value, params: &QueryParams) -> ClientResult<PaginatedResponse<Invite>> {
        let envelope: InvitesEnvelope = decode(Self::NAME, body)?;
        Ok(match envelope {
            InvitesEnvelope::List(invites) => {
                let total = invites.len() as u64;
                PaginatedResponse::from_server(invites, total, params)
            }
            InvitesEnvelope::Page { invites, total } => {
                let total = total.unwrap_or(invites.len() as u64);
                PaginatedResponse::from_server(invites, total, params)
            }
        })
    }

    /// A backend with invites switched off answers with an error; show an
    /// empty list instead of alarming the admin.
    fn recover(err: &ClientError, params: &QueryParams) -> Option<PaginatedResponse<Invite>> {
        if err.is_feature_disabled() {
            tracing::warn!(error = %err, "invites disabled on backend; showing empty list");
            Some(PaginatedResponse::empty(params))
        } else {
            None
        }
    }
}
