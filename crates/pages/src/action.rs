//! Action descriptors attached to interactive nodes.
//!
//! Endpoints are plain strings; `{email}`/`{id}` placeholders are left for
//! the renderer to fill from the row or route it is acting on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use authadmin_core::HttpMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Navigate {
        to: String,
    },
    Api(ApiCall),
    OpenModal {
        modal: String,
    },
    CloseModal,
    Refresh,
    UpdateAuth {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        redirect: Option<String>,
    },
}

impl Action {
    pub fn navigate(to: impl Into<String>) -> Self {
        Self::Navigate { to: to.into() }
    }

    pub fn open_modal(modal: impl Into<String>) -> Self {
        Self::OpenModal {
            modal: modal.into(),
        }
    }

    pub fn update_auth(redirect: Option<String>) -> Self {
        Self::UpdateAuth { redirect }
    }
}

/// An authenticated call against the auth backend.
///
/// `method` and `endpoint` are always present; `on_success` chains one
/// follow-up action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCall {
    pub method: HttpMethod,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<Box<Action>>,
}

impl ApiCall {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            confirm: None,
            on_success: None,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn confirm(mut self, message: impl Into<String>) -> Self {
        self.confirm = Some(message.into());
        self
    }

    pub fn on_success(mut self, action: Action) -> Self {
        self.on_success = Some(Box::new(action));
        self
    }
}

impl From<ApiCall> for Action {
    fn from(value: ApiCall) -> Self {
        Action::Api(value)
    }
}
