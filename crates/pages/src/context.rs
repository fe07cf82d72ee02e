use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use authadmin_auth::{Role, RoleSet};

use crate::options::PageOptions;

/// Module name under which the host registers the auth backend URL.
pub const AUTH_MODULE: &str = "auth";

/// Everything a page generator may look at.
///
/// Built by the host per request and never mutated by the generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub user_roles: RoleSet,
    #[serde(default)]
    pub options: PageOptions,
    #[serde(default)]
    pub module_urls: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new<R: Into<Role>>(roles: impl IntoIterator<Item = R>) -> Self {
        Self {
            user_roles: roles.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.set(name, value);
        self
    }

    pub fn with_module_url(mut self, module: impl Into<String>, url: impl Into<String>) -> Self {
        self.module_urls.insert(module.into(), url.into());
        self
    }

    /// Base URL of the auth backend; empty when the host registered none.
    pub fn auth_url(&self) -> &str {
        self.module_urls
            .get(AUTH_MODULE)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// `auth_url` followed by `path`, verbatim. Placeholders stay in place.
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.auth_url(), path)
    }

    /// Host route for an admin page, e.g. `route("/users")`.
    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.options.text("route_prefix"), path)
    }
}
