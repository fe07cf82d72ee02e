//! Feature switches of the auth backend.
//!
//! Two sources feed [`AuthAdminConfig`]: the backend's `/config` answer
//! (flags may sit at the top level or under `features` / `data`) and the
//! host's static document at [`HOST_CONFIG_PATH`] (camelCase keys under
//! `auth`). Per field the backend wins, then the host, then the default.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use authadmin_core::{ClientError, ClientResult};

use crate::config::HOST_CONFIG_PATH;
use crate::query::{QueryCell, QueryState};
use crate::resources::decode;
use crate::transport::{ApiRequest, Transport};
use crate::types::AuthAdminConfig;

/// One source's view of the switches; absent fields defer to the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
    #[serde(default, alias = "allowSignup")]
    pub allow_signup: Option<bool>,
    #[serde(default, alias = "passwordReset")]
    pub password_reset: Option<bool>,
    #[serde(default, alias = "twoFactorAuth")]
    pub two_factor_auth: Option<bool>,
    #[serde(default, alias = "auditLog")]
    pub audit_log: Option<bool>,
    #[serde(default, alias = "magicLinkLogin")]
    pub magic_link_login: Option<bool>,
    #[serde(default, alias = "emailVerification")]
    pub email_verification: Option<bool>,
    #[serde(default, alias = "oauthProviders")]
    pub oauth_providers: Option<Vec<String>>,
}

impl ConfigLayer {
    /// Read the backend answer, unwrapping a `features` or `data` envelope.
    pub fn from_api(body: Value) -> ClientResult<Self> {
        let flags = match body {
            Value::Object(mut map) => {
                let nested = ["features", "data"]
                    .into_iter()
                    .find(|key| map.get(*key).is_some_and(Value::is_object));
                match nested.and_then(|key| map.remove(key)) {
                    Some(inner) => inner,
                    None => Value::Object(map),
                }
            }
            Value::Null => return Ok(Self::default()),
            other => other,
        };
        decode("config", flags)
    }

    /// Read the host document; only its `auth` section matters.
    pub fn from_host(body: Value) -> ClientResult<Self> {
        match body.get("auth") {
            Some(auth) => decode("host config", auth.clone()),
            None => Ok(Self::default()),
        }
    }
}

/// Field-wise `api`, then `host`, then [`AuthAdminConfig::default`].
pub fn merge(api: &ConfigLayer, host: &ConfigLayer) -> AuthAdminConfig {
    let defaults = AuthAdminConfig::default();
    let pick = |a: Option<bool>, h: Option<bool>, d: bool| a.or(h).unwrap_or(d);
    AuthAdminConfig {
        allow_signup: pick(api.allow_signup, host.allow_signup, defaults.allow_signup),
        password_reset: pick(api.password_reset, host.password_reset, defaults.password_reset),
        two_factor_auth: pick(api.two_factor_auth, host.two_factor_auth, defaults.two_factor_auth),
        audit_log: pick(api.audit_log, host.audit_log, defaults.audit_log),
        magic_link_login: pick(api.magic_link_login, host.magic_link_login, defaults.magic_link_login),
        email_verification: pick(
            api.email_verification,
            host.email_verification,
            defaults.email_verification,
        ),
        oauth_providers: api
            .oauth_providers
            .clone()
            .or_else(|| host.oauth_providers.clone())
            .unwrap_or(defaults.oauth_providers),
    }
}

/// Resolves [`AuthAdminConfig`] from the backend and the host document.
///
/// `host` talks to the host origin, not the auth backend; without one only
/// the backend leg runs.
pub struct ConfigQuery {
    api: Arc<dyn Transport>,
    host: Option<Arc<dyn Transport>>,
    cell: QueryCell<AuthAdminConfig>,
}

impl ConfigQuery {
    pub fn new(api: Arc<dyn Transport>, host: Option<Arc<dyn Transport>>) -> Self {
        Self {
            api,
            host,
            cell: QueryCell::new(),
        }
    }

    pub async fn mount(api: Arc<dyn Transport>, host: Option<Arc<dyn Transport>>) -> Self {
        let query = Self::new(api, host);
        query.refresh().await;
        query
    }

    pub async fn state(&self) -> QueryState<AuthAdminConfig> {
        self.cell.snapshot().await
    }

    /// Effective config; defaults until a load has settled.
    pub async fn config(&self) -> AuthAdminConfig {
        self.state().await.data.unwrap_or_default()
    }

    pub async fn refresh(&self) {
        let seq = self.cell.begin().await;
        let (api, host) = tokio::join!(self.fetch_api(), self.fetch_host());

        if let Some(Err(err)) = &host {
            tracing::warn!(error = %err, "host config document unavailable");
        }
        let host_layer = host.and_then(Result::ok);

        let (data, error) = match api {
            Ok(api_layer) => (merge(&api_layer, &host_layer.unwrap_or_default()), None),
            Err(err) => {
                tracing::warn!(error = %err, "backend config unavailable");
                match host_layer {
                    Some(host_layer) => (merge(&ConfigLayer::default(), &host_layer), None),
                    None => (AuthAdminConfig::default(), Some(err)),
                }
            }
        };
        self.cell.settle_parts("config", seq, Some(data), error).await;
    }

    /// `/config`, falling back to `/features` on backends that lack it.
    async fn fetch_api(&self) -> ClientResult<ConfigLayer> {
        let body = match self.api.send(ApiRequest::get("/config")).await {
            Err(ClientError::Http { status: 404, .. }) => {
                tracing::debug!("/config not found; trying /features");
                self.api.send(ApiRequest::get("/features")).await?
            }
            other => other?,
        };
        ConfigLayer::from_api(body)
    }

    async fn fetch_host(&self) -> Option<ClientResult<ConfigLayer>> {
        let host = self.host.as_ref()?;
        Some(
            host.send(ApiRequest::get(HOST_CONFIG_PATH))
                .await
                .and_then(ConfigLayer::from_host),
        )
    }
}
