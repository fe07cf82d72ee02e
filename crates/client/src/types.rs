//! DTOs exchanged with the auth backend.
//!
//! Shapes follow the backend; unknown fields are ignored and optional ones
//! default, so minor backend additions do not break decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use authadmin_auth::{Role, canonical_roles, primary_role};
use authadmin_core::{InviteId, SessionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current single-role field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Legacy multi-role field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Canonical role list; see [`authadmin_auth::user_roles`].
    pub fn effective_roles(&self) -> Vec<Role> {
        canonical_roles(self.role.as_deref(), &self.roles)
    }

    pub fn primary_role(&self) -> Role {
        primary_role(self.role.as_deref(), &self.roles)
    }

    pub fn is_admin(&self) -> bool {
        self.effective_roles().iter().any(Role::is_admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "lenient::id")]
    pub id: SessionId,
    pub user_email: String,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    #[serde(deserialize_with = "lenient::id")]
    pub id: InviteId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Invite {
    /// Invites without a status are treated as pending.
    pub fn is_pending(&self) -> bool {
        self.status.as_deref().is_none_or(|s| s == "pending")
    }
}

/// Dashboard counters derived from the users, sessions and invites
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStats {
    pub total_users: u64,
    pub locked_users: u64,
    pub admin_users: u64,
    pub active_sessions: u64,
    pub pending_invites: u64,
}

/// Feature switches of the auth backend, after merging every source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAdminConfig {
    pub allow_signup: bool,
    pub password_reset: bool,
    pub two_factor_auth: bool,
    pub audit_log: bool,
    pub magic_link_login: bool,
    pub email_verification: bool,
    pub oauth_providers: Vec<String>,
}

impl Default for AuthAdminConfig {
    fn default() -> Self {
        Self {
            allow_signup: false,
            password_reset: true,
            two_factor_auth: false,
            audit_log: true,
            magic_link_login: false,
            email_verification: true,
            oauth_providers: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
            name: None,
            role: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateInviteRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

impl CreateInviteRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: None,
            expires_in_days: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient field decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Backends disagree on id and timestamp encodings. One odd field must not
/// fail a whole page, so ids accept strings or numbers and unreadable
/// timestamps become `None`.
pub mod lenient {
    use std::fmt::Display;

    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Epoch values above this are taken as milliseconds.
    const MILLIS_THRESHOLD: i64 = 100_000_000_000;

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

    pub fn id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<String>,
        T::Error: Display,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => return Err(D::Error::custom(format!("expected string or number id, got {other}"))),
        };
        T::try_from(raw).map_err(D::Error::custom)
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => parse_timestamp(&s),
            Some(Value::Number(n)) => n.as_i64().and_then(from_epoch),
            _ => None,
        })
    }

    /// RFC 3339 first, then common naive layouts read as UTC.
    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
        if value.abs() >= MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        }
    }
}
