//! Feature-pack options read by the page generators.
//!
//! Options arrive already resolved by the host. Generators never validate
//! them: a missing or mistyped value falls back to the schema default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum OptionDefault {
    Boolean(bool),
    Integer(i64),
    String(&'static str),
    Array(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    None,
    Range { min: i64, max: i64 },
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionDef {
    pub name: &'static str,
    pub description: &'static str,
    pub default: OptionDefault,
    pub constraint: Constraint,
}

const fn flag(name: &'static str, default: bool, description: &'static str) -> OptionDef {
    OptionDef {
        name,
        description,
        default: OptionDefault::Boolean(default),
        constraint: Constraint::None,
    }
}

const fn int(name: &'static str, default: i64, min: i64, max: i64, description: &'static str) -> OptionDef {
    OptionDef {
        name,
        description,
        default: OptionDefault::Integer(default),
        constraint: Constraint::Range { min, max },
    }
}

const fn text(name: &'static str, default: &'static str, description: &'static str) -> OptionDef {
    OptionDef {
        name,
        description,
        default: OptionDefault::String(default),
        constraint: Constraint::None,
    }
}

const fn choice(
    name: &'static str,
    default: &'static str,
    values: &'static [&'static str],
    description: &'static str,
) -> OptionDef {
    OptionDef {
        name,
        description,
        default: OptionDefault::String(default),
        constraint: Constraint::OneOf(values),
    }
}

const fn list(name: &'static str, default: &'static [&'static str], description: &'static str) -> OptionDef {
    OptionDef {
        name,
        description,
        default: OptionDefault::Array(default),
        constraint: Constraint::None,
    }
}

pub const BUTTON_COLOURS: &[&str] = &["primary", "secondary", "danger", "warning", "ghost"];

/// Every option the admin pages understand, with its default.
pub const OPTION_SCHEMA: &[OptionDef] = &[
    // General
    text("route_prefix", "/admin/auth", "Host route under which the admin pages are mounted"),
    int("page_size", 20, 5, 100, "Rows per page on the users table"),
    // Dashboard
    flag("show_active_sessions_card", true, "Show the active sessions counter on the dashboard"),
    flag("show_recent_activity", true, "Show recent audit events on the dashboard"),
    int("recent_activity_limit", 10, 1, 50, "Number of recent events on the dashboard"),
    int("dashboard_refresh_interval", 30, 0, 3600, "Seconds between dashboard refreshes, 0 disables"),
    // Users
    flag("allow_user_creation", true, "Allow admins to create users"),
    flag("allow_user_deletion", true, "Allow admins to delete users"),
    flag("allow_password_reset", true, "Allow admins to send password reset emails"),
    flag("allow_role_edit", true, "Allow admins to change user roles"),
    flag("allow_user_lock", true, "Allow admins to lock and unlock accounts"),
    flag("user_search_enabled", true, "Enable email search on the users table"),
    flag("show_user_roles_column", true, "Show the roles column"),
    flag("show_user_status_column", true, "Show the locked/active column"),
    flag("show_email_verified_column", false, "Show the email verification column"),
    flag("show_created_at_column", true, "Show the creation date column"),
    flag("show_last_login_column", true, "Show the last login column"),
    list("available_roles", &["user", "admin"], "Roles offered when editing a user"),
    text("default_user_role", "user", "Role given to users created from the admin page"),
    // Sessions
    flag("allow_session_revoke", true, "Allow admins to revoke sessions"),
    int("sessions_page_size", 50, 5, 200, "Rows per page on the sessions table"),
    flag("show_session_ip_column", true, "Show the IP address column"),
    flag("show_session_user_agent_column", true, "Show the user agent column"),
    flag("show_session_expiry_column", true, "Show the expiry column"),
    // Audit log
    flag("show_audit_log", true, "Enable the audit log page"),
    int("audit_log_page_size", 50, 10, 500, "Rows per page on the audit log"),
    list(
        "audit_log_filters",
        &["login", "logout", "password_reset", "user_created", "user_deleted", "role_changed"],
        "Event types offered as filters",
    ),
    flag("show_audit_ip_column", true, "Show the IP address column on the audit log"),
    flag("allow_audit_export", false, "Offer audit log export buttons"),
    list("audit_log_export_formats", &["csv", "json"], "Export formats offered"),
    // Invites
    flag("show_invite_management", true, "Enable the invites page"),
    flag("allow_invite_creation", true, "Allow admins to send invites"),
    flag("allow_invite_resend", true, "Allow admins to resend invites"),
    flag("allow_invite_revoke", true, "Allow admins to revoke invites"),
    int("invites_page_size", 20, 5, 100, "Rows per page on the invites table"),
    int("invite_expiry_days", 7, 1, 90, "Days before an invite expires"),
    flag("show_invite_expiry_column", true, "Show the expiry column on the invites table"),
    // Impersonation
    flag("show_impersonate_button", false, "Show the impersonate button on user details"),
    text("impersonate_button_text", "Impersonate", "Label of the impersonate button"),
    choice("impersonate_button_color", "warning", BUTTON_COLOURS, "Colour of the impersonate button"),
    text("impersonate_redirect", "/", "Where to go after impersonation starts"),
];

pub fn lookup(name: &str) -> Option<&'static OptionDef> {
    OPTION_SCHEMA.iter().find(|def| def.name == name)
}

/// Resolved option values as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageOptions(Map<String, Value>);

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        match self.raw(name).and_then(Value::as_bool) {
            Some(value) => value,
            None => matches!(
                lookup(name).map(|d| d.default),
                Some(OptionDefault::Boolean(true))
            ),
        }
    }

    pub fn int(&self, name: &str) -> i64 {
        match self.raw(name).and_then(Value::as_i64) {
            Some(value) => value,
            None => match lookup(name).map(|d| d.default) {
                Some(OptionDefault::Integer(value)) => value,
                _ => 0,
            },
        }
    }

    /// An integer option used as a row count; never below one.
    pub fn page_size(&self, name: &str) -> u32 {
        u32::try_from(self.int(name).max(1)).unwrap_or(u32::MAX)
    }

    pub fn text(&self, name: &str) -> String {
        match self.raw(name).and_then(Value::as_str) {
            Some(value) => value.to_string(),
            None => match lookup(name).map(|d| d.default) {
                Some(OptionDefault::String(value)) => value.to_string(),
                _ => String::new(),
            },
        }
    }

    pub fn list(&self, name: &str) -> Vec<String> {
        match self.raw(name).and_then(Value::as_array) {
            Some(values) => values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => match lookup(name).map(|d| d.default) {
                Some(OptionDefault::Array(values)) => {
                    values.iter().map(|v| v.to_string()).collect()
                }
                _ => Vec::new(),
            },
        }
    }
}
