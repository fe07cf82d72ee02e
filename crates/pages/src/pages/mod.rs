//! Page generators: `(RequestContext) -> UiSpec`.
//!
//! - No IO
//! - No randomness
//! - The admin check runs before anything else is looked at

pub mod audit_log;
pub mod dashboard;
pub mod invites;
pub mod sessions;
pub mod user_detail;
pub mod users;

pub use audit_log::audit_log;
pub use dashboard::dashboard;
pub use invites::invites;
pub use sessions::sessions;
pub use user_detail::user_detail;
pub use users::users;

use authadmin_auth::require_admin;

use crate::context::RequestContext;
use crate::uispec::{Alert, Page, UiSpec};

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";

/// Every page the feature pack contributes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PageKind {
    Dashboard,
    Users,
    UserDetail,
    Sessions,
    AuditLog,
    Invites,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::Dashboard,
        PageKind::Users,
        PageKind::UserDetail,
        PageKind::Sessions,
        PageKind::AuditLog,
        PageKind::Invites,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Dashboard => "dashboard",
            PageKind::Users => "users",
            PageKind::UserDetail => "userDetail",
            PageKind::Sessions => "sessions",
            PageKind::AuditLog => "auditLog",
            PageKind::Invites => "invites",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn generate(&self, ctx: &RequestContext) -> UiSpec {
        match self {
            PageKind::Dashboard => dashboard(ctx),
            PageKind::Users => users(ctx),
            PageKind::UserDetail => user_detail(ctx),
            PageKind::Sessions => sessions(ctx),
            PageKind::AuditLog => audit_log(ctx),
            PageKind::Invites => invites(ctx),
        }
    }
}

/// Terminal alert for callers without the admin role.
pub fn access_denied(message: &str) -> UiSpec {
    Alert::error(ACCESS_DENIED_TITLE, message).into()
}

/// Page holding only an alert explaining that a feature is switched off.
pub fn feature_disabled(title: &str, message: &str) -> UiSpec {
    Page::new(title)
        .child(Alert::error("Feature Disabled", message))
        .into()
}

/// `Err(alert)` when the caller is not an admin.
pub(crate) fn admin_gate(ctx: &RequestContext, message: &str) -> Result<(), UiSpec> {
    require_admin(&ctx.user_roles).map_err(|err| {
        tracing::debug!(error = %err, "admin page requested without admin role");
        access_denied(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uispec::AlertVariant;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    fn is_access_denied(spec: &UiSpec) -> bool {
        matches!(
            spec,
            UiSpec::Alert(Alert { variant: AlertVariant::Error, title, .. }) if title == ACCESS_DENIED_TITLE
        )
    }

    #[test]
    fn page_names_round_trip() {
        for kind in PageKind::ALL {
            assert_eq!(PageKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(PageKind::parse("billing"), None);
    }

    #[test]
    fn every_admin_page_serializes_to_known_types() {
        let known = [
            "Page", "Card", "Alert", "Row", "Button", "DataTable", "Async", "Modal", "Text",
            "StatsGrid", "Conditional",
        ];
        let ctx = RequestContext::new(["admin"])
            .with_module_url("auth", "/api/auth")
            .with_option("show_impersonate_button", true)
            .with_option("allow_audit_export", true);
        for kind in PageKind::ALL {
            let spec = kind.generate(&ctx);
            spec.walk(&mut |node| assert!(known.contains(&node.kind())));
            serde_json::to_string(&spec).unwrap();
        }
    }

    fn option_map() -> impl Strategy<Value = Map<String, Value>> {
        let names: Vec<&'static str> = crate::options::OPTION_SCHEMA
            .iter()
            .filter(|d| matches!(d.default, crate::options::OptionDefault::Boolean(_)))
            .map(|d| d.name)
            .collect();
        prop::collection::vec(any::<bool>(), names.len()).prop_map(move |flags| {
            names
                .iter()
                .zip(flags)
                .map(|(name, flag)| (name.to_string(), Value::Bool(flag)))
                .collect()
        })
    }

    fn context(roles: Vec<&'static str>, options: Map<String, Value>) -> RequestContext {
        let mut ctx = RequestContext::new(roles).with_module_url("auth", "/api/auth");
        for (name, value) in options {
            ctx = ctx.with_option(name, value);
        }
        ctx
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        #[test]
        fn generation_is_deterministic(options in option_map()) {
            let ctx = context(vec!["admin"], options);
            for kind in PageKind::ALL {
                let first = kind.generate(&ctx);
                let second = kind.generate(&ctx.clone());
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(
                    serde_json::to_string(&first).unwrap(),
                    serde_json::to_string(&second).unwrap()
                );
            }
        }

        /// No option combination gets a non-admin past the gate.
        #[test]
        fn non_admins_always_get_access_denied(
            options in option_map(),
            roles in prop::sample::subsequence(vec!["user", "support", "owner", "Admin"], 0..4),
        ) {
            let ctx = context(roles, options);
            for kind in PageKind::ALL {
                let spec = kind.generate(&ctx);
                prop_assert!(is_access_denied(&spec), "{} leaked: {:?}", kind.as_str(), spec);
            }
        }
    }
}
