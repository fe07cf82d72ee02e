use crate::action::Action;
use crate::context::RequestContext;
use crate::pages::admin_gate;
use crate::uispec::{
    AsyncNode, Button, ButtonVariant, Card, Column, ColumnFormat, DataTable, Page, Row, StatItem,
    StatsGrid, UiSpec,
};

const DENIED: &str = "You need administrator privileges to view the auth dashboard.";

/// Landing page: sessions counter, quick actions, recent activity.
///
/// Sections are independent; a disabled one leaves the others in the same
/// relative order.
pub fn dashboard(ctx: &RequestContext) -> UiSpec {
    if let Err(denied) = admin_gate(ctx, DENIED) {
        return denied;
    }
    let opts = &ctx.options;

    let mut children = Vec::new();

    if opts.flag("show_active_sessions_card") {
        children.push(active_sessions_card(ctx));
    }

    children.push(quick_actions_card(ctx));

    if opts.flag("show_recent_activity") {
        children.push(recent_activity_card(ctx));
    }

    Page::new("Authentication")
        .description("Manage users, sessions and access for this application.")
        .children(children)
        .into()
}

fn active_sessions_card(ctx: &RequestContext) -> UiSpec {
    let counter = StatsGrid {
        stats: vec![StatItem::new("Active Sessions", "{total}").icon("activity")],
    };
    Card::new("Active Sessions")
        .child(
            AsyncNode::new(ctx.auth_endpoint("/admin/sessions?limit=1"), counter)
                .loading("Counting sessions...")
                .refresh_every(ctx.options.int("dashboard_refresh_interval")),
        )
        .into()
}

fn quick_actions_card(ctx: &RequestContext) -> UiSpec {
    let opts = &ctx.options;
    let mut buttons: Vec<UiSpec> = vec![
        Button::new("Manage Users", ButtonVariant::Primary, Action::navigate(ctx.route("/users")))
            .icon("users")
            .into(),
        Button::new("View Sessions", ButtonVariant::Secondary, Action::navigate(ctx.route("/sessions")))
            .icon("monitor")
            .into(),
    ];
    if opts.flag("show_audit_log") {
        buttons.push(
            Button::new("Audit Log", ButtonVariant::Secondary, Action::navigate(ctx.route("/audit-log")))
                .icon("file-text")
                .into(),
        );
    }
    if opts.flag("show_invite_management") {
        buttons.push(
            Button::new("Invites", ButtonVariant::Secondary, Action::navigate(ctx.route("/invites")))
                .icon("mail")
                .into(),
        );
    }
    Card::new("Quick Actions").child(Row::new(buttons)).into()
}

fn recent_activity_card(ctx: &RequestContext) -> UiSpec {
    let columns = vec![
        Column::new("event_type", "Event", ColumnFormat::Badge),
        Column::new("user_email", "User", ColumnFormat::Text),
        Column::new("timestamp", "When", ColumnFormat::Datetime),
    ];
    let table = DataTable::new(
        ctx.auth_endpoint("/audit-log"),
        columns,
        ctx.options.page_size("recent_activity_limit"),
    )
    .empty_message("No recent activity.");
    Card::new("Recent Activity").child(table).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uispec::{Alert, AlertVariant};

    fn admin() -> RequestContext {
        RequestContext::new(["admin"]).with_module_url("auth", "/api/auth")
    }

    fn card_titles(spec: &UiSpec) -> Vec<String> {
        let UiSpec::Page(page) = spec else {
            panic!("expected page, got {spec:?}");
        };
        page.children
            .iter()
            .map(|child| match child {
                UiSpec::Card(card) => card.title.clone().unwrap_or_default(),
                other => panic!("expected card, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn non_admin_gets_access_denied() {
        let spec = dashboard(&RequestContext::new(["user"]));
        match spec {
            UiSpec::Alert(Alert { variant, title, .. }) => {
                assert_eq!(variant, AlertVariant::Error);
                assert_eq!(title, "Access Denied");
            }
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn sections_in_stable_order() {
        assert_eq!(
            card_titles(&dashboard(&admin())),
            vec!["Active Sessions", "Quick Actions", "Recent Activity"]
        );
    }

    #[test]
    fn sections_are_independent() {
        let ctx = admin().with_option("show_active_sessions_card", false);
        assert_eq!(card_titles(&dashboard(&ctx)), vec!["Quick Actions", "Recent Activity"]);

        let ctx = admin().with_option("show_recent_activity", false);
        assert_eq!(card_titles(&dashboard(&ctx)), vec!["Active Sessions", "Quick Actions"]);

        let ctx = admin()
            .with_option("show_active_sessions_card", false)
            .with_option("show_recent_activity", false);
        assert_eq!(card_titles(&dashboard(&ctx)), vec!["Quick Actions"]);
    }

    #[test]
    fn sessions_counter_points_at_backend() {
        let UiSpec::Page(page) = dashboard(&admin()) else { panic!() };
        let UiSpec::Card(card) = &page.children[0] else { panic!() };
        let UiSpec::Async(node) = &card.children[0] else { panic!() };
        assert_eq!(node.endpoint, "/api/auth/admin/sessions?limit=1");
        assert_eq!(node.render.kind(), "StatsGrid");
        assert_eq!(node.refresh_interval, Some(30));
    }

    #[test]
    fn zero_refresh_interval_fetches_once() {
        let ctx = admin().with_option("dashboard_refresh_interval", 0);
        let UiSpec::Page(page) = dashboard(&ctx) else { panic!() };
        let UiSpec::Card(card) = &page.children[0] else { panic!() };
        let UiSpec::Async(node) = &card.children[0] else { panic!() };
        assert_eq!(node.refresh_interval, None);
        let json = serde_json::to_value(node).unwrap();
        assert!(json.get("refreshInterval").is_none());
    }

    #[test]
    fn quick_actions_follow_feature_flags() {
        let ctx = admin()
            .with_option("show_audit_log", false)
            .with_option("show_invite_management", true);
        let UiSpec::Page(page) = dashboard(&ctx) else { panic!() };
        let UiSpec::Card(card) = &page.children[1] else { panic!() };
        let UiSpec::Row(row) = &card.children[0] else { panic!() };
        let labels: Vec<&str> = row
            .children
            .iter()
            .map(|b| match b {
                UiSpec::Button(b) => b.label.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(labels, vec!["Manage Users", "View Sessions", "Invites"]);
    }

    #[test]
    fn recent_activity_uses_limit() {
        let ctx = admin().with_option("recent_activity_limit", 5);
        let UiSpec::Page(page) = dashboard(&ctx) else { panic!() };
        let UiSpec::Card(card) = &page.children[2] else { panic!() };
        let UiSpec::DataTable(table) = &card.children[0] else { panic!() };
        assert_eq!(table.page_size, 5);
        assert_eq!(table.endpoint, "/api/auth/audit-log");
        assert!(table.row_actions.is_empty());
    }
}
