//! Detail page for a single user.
//!
//! The user is addressed through the `{email}` placeholder, which the
//! renderer takes from the current route.

use serde_json::json;

use crate::action::{Action, ApiCall, HttpMethod};
use crate::context::RequestContext;
use crate::pages::admin_gate;
use crate::uispec::{
    AsyncNode, Button, ButtonVariant, Card, Column, ColumnFormat, Conditional, DataTable, Modal,
    Page, Row, StatItem, StatsGrid, Text, UiSpec,
};

const DENIED: &str = "You need administrator privileges to view user details.";

pub const EDIT_ROLES_MODAL: &str = "edit-roles";

pub fn user_detail(ctx: &RequestContext) -> UiSpec {
    if let Err(denied) = admin_gate(ctx, DENIED) {
        return denied;
    }
    let opts = &ctx.options;

    let mut children = vec![profile_card(ctx), sessions_card(ctx)];
    if opts.flag("allow_role_edit") {
        children.push(edit_roles_modal(ctx));
    }

    Page::new("User Details")
        .description("{email}")
        .actions(actions(ctx))
        .children(children)
        .into()
}

fn actions(ctx: &RequestContext) -> Vec<UiSpec> {
    let opts = &ctx.options;
    let user = ctx.auth_endpoint("/users/{email}");
    let mut actions: Vec<UiSpec> = Vec::new();

    if opts.flag("allow_role_edit") {
        actions.push(
            Button::new("Edit Roles", ButtonVariant::Secondary, Action::open_modal(EDIT_ROLES_MODAL))
                .icon("shield")
                .into(),
        );
    }

    if opts.flag("allow_user_lock") {
        let unlock = ApiCall::new(HttpMethod::Put, user.clone())
            .body(json!({ "locked": false }))
            .on_success(Action::Refresh);
        let lock = ApiCall::new(HttpMethod::Put, user.clone())
            .body(json!({ "locked": true }))
            .confirm("Lock {email}? They will be signed out everywhere.")
            .on_success(Action::Refresh);
        actions.push(
            Conditional::new(
                "user.locked",
                Button::new("Unlock", ButtonVariant::Secondary, unlock).icon("unlock"),
            )
            .otherwise(Button::new("Lock", ButtonVariant::Warning, lock).icon("lock"))
            .into(),
        );
    }

    if opts.flag("allow_session_revoke") {
        let revoke_all = ApiCall::new(
            HttpMethod::Delete,
            ctx.auth_endpoint("/sessions?user_email={email}"),
        )
        .confirm("Sign {email} out of every device?")
        .on_success(Action::Refresh);
        actions.push(
            Button::new("Revoke All Sessions", ButtonVariant::Secondary, revoke_all)
                .icon("log-out")
                .into(),
        );
    }

    if opts.flag("show_impersonate_button") {
        let redirect = opts.text("impersonate_redirect");
        let start = ApiCall::new(HttpMethod::Post, ctx.auth_endpoint("/impersonate/start"))
            .body(json!({ "email": "{email}" }))
            .confirm("Start acting as {email}?")
            .on_success(Action::update_auth(Some(redirect)));
        actions.push(
            Button::new(
                opts.text("impersonate_button_text"),
                ButtonVariant::from_name(&opts.text("impersonate_button_color")),
                start,
            )
            .icon("user-check")
            .into(),
        );
    }

    if opts.flag("allow_user_deletion") {
        let delete = ApiCall::new(HttpMethod::Delete, user)
            .confirm("Delete {email}? This cannot be undone.")
            .on_success(Action::navigate(ctx.route("/users")));
        actions.push(
            Button::new("Delete User", ButtonVariant::Danger, delete)
                .icon("trash")
                .into(),
        );
    }

    actions
}

fn profile_card(ctx: &RequestContext) -> UiSpec {
    let summary = StatsGrid {
        stats: vec![
            StatItem::new("Role", "{role}"),
            StatItem::new("Verified", "{email_verified}"),
            StatItem::new("Created", "{created_at}"),
            StatItem::new("Last Login", "{last_login}"),
        ],
    };
    Card::new("Profile")
        .child(
            AsyncNode::new(ctx.auth_endpoint("/users/{email}"), summary).loading("Loading user..."),
        )
        .into()
}

fn sessions_card(ctx: &RequestContext) -> UiSpec {
    let opts = &ctx.options;
    let mut row_actions: Vec<UiSpec> = Vec::new();
    if opts.flag("allow_session_revoke") {
        let revoke = ApiCall::new(HttpMethod::Delete, ctx.auth_endpoint("/sessions/{id}"))
            .confirm("Revoke this session?")
            .on_success(Action::Refresh);
        row_actions.push(Button::new("Revoke", ButtonVariant::Danger, revoke).into());
    }
    let table = DataTable::new(
        ctx.auth_endpoint("/admin/sessions?user_email={email}"),
        vec![
            Column::new("created_at", "Started", ColumnFormat::Datetime),
            Column::new("ip_address", "IP Address", ColumnFormat::Text),
            Column::new("expires_at", "Expires", ColumnFormat::Datetime),
        ],
        opts.page_size("sessions_page_size"),
    )
    .row_actions(row_actions)
    .empty_message("No active sessions.");
    Card::new("Sessions").child(table).into()
}

fn edit_roles_modal(ctx: &RequestContext) -> UiSpec {
    let endpoint = ctx.auth_endpoint("/users/{email}");
    let role_buttons: Vec<UiSpec> = ctx
        .options
        .list("available_roles")
        .into_iter()
        .map(|role| {
            let set = ApiCall::new(HttpMethod::Put, endpoint.clone())
                .body(json!({ "roles": [role] }))
                .on_success(Action::CloseModal);
            Button::new(role, ButtonVariant::Secondary, set).into()
        })
        .collect();
    Modal::new(
        EDIT_ROLES_MODAL,
        "Edit Roles",
        vec![
            Text::muted("Pick the role {email} should have.").into(),
            Row::new(role_buttons).into(),
        ],
    )
    .into()
}
