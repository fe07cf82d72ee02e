use serde_json::json;

use crate::action::{Action, ApiCall, HttpMethod};
use crate::context::RequestContext;
use crate::pages::{admin_gate, feature_disabled};
use crate::uispec::{
    Button, ButtonVariant, Column, ColumnFormat, DataTable, Modal, Page, Row, Text, UiSpec,
};

const DENIED: &str = "You need administrator privileges to manage invites.";
const DISABLED: &str = "Invite management is disabled for this application.";

pub const CREATE_INVITE_MODAL: &str = "create-invite";

pub fn invites(ctx: &RequestContext) -> UiSpec {
    if let Err(denied) = admin_gate(ctx, DENIED) {
        return denied;
    }
    let opts = &ctx.options;
    if !opts.flag("show_invite_management") {
        return feature_disabled("Invites", DISABLED);
    }

    let mut actions: Vec<UiSpec> = Vec::new();
    if opts.flag("allow_invite_creation") {
        actions.push(
            Button::new("Send Invite", ButtonVariant::Primary, Action::open_modal(CREATE_INVITE_MODAL))
                .icon("send")
                .into(),
        );
    }

    let mut columns = vec![
        Column::new("email", "Email", ColumnFormat::Text).sortable(),
        Column::new("role", "Role", ColumnFormat::Badge),
        Column::new("status", "Status", ColumnFormat::Badge),
        Column::new("invited_by", "Invited By", ColumnFormat::Text),
    ];
    if opts.flag("show_invite_expiry_column") {
        columns.push(Column::new("expires_at", "Expires", ColumnFormat::Datetime));
    }

    let mut row_actions: Vec<UiSpec> = Vec::new();
    if opts.flag("allow_invite_resend") {
        let resend = ApiCall::new(HttpMethod::Post, ctx.auth_endpoint("/invites/{id}/resend"))
            .on_success(Action::Refresh);
        row_actions.push(Button::new("Resend", ButtonVariant::Secondary, resend).icon("repeat").into());
    }
    if opts.flag("allow_invite_revoke") {
        let revoke = ApiCall::new(HttpMethod::Delete, ctx.auth_endpoint("/invites/{id}"))
            .confirm("Revoke the invite for {email}?")
            .on_success(Action::Refresh);
        row_actions.push(Button::new("Revoke", ButtonVariant::Danger, revoke).icon("x").into());
    }

    let table = DataTable::new(
        ctx.auth_endpoint("/invites"),
        columns,
        opts.page_size("invites_page_size"),
    )
    .row_actions(row_actions)
    .empty_message("No pending invites.");

    let mut children: Vec<UiSpec> = vec![table.into()];
    if opts.flag("allow_invite_creation") {
        children.push(create_invite_modal(ctx));
    }

    Page::new("Invites")
        .description("Pending invitations to join this application.")
        .actions(actions)
        .children(children)
        .into()
}

fn create_invite_modal(ctx: &RequestContext) -> UiSpec {
    let send = ApiCall::new(HttpMethod::Post, ctx.auth_endpoint("/invites"))
        .body(json!({
            "email": "{form.email}",
            "role": ctx.options.text("default_user_role"),
            "expires_in_days": ctx.options.int("invite_expiry_days"),
        }))
        .on_success(Action::CloseModal);
    Modal::new(
        CREATE_INVITE_MODAL,
        "Send Invite",
        vec![
            Text::muted(format!(
                "The invite link stays valid for {} days.",
                ctx.options.int("invite_expiry_days")
            ))
            .into(),
            Row::new(vec![
                Button::new("Cancel", ButtonVariant::Ghost, Action::CloseModal).into(),
                Button::new("Send", ButtonVariant::Primary, send).into(),
            ])
            .into(),
        ],
    )
    .into()
}
