use serde_json::json;

use crate::action::{Action, ApiCall, HttpMethod};
use crate::context::RequestContext;
use crate::pages::admin_gate;
use crate::uispec::{
    Button, ButtonVariant, Column, ColumnFormat, DataTable, Modal, Page, Row, Text, UiSpec,
};

const DENIED: &str = "You need administrator privileges to manage users.";

pub const CREATE_USER_MODAL: &str = "create-user";

pub fn users(ctx: &RequestContext) -> UiSpec {
    if let Err(denied) = admin_gate(ctx, DENIED) {
        return denied;
    }
    let opts = &ctx.options;

    let mut actions = Vec::new();
    if opts.flag("allow_user_creation") {
        actions.push(
            Button::new("Create User", ButtonVariant::Primary, Action::open_modal(CREATE_USER_MODAL))
                .icon("user-plus")
                .into(),
        );
    }

    let table = DataTable::new(ctx.auth_endpoint("/users"), columns(ctx), opts.page_size("page_size"))
        .row_actions(row_actions(ctx))
        .searchable(opts.flag("user_search_enabled"))
        .empty_message("No users found.");

    let mut children: Vec<UiSpec> = vec![table.into()];
    if opts.flag("allow_user_creation") {
        children.push(create_user_modal(ctx));
    }

    Page::new("Users")
        .description("Everyone who can sign in to this application.")
        .actions(actions)
        .children(children)
        .into()
}

fn columns(ctx: &RequestContext) -> Vec<Column> {
    let opts = &ctx.options;
    let mut columns = vec![Column::new("email", "Email", ColumnFormat::Text).sortable()];
    if opts.flag("show_user_roles_column") {
        columns.push(Column::new("roles", "Roles", ColumnFormat::Roles));
    }
    if opts.flag("show_user_status_column") {
        columns.push(Column::new("locked", "Locked", ColumnFormat::Boolean));
    }
    if opts.flag("show_email_verified_column") {
        columns.push(Column::new("email_verified", "Verified", ColumnFormat::Boolean));
    }
    if opts.flag("show_created_at_column") {
        columns.push(Column::new("created_at", "Created", ColumnFormat::Date).sortable());
    }
    if opts.flag("show_last_login_column") {
        columns.push(Column::new("last_login", "Last Login", ColumnFormat::Datetime).sortable());
    }
    columns
}

fn row_actions(ctx: &RequestContext) -> Vec<UiSpec> {
    let opts = &ctx.options;
    let mut actions: Vec<UiSpec> = vec![
        Button::new("View", ButtonVariant::Ghost, Action::navigate(ctx.route("/users/{email}")))
            .icon("eye")
            .into(),
    ];
    if opts.flag("allow_password_reset") {
        let reset = ApiCall::new(HttpMethod::Post, ctx.auth_endpoint("/forgot-password"))
            .body(json!({ "email": "{email}" }))
            .confirm("Send a password reset email to {email}?");
        actions.push(
            Button::new("Reset Password", ButtonVariant::Secondary, reset)
                .icon("key")
                .into(),
        );
    }
    if opts.flag("allow_user_deletion") {
        let delete = ApiCall::new(HttpMethod::Delete, ctx.auth_endpoint("/users/{email}"))
            .confirm("Delete {email}? This cannot be undone.")
            .on_success(Action::Refresh);
        actions.push(
            Button::new("Delete", ButtonVariant::Danger, delete)
                .icon("trash")
                .into(),
        );
    }
    actions
}

fn create_user_modal(ctx: &RequestContext) -> UiSpec {
    let create = ApiCall::new(HttpMethod::Post, ctx.auth_endpoint("/users"))
        .body(json!({
            "email": "{form.email}",
            "password": "{form.password}",
            "role": ctx.options.text("default_user_role"),
        }))
        .on_success(Action::CloseModal);
    Modal::new(
        CREATE_USER_MODAL,
        "Create User",
        vec![
            Text::muted("The user can change the password after the first sign in.").into(),
            Row::new(vec![
                Button::new("Cancel", ButtonVariant::Ghost, Action::CloseModal).into(),
                Button::new("Create", ButtonVariant::Primary, create).into(),
            ])
            .into(),
        ],
    )
    .into()
}
