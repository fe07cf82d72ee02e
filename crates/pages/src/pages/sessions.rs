use crate::action::{Action, ApiCall, HttpMethod};
use crate::context::RequestContext;
use crate::pages::admin_gate;
use crate::uispec::{Button, ButtonVariant, Column, ColumnFormat, DataTable, Page, UiSpec};

const DENIED: &str = "You need administrator privileges to manage sessions.";

pub fn sessions(ctx: &RequestContext) -> UiSpec {
    if let Err(denied) = admin_gate(ctx, DENIED) {
        return denied;
    }
    let opts = &ctx.options;

    let mut columns = vec![
        Column::new("user_email", "User", ColumnFormat::Text).sortable(),
        Column::new("created_at", "Started", ColumnFormat::Datetime).sortable(),
    ];
    if opts.flag("show_session_ip_column") {
        columns.push(Column::new("ip_address", "IP Address", ColumnFormat::Text));
    }
    if opts.flag("show_session_user_agent_column") {
        columns.push(Column::new("user_agent", "Device", ColumnFormat::Text));
    }
    if opts.flag("show_session_expiry_column") {
        columns.push(Column::new("expires_at", "Expires", ColumnFormat::Datetime));
    }

    let mut row_actions: Vec<UiSpec> = Vec::new();
    if opts.flag("allow_session_revoke") {
        let revoke = ApiCall::new(HttpMethod::Delete, ctx.auth_endpoint("/sessions/{id}"))
            .confirm("Revoke this session?")
            .on_success(Action::Refresh);
        row_actions.push(
            Button::new("Revoke", ButtonVariant::Danger, revoke)
                .icon("x-circle")
                .into(),
        );
        let revoke_all = ApiCall::new(
            HttpMethod::Delete,
            ctx.auth_endpoint("/sessions?user_email={user_email}"),
        )
        .confirm("Revoke every session of {user_email}?")
        .on_success(Action::Refresh);
        row_actions.push(
            Button::new("Revoke All for User", ButtonVariant::Secondary, revoke_all)
                .icon("log-out")
                .into(),
        );
    }

    let actions: Vec<UiSpec> = vec![
        Button::new("Refresh", ButtonVariant::Ghost, Action::Refresh)
            .icon("refresh-cw")
            .into(),
    ];

    let table = DataTable::new(
        ctx.auth_endpoint("/admin/sessions"),
        columns,
        opts.page_size("sessions_page_size"),
    )
    .row_actions(row_actions)
    .searchable(true)
    .empty_message("No active sessions.");

    Page::new("Sessions")
        .description("Signed-in devices across all users.")
        .actions(actions)
        .child(table)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> RequestContext {
        RequestContext::new(["admin"]).with_module_url("auth", "/api/auth")
    }

    fn table(spec: &UiSpec) -> &DataTable {
        let UiSpec::Page(page) = spec else { panic!("expected page") };
        let UiSpec::DataTable(table) = &page.children[0] else { panic!("expected table") };
        table
    }

    #[test]
    fn revoke_actions_follow_flag() {
        let spec = sessions(&admin());
        assert_eq!(table(&spec).row_actions.len(), 2);

        let spec = sessions(&admin().with_option("allow_session_revoke", false));
        assert!(table(&spec).row_actions.is_empty());
    }

    #[test]
    fn revoke_all_targets_user_filter() {
        let spec = sessions(&admin());
        let UiSpec::Button(button) = &table(&spec).row_actions[1] else { panic!() };
        let Action::Api(call) = &button.on_click else { panic!() };
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(call.endpoint, "/api/auth/sessions?user_email={user_email}");
    }

    #[test]
    fn table_reads_admin_sessions() {
        let spec = sessions(&admin().with_option("sessions_page_size", 25));
        let table = table(&spec);
        assert_eq!(table.endpoint, "/api/auth/admin/sessions");
        assert_eq!(table.page_size, 25);
        assert_eq!(table.columns.len(), 5);
    }

    #[test]
    fn optional_columns_drop_out() {
        let ctx = admin()
            .with_option("show_session_ip_column", false)
            .with_option("show_session_user_agent_column", false);
        let spec = sessions(&ctx);
        let keys: Vec<&str> = table(&spec).columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["user_email", "created_at", "expires_at"]);
    }
}
