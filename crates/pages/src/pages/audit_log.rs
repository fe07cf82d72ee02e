use crate::action::{ApiCall, HttpMethod};
use crate::context::RequestContext;
use crate::pages::{admin_gate, feature_disabled};
use crate::uispec::{Button, ButtonVariant, Column, ColumnFormat, DataTable, Page, UiSpec};

const DENIED: &str = "You need administrator privileges to view the audit log.";
const DISABLED: &str = "The audit log is disabled for this application.";

pub fn audit_log(ctx: &RequestContext) -> UiSpec {
    if let Err(denied) = admin_gate(ctx, DENIED) {
        return denied;
    }
    let opts = &ctx.options;
    if !opts.flag("show_audit_log") {
        return feature_disabled("Audit Log", DISABLED);
    }

    let mut actions: Vec<UiSpec> = Vec::new();
    if opts.flag("allow_audit_export") {
        for format in opts.list("audit_log_export_formats") {
            let export = ApiCall::new(
                HttpMethod::Get,
                ctx.auth_endpoint(&format!("/audit-log?format={format}")),
            );
            actions.push(
                Button::new(
                    format!("Export {}", format.to_uppercase()),
                    ButtonVariant::Secondary,
                    export,
                )
                .icon("download")
                .into(),
            );
        }
    }

    let mut columns = vec![
        Column::new("timestamp", "When", ColumnFormat::Datetime).sortable(),
        Column::new("event_type", "Event", ColumnFormat::Badge).sortable(),
        Column::new("user_email", "User", ColumnFormat::Text),
    ];
    if opts.flag("show_audit_ip_column") {
        columns.push(Column::new("ip_address", "IP Address", ColumnFormat::Text));
    }
    columns.push(Column::new("details", "Details", ColumnFormat::Text));

    let table = DataTable::new(
        ctx.auth_endpoint("/audit-log"),
        columns,
        opts.page_size("audit_log_page_size"),
    )
    .searchable(true)
    .filters(opts.list("audit_log_filters"))
    .empty_message("No events recorded yet.");

    Page::new("Audit Log")
        .description("Security-relevant events, newest first.")
        .actions(actions)
        .child(table)
        .into()
}
