use serde::Deserialize;
use serde_json::Value;

use authadmin_core::{ClientResult, PaginatedResponse, QueryParams};

use crate::resources::{Resource, decode, paged};
use crate::transport::ApiRequest;
use crate::types::AuditLogEntry;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditLogEnvelope {
    pub events: Vec<AuditLogEntry>,
    #[serde(default)]
    pub total: Option<u64>,
}

pub struct AuditLogResource;

impl Resource for AuditLogResource {
    type Item = AuditLogEntry;

    const NAME: &'static str = "audit log";
    const SORT_AWARE: bool = true;

    fn request(params: &QueryParams) -> ApiRequest {
        let mut req = paged("/audit-log", params);
        if let Some(email) = params.search_term() {
            req = req.query("user_email", email);
        }
        if let Some(sort_by) = &params.sort_by {
            req = req.query("sort_by", sort_by);
        }
        if let Some(order) = params.sort_order {
            req = req.query("sort_order", order.as_str());
        }
        req
    }

    fn normalize(body: Value, params: &QueryParams) -> ClientResult<PaginatedResponse<AuditLogEntry>> {
        let envelope: AuditLogEnvelope = decode(Self::NAME, body)?;
        // Without a total, assume this page is the last one.
        let total = envelope
            .total
            .unwrap_or(params.offset() + envelope.events.len() as u64);
        Ok(PaginatedResponse::from_server(envelope.events, total, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authadmin_core::SortOrder;
    use serde_json::json;

    #[test]
    fn sort_and_filter_are_forwarded() {
        let params = QueryParams::new(2, 25)
            .with_search("ops@x.io")
            .with_sort("timestamp", SortOrder::Desc);
        let req = AuditLogResource::request(&params);
        assert_eq!(req.path, "/audit-log");
        assert_eq!(req.query_value("offset"), Some("25"));
        assert_eq!(req.query_value("user_email"), Some("ops@x.io"));
        assert_eq!(req.query_value("sort_by"), Some("timestamp"));
        assert_eq!(req.query_value("sort_order"), Some("desc"));
    }

    #[test]
    fn events_envelope_is_normalized() {
        let body = json!({
            "events": [
                { "id": "e1", "event_type": "login", "timestamp": "2026-01-02T03:04:05Z" }
            ],
            "total": 41
        });
        let page = AuditLogResource::normalize(body, &QueryParams::new(1, 20)).unwrap();
        assert_eq!(page.items[0].event_type, "login");
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn array_body_is_rejected() {
        assert!(AuditLogResource::normalize(json!([]), &QueryParams::default()).is_err());
    }

    #[test]
    fn missing_total_is_inferred_from_page() {
        let events: Vec<Value> = (0..20)
            .map(|i| json!({ "id": i, "event_type": "login" }))
            .collect();
        let page = AuditLogResource::normalize(json!({ "events": events }), &QueryParams::new(2, 20)).unwrap();
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total, 40);
        assert_eq!(page.total_pages, 2);
    }
}
