//! Users: the backend returns every user at once, so filtering, sorting
//! and paging all happen here.

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::Value;

use authadmin_core::{ClientResult, PaginatedResponse, QueryParams, SortOrder};

use crate::resources::{Resource, decode};
use crate::transport::ApiRequest;
use crate::types::User;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UsersEnvelope {
    List(Vec<User>),
    Wrapped { users: Vec<User> },
}

impl UsersEnvelope {
    pub fn into_users(self) -> Vec<User> {
        match self {
            UsersEnvelope::List(users) | UsersEnvelope::Wrapped { users } => users,
        }
    }
}

pub struct UsersResource;

impl Resource for UsersResource {
    type Item = User;

    const NAME: &'static str = "users";
    const SORT_AWARE: bool = true;

    fn request(_params: &QueryParams) -> ApiRequest {
        ApiRequest::get("/users")
    }

    fn normalize(body: Value, params: &QueryParams) -> ClientResult<PaginatedResponse<User>> {
        let envelope: UsersEnvelope = decode(Self::NAME, body)?;
        Ok(normalize(envelope, params))
    }
}

/// Filter, then sort, then slice. `total` counts the filtered set.
pub fn normalize(envelope: UsersEnvelope, params: &QueryParams) -> PaginatedResponse<User> {
    let mut users = filter_by_email(envelope.into_users(), params.search_term());
    sort_users(&mut users, params);
    PaginatedResponse::from_full_list(users, params)
}

/// Case-insensitive substring match on the email.
pub fn filter_by_email(users: Vec<User>, term: Option<&str>) -> Vec<User> {
    let Some(term) = term else {
        return users;
    };
    let needle = term.to_lowercase();
    users
        .into_iter()
        .filter(|u| u.email.to_lowercase().contains(&needle))
        .collect()
}

fn sort_users(users: &mut [User], params: &QueryParams) {
    let cmp: fn(&User, &User) -> Ordering = match params.sort_by.as_deref() {
        Some("email") => |a, b| a.email.cmp(&b.email),
        Some("created_at") => |a, b| a.created_at.cmp(&b.created_at),
        Some("last_login") => |a, b| a.last_login.cmp(&b.last_login),
        _ => return,
    };
    match params.sort_order.unwrap_or_default() {
        SortOrder::Asc => users.sort_by(cmp),
        SortOrder::Desc => users.sort_by(|a, b| cmp(b, a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn user(email: &str) -> User {
        serde_json::from_value(json!({ "email": email })).unwrap()
    }

    fn envelope(emails: &[&str]) -> UsersEnvelope {
        UsersEnvelope::List(emails.iter().map(|e| user(e)).collect())
    }

    fn emails(page: &PaginatedResponse<User>) -> Vec<&str> {
        page.items.iter().map(|u| u.email.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_and_total_is_filtered() {
        let params = QueryParams::new(1, 10).with_search("ALI");
        let page = normalize(
            envelope(&["alice@example.com", "bob@example.com", "Alina@corp.io"]),
            &params,
        );
        assert_eq!(emails(&page), vec!["alice@example.com", "Alina@corp.io"]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn pages_slice_after_filtering() {
        let all: Vec<String> = (0..30).map(|i| format!("u{i:02}@example.com")).collect();
        let refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let params = QueryParams::new(2, 4).with_search("u1");
        let page = normalize(envelope(&refs), &params);
        assert_eq!(page.total, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(
            emails(&page),
            vec!["u14@example.com", "u15@example.com", "u16@example.com", "u17@example.com"]
        );
    }

    #[test]
    fn page_past_end_is_empty() {
        let page = normalize(envelope(&["a@x.io", "b@x.io"]), &QueryParams::new(5, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn sorts_by_requested_key() {
        let params = QueryParams::new(1, 10).with_sort("email", SortOrder::Desc);
        let page = normalize(envelope(&["b@x.io", "c@x.io", "a@x.io"]), &params);
        assert_eq!(emails(&page), vec!["c@x.io", "b@x.io", "a@x.io"]);
    }

    #[test]
    fn unknown_sort_key_keeps_backend_order() {
        let params = QueryParams::new(1, 10).with_sort("favourite_colour", SortOrder::Asc);
        let page = normalize(envelope(&["b@x.io", "a@x.io"]), &params);
        assert_eq!(emails(&page), vec!["b@x.io", "a@x.io"]);
    }

    #[test]
    fn wrapped_envelope_is_accepted() {
        let page = UsersResource::normalize(
            json!({ "users": [{ "email": "w@x.io" }] }),
            &QueryParams::default(),
        )
        .unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = UsersResource::normalize(json!({ "people": [] }), &QueryParams::default()).unwrap_err();
        assert!(matches!(err, authadmin_core::ClientError::Decode(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// The page equals the matching window of the fully filtered list.
        #[test]
        fn filter_then_slice(
            names in prop::collection::vec("[a-c]{1,4}", 0..60),
            term in "[a-c]{0,2}",
            page in 1u32..8u32,
            page_size in 1u32..12u32,
        ) {
            let users: Vec<User> = names.iter().map(|n| user(&format!("{n}@x.io"))).collect();
            let params = QueryParams::new(page, page_size).with_search(term.clone());

            let filtered = filter_by_email(users.clone(), params.search_term());
            let expected: Vec<User> = filtered
                .iter()
                .skip(params.offset() as usize)
                .take(page_size as usize)
                .cloned()
                .collect();

            let result = normalize(UsersEnvelope::List(users), &params);
            prop_assert_eq!(result.total, filtered.len() as u64);
            prop_assert_eq!(result.items, expected);
        }
    }
}
