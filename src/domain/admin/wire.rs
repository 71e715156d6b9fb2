//! Wire contract for admin operations.
//!
//! | action                 | verb   | path                           | extra field        |
//! |------------------------|--------|--------------------------------|--------------------|
//! | active                 | POST   | `/admin/{user}`                |                    |
//! | revoke                 | POST   | `/admin/{user}`                | `revoke=true`      |
//! | delete                 | DELETE | `/admin/{user}`                |                    |
//! | raw set                | PATCH  | `/admin/{user}`                | `{field}={value}`  |
//! | principal add/rm/up/pg | POST   | `/admin/{user}/principals`     | `{op}={list}`      |
//! | search                 | POST   | `/admin/all/principals/search` | `filter={list}`    |
//! | status                 | POST   | `/admin/{user}`                | `status=true`      |

use super::{AdminAction, PrincipalEdit, Username};
use crate::auth::Payload;
use crate::http::{ApiRequest, Method};

pub const SEARCH_PATH: &str = "/admin/all/principals/search";

pub const REVOKE_FIELD: &str = "revoke";
pub const STATUS_FIELD: &str = "status";
pub const FILTER_FIELD: &str = "filter";

pub fn user_path(username: &Username) -> String {
    format!("/admin/{}", username)
}

pub fn principals_path(username: &Username) -> String {
    format!("/admin/{}/principals", username)
}

/// Verb and path for `action` on `username`.
pub fn route(username: &Username, action: &AdminAction) -> (Method, String) {
    match action {
        AdminAction::Active | AdminAction::Revoke | AdminAction::Status => {
            (Method::Post, user_path(username))
        }
        AdminAction::Delete => (Method::Delete, user_path(username)),
        AdminAction::RawSet(_) | AdminAction::PrincipalEdit(PrincipalEdit::RawSet(_)) => {
            (Method::Patch, user_path(username))
        }
        AdminAction::PrincipalEdit(_) => (Method::Post, principals_path(username)),
        AdminAction::Search(_) => (Method::Post, SEARCH_PATH.to_string()),
    }
}

/// Action-specific fields, merged over the credentials.
pub fn extra_fields(action: &AdminAction) -> Payload {
    match action {
        AdminAction::Active | AdminAction::Delete => Payload::new(),
        AdminAction::Revoke => Payload::new().with(REVOKE_FIELD, "true"),
        AdminAction::Status => Payload::new().with(STATUS_FIELD, "true"),
        AdminAction::RawSet(raw) => Payload::new().with(raw.field.clone(), raw.value.clone()),
        AdminAction::PrincipalEdit(edit) => {
            let (field, value) = edit.encode();
            Payload::new().with(field, value)
        }
        AdminAction::Search(filter) => Payload::new().with(FILTER_FIELD, filter.join(",")),
    }
}

pub fn request(username: &Username, action: &AdminAction, payload: Payload) -> ApiRequest {
    let (method, path) = route(username, action);
    ApiRequest::with_form(method, path, payload)
}
