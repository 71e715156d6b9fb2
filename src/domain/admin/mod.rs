//! Admin domain: privileged operations on another user's record.

pub mod client;
pub mod wire;

use crate::error::ValidationError;
use crate::shared::split_list;

use std::fmt;
use std::str::FromStr;

// ─── Username ────────────────────────────────────────────────────────────────

/// Target account of an admin call: one or more lowercase ASCII letters.
///
/// `all` is itself a valid username and addresses every user for `status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const ALL: &'static str = "all";

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_lowercase()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::InvalidUsername(raw.to_string()))
        }
    }

    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Username {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ─── RawField ────────────────────────────────────────────────────────────────

/// Legacy `field=value` update, split on the first `=` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub field: String,
    pub value: String,
}

impl FromStr for RawField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((field, value)) if !field.is_empty() => Ok(Self {
                field: field.to_string(),
                value: value.to_string(),
            }),
            _ => Err(ValidationError::MalformedSet(s.to_string())),
        }
    }
}

// ─── PrincipalEdit ───────────────────────────────────────────────────────────

/// Change to a user's principal set.
///
/// `RawSet` is the deprecated generic form; it travels as a PATCH on the
/// user record instead of a POST on its principals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalEdit {
    Add(Vec<String>),
    Remove(Vec<String>),
    Update(Vec<String>),
    Purge,
    RawSet(RawField),
}

impl PrincipalEdit {
    /// The single form field this edit is sent as, and its value.
    pub fn encode(&self) -> (String, String) {
        match self {
            PrincipalEdit::Add(list) => ("add".to_string(), list.join(",")),
            PrincipalEdit::Remove(list) => ("remove".to_string(), list.join(",")),
            PrincipalEdit::Update(list) => ("update".to_string(), list.join(",")),
            PrincipalEdit::Purge => ("purge".to_string(), "true".to_string()),
            PrincipalEdit::RawSet(raw) => (raw.field.clone(), raw.value.clone()),
        }
    }
}

// ─── AdminAction ─────────────────────────────────────────────────────────────

/// One privileged operation. Each maps to exactly one verb and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Active,
    Revoke,
    Delete,
    RawSet(RawField),
    PrincipalEdit(PrincipalEdit),
    Search(Vec<String>),
    Status,
}

impl From<PrincipalEdit> for AdminAction {
    fn from(edit: PrincipalEdit) -> Self {
        match edit {
            PrincipalEdit::RawSet(raw) => AdminAction::RawSet(raw),
            structured => AdminAction::PrincipalEdit(structured),
        }
    }
}

// ─── AdminVerb (CLI surface) ─────────────────────────────────────────────────

/// Action names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminVerb {
    Active,
    Revoke,
    Delete,
    Set,
    Search,
    Status,
}

impl AdminVerb {
    pub const ALL: [AdminVerb; 6] = [
        AdminVerb::Active,
        AdminVerb::Revoke,
        AdminVerb::Delete,
        AdminVerb::Set,
        AdminVerb::Search,
        AdminVerb::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminVerb::Active => "active",
            AdminVerb::Revoke => "revoke",
            AdminVerb::Delete => "delete",
            AdminVerb::Set => "set",
            AdminVerb::Search => "search",
            AdminVerb::Status => "status",
        }
    }

    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(AdminVerb::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for AdminVerb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownAction {
                action: s.to_string(),
                valid: Self::valid_list(),
            })
    }
}

/// Raw admin flags, as typed. Lists are comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminOptions {
    pub set: Option<String>,
    pub add_principals: Option<String>,
    pub remove_principals: Option<String>,
    pub update_principals: Option<String>,
    pub purge_principals: bool,
    pub principals_filter: Option<String>,
}

impl AdminOptions {
    /// The principal edit requested by the flags, if any.
    ///
    /// Structured operations take precedence over `--set`.
    fn principal_edit(&self) -> Result<Option<PrincipalEdit>, ValidationError> {
        let mut requested = Vec::new();
        if let Some(raw) = &self.add_principals {
            requested.push(PrincipalEdit::Add(non_empty("add", raw)?));
        }
        if let Some(raw) = &self.remove_principals {
            requested.push(PrincipalEdit::Remove(non_empty("remove", raw)?));
        }
        if let Some(raw) = &self.update_principals {
            requested.push(PrincipalEdit::Update(non_empty("update", raw)?));
        }
        if self.purge_principals {
            requested.push(PrincipalEdit::Purge);
        }

        match requested.len() {
            0 => match &self.set {
                Some(raw) => Ok(Some(PrincipalEdit::RawSet(raw.parse()?))),
                None => Ok(None),
            },
            1 => Ok(requested.pop()),
            _ => Err(ValidationError::ConflictingPrincipalEdits),
        }
    }
}

fn non_empty(op: &'static str, raw: &str) -> Result<Vec<String>, ValidationError> {
    let list = split_list(raw);
    if list.is_empty() {
        Err(ValidationError::EmptyPrincipals(op))
    } else {
        Ok(list)
    }
}

impl AdminAction {
    /// Resolve a CLI verb and its flags into an action.
    pub fn from_verb(verb: AdminVerb, options: &AdminOptions) -> Result<Self, ValidationError> {
        match verb {
            AdminVerb::Active => Ok(AdminAction::Active),
            AdminVerb::Revoke => Ok(AdminAction::Revoke),
            AdminVerb::Delete => Ok(AdminAction::Delete),
            AdminVerb::Status => Ok(AdminAction::Status),
            AdminVerb::Set => options
                .principal_edit()?
                .map(AdminAction::from)
                .ok_or(ValidationError::MissingSetArgument),
            AdminVerb::Search => {
                let filter = options
                    .principals_filter
                    .as_deref()
                    .map(split_list)
                    .filter(|list| !list.is_empty())
                    .ok_or(ValidationError::MissingFilter)?;
                Ok(AdminAction::Search(filter))
            }
        }
    }
}
