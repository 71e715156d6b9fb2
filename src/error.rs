//! Unified client error types.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level client error.
///
/// Every variant ends the process with a non-zero status; the binary prints
/// the `Display` form to stderr.
#[derive(Error, Debug)]
pub enum CasshError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Http(#[from] HttpError),

    #[error("Key file error: {0}")]
    KeyFile(#[from] KeyFileError),

    #[error("Signing failed, server answered: {body}")]
    SignRejected { body: String },

    #[error("Failed to read password: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Settings and local key material problems, raised before any request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing value for '{0}'")]
    MissingField(&'static str),

    #[error("Invalid server URL '{0}': expected an absolute http(s) URL")]
    InvalidUrl(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    #[error("key_path and key_signed_path must differ (both are {0})")]
    SamePaths(PathBuf),

    #[error("LDAP authentication requires a 'realname' in the [auth] section")]
    MissingRealname,

    #[error("Cannot resolve the home directory")]
    NoHomeDir,

    #[error("Key file {0} does not exist")]
    MissingKeyFile(PathBuf),
}

/// Rejected user input. Nothing has been sent when one of these is returned.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username '{0}' must contain lowercase letters only")]
    InvalidUsername(String),

    #[error("Unknown action '{action}', valid actions are: {valid}")]
    UnknownAction { action: String, valid: String },

    #[error("'set' needs --set KEY=VALUE or one of the principals options")]
    MissingSetArgument,

    #[error("Only one principals operation can be requested at a time")]
    ConflictingPrincipalEdits,

    #[error("Expected KEY=VALUE, got '{0}'")]
    MalformedSet(String),

    #[error("'search' needs --principals-filter")]
    MissingFilter,

    #[error("Principal list for '{0}' is empty")]
    EmptyPrincipals(&'static str),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Connection error: cannot reach {url} ({reason})")]
    Transport { url: String, reason: String },

    #[error("Timeout: {url} did not answer in time")]
    Timeout { url: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Local key file reads and writes.
#[derive(Error, Debug)]
pub enum KeyFileError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot restrict permissions on {path}: {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
