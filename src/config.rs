//! User settings: loaded once from `~/.cassh/config.toml`, validated, then
//! passed by reference to every sub-client.
//!
//! ```toml
//! [user]
//! name = "alice"
//! key_path = "~/.ssh/id_ed25519"
//! key_signed_path = "~/.ssh/id_ed25519-cert"
//! url = "https://cassh.example.org"
//! timeout = 2
//! verify = true
//!
//! [auth]
//! mode = "ldap"
//! realname = "alice@example.org"
//! ldap_enabled = true
//! ```

use crate::error::ConfigError;
use crate::network::DEFAULT_TIMEOUT_SECS;

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─── AuthMode ────────────────────────────────────────────────────────────────

/// How the server authenticates the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Ldap,
    #[default]
    None,
}

// ─── File layout ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    user: UserSection,
    #[serde(default)]
    auth: AuthSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserSection {
    #[serde(default)]
    name: String,
    #[serde(default)]
    key_path: String,
    #[serde(default)]
    key_signed_path: String,
    #[serde(default)]
    url: String,
    #[serde(default = "default_timeout")]
    timeout: u64,
    #[serde(default = "default_true")]
    verify: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AuthSection {
    mode: AuthMode,
    realname: Option<String>,
    ldap_enabled: bool,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            realname: None,
            ldap_enabled: true,
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

// ─── UserSettings ────────────────────────────────────────────────────────────

/// Validated settings for one invocation.
///
/// Only obtainable through [`UserSettings::load`] or
/// [`UserSettings::from_toml_str`], so `key_path != key_signed_path` and the
/// LDAP realname requirement always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub name: String,
    pub key_path: PathBuf,
    pub key_signed_path: PathBuf,
    /// Server base URL without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    pub verify_tls: bool,
    pub auth_mode: AuthMode,
    pub realname: Option<String>,
    pub ldap_enabled: bool,
}

impl UserSettings {
    /// Default config location (`~/.cassh/config.toml`).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".cassh")
            .join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Self::validate(file)
    }

    fn validate(file: ConfigFile) -> Result<Self, ConfigError> {
        let ConfigFile { user, auth } = file;

        let name = required("user.name", user.name)?;
        let key_path = expand_home(&required("user.key_path", user.key_path)?)?;
        let key_signed_path =
            expand_home(&required("user.key_signed_path", user.key_signed_path)?)?;
        if key_path == key_signed_path {
            return Err(ConfigError::SamePaths(key_path));
        }

        let url = required("user.url", user.url)?;
        match reqwest::Url::parse(&url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidUrl(url)),
        }

        if user.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let realname = auth.realname.filter(|r| !r.trim().is_empty());
        if auth.mode == AuthMode::Ldap && realname.is_none() {
            return Err(ConfigError::MissingRealname);
        }

        Ok(Self {
            name,
            key_path,
            key_signed_path,
            base_url: url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(user.timeout),
            verify_tls: user.verify,
            auth_mode: auth.mode,
            realname,
            ldap_enabled: auth.ldap_enabled,
        })
    }

    /// `{key_path}.pub`
    pub fn public_key_path(&self) -> PathBuf {
        with_pub_suffix(&self.key_path)
    }

    /// `{key_signed_path}.pub`, where the certificate is written.
    pub fn certificate_path(&self) -> PathBuf {
        with_pub_suffix(&self.key_signed_path)
    }

    /// Name shown at the password prompt.
    pub fn login_label(&self) -> &str {
        match (self.auth_mode, self.realname.as_deref()) {
            (AuthMode::Ldap, Some(realname)) => realname,
            _ => &self.name,
        }
    }

    pub fn require_public_key(&self) -> Result<PathBuf, ConfigError> {
        require_file(self.public_key_path())
    }

    pub fn require_private_key(&self) -> Result<PathBuf, ConfigError> {
        require_file(self.key_path.clone())
    }
}

fn required(field: &'static str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn require_file(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::MissingKeyFile(path))
    }
}

fn expand_home(raw: &str) -> Result<PathBuf, ConfigError> {
    if raw == "~" {
        return dirs::home_dir().ok_or(ConfigError::NoHomeDir);
    }
    match raw.strip_prefix("~/") {
        Some(rest) => Ok(dirs::home_dir().ok_or(ConfigError::NoHomeDir)?.join(rest)),
        None => Ok(PathBuf::from(raw)),
    }
}

fn with_pub_suffix(path: &Path) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".pub");
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [user]
        name = "alice"
        key_path = "/tmp/id_ed25519"
        key_signed_path = "/tmp/id_ed25519-cert"
        url = "https://cassh.example.org/"
    "#;

    #[test]
    fn test_defaults_applied() {
        let settings = UserSettings::from_toml_str(MINIMAL).unwrap();
        assert_eq!(settings.name, "alice");
        assert_eq!(settings.base_url, "https://cassh.example.org");
        assert_eq!(settings.timeout, Duration::from_secs(2));
        assert!(settings.verify_tls);
        assert_eq!(settings.auth_mode, AuthMode::None);
        assert!(settings.ldap_enabled);
        assert_eq!(settings.realname, None);
    }

    #[test]
    fn test_key_paths_derived() {
        let settings = UserSettings::from_toml_str(MINIMAL).unwrap();
        assert_eq!(
            settings.public_key_path(),
            PathBuf::from("/tmp/id_ed25519.pub")
        );
        assert_eq!(
            settings.certificate_path(),
            PathBuf::from("/tmp/id_ed25519-cert.pub")
        );
    }

    #[test]
    fn test_identical_key_paths_rejected() {
        let toml = r#"
            [user]
            name = "alice"
            key_path = "/tmp/id_rsa"
            key_signed_path = "/tmp/id_rsa"
            url = "https://cassh.example.org"
        "#;
        let err = UserSettings::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::SamePaths(_)));
    }

    #[test]
    fn test_ldap_requires_realname() {
        let toml = format!("{MINIMAL}\n[auth]\nmode = \"ldap\"\n");
        let err = UserSettings::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRealname));

        let toml = format!("{MINIMAL}\n[auth]\nmode = \"ldap\"\nrealname = \"alice@example.org\"\n");
        let settings = UserSettings::from_toml_str(&toml).unwrap();
        assert_eq!(settings.auth_mode, AuthMode::Ldap);
        assert_eq!(settings.login_label(), "alice@example.org");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let toml = MINIMAL.replace("https://cassh.example.org/", "cassh.example.org");
        let err = UserSettings::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));

        let toml = MINIMAL.replace("https://", "ftp://");
        let err = UserSettings::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_missing_name_and_zero_timeout() {
        let toml = MINIMAL.replace("name = \"alice\"", "name = \"  \"");
        let err = UserSettings::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("user.name")));

        let toml = format!("{MINIMAL}timeout = 0\n");
        let err = UserSettings::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_malformed_toml() {
        let err = UserSettings::from_toml_str("[user\nname=").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_home_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.ssh/id").unwrap(), home.join(".ssh/id"));
        }
        assert_eq!(expand_home("/abs/id").unwrap(), PathBuf::from("/abs/id"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = UserSettings::load(Path::new("/nonexistent/cassh/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
