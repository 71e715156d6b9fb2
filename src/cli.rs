use cassh::domain::admin::{AdminAction, AdminOptions, AdminVerb, Username};
use cassh::error::ValidationError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cassh")]
#[command(version, about = "Client for the CASSH SSH certificate authority")]
pub struct Cli {
    /// Settings file (defaults to ~/.cassh/config.toml)
    #[arg(long, short = 'c', env = "CASSH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log requests and file writes to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register your public key with the server
    Add,
    /// Get your public key signed
    Sign {
        /// Print the certificate instead of writing the signed key pair
        #[arg(long)]
        display_only: bool,
        /// Ask the server to sign even if it would refuse (admins only)
        #[arg(long)]
        force: bool,
    },
    /// Show the signing status of your keys
    Status,
    /// Print the CA public key
    Ca,
    /// Print the key revocation list
    Krl,
    /// Manage another user's keys and principals
    Admin {
        /// Target user (lowercase letters; 'all' for status of every user)
        username: String,

        /// One of: active, revoke, delete, set, search, status
        action: String,

        /// Legacy field update, KEY=VALUE (deprecated, prefer the principals options)
        #[arg(long, value_name = "KEY=VALUE")]
        set: Option<String>,

        /// Principals to add, comma-separated
        #[arg(long, value_name = "LIST", group = "principals")]
        add_principals: Option<String>,

        /// Principals to remove, comma-separated
        #[arg(long, value_name = "LIST", group = "principals")]
        remove_principals: Option<String>,

        /// Replace all principals, comma-separated
        #[arg(long, value_name = "LIST", group = "principals")]
        update_principals: Option<String>,

        /// Remove every principal
        #[arg(long, group = "principals")]
        purge_principals: bool,

        /// Principals to search for, comma-separated
        #[arg(long, value_name = "LIST")]
        principals_filter: Option<String>,
    },
}

impl Command {
    /// Validated target and action of an `admin` command.
    ///
    /// Returns `None` for the other commands.
    pub fn admin_request(&self) -> Result<Option<(Username, AdminAction)>, ValidationError> {
        let Command::Admin {
            username,
            action,
            set,
            add_principals,
            remove_principals,
            update_principals,
            purge_principals,
            principals_filter,
        } = self
        else {
            return Ok(None);
        };

        let username = Username::parse(username)?;
        let verb: AdminVerb = action.parse()?;
        let options = AdminOptions {
            set: set.clone(),
            add_principals: add_principals.clone(),
            remove_principals: remove_principals.clone(),
            update_principals: update_principals.clone(),
            purge_principals: *purge_principals,
            principals_filter: principals_filter.clone(),
        };
        Ok(Some((username, AdminAction::from_verb(verb, &options)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cassh::domain::admin::PrincipalEdit;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cassh").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_sign_flags() {
        let cli = parse(&["sign", "--display-only", "--force"]);
        assert!(matches!(
            cli.command,
            Command::Sign { display_only: true, force: true }
        ));
    }

    #[test]
    fn test_admin_principal_edit() {
        let cli = parse(&["admin", "bob", "set", "--add-principals", "root,deploy"]);
        let (user, action) = cli.command.admin_request().unwrap().unwrap();
        assert_eq!(user.as_str(), "bob");
        assert_eq!(
            action,
            AdminAction::PrincipalEdit(PrincipalEdit::Add(vec!["root".into(), "deploy".into()]))
        );
    }

    #[test]
    fn test_admin_conflicting_principal_flags() {
        let result = Cli::try_parse_from([
            "cassh",
            "admin",
            "bob",
            "set",
            "--add-principals",
            "x",
            "--purge-principals",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_invalid_username_and_action() {
        let cli = parse(&["admin", "Bob1", "status"]);
        assert_eq!(
            cli.command.admin_request(),
            Err(ValidationError::InvalidUsername("Bob1".into()))
        );

        let cli = parse(&["admin", "bob", "enable"]);
        assert!(matches!(
            cli.command.admin_request(),
            Err(ValidationError::UnknownAction { .. })
        ));
    }

    #[test]
    fn test_non_admin_has_no_admin_request() {
        assert_eq!(parse(&["status"]).command.admin_request(), Ok(None));
    }

    #[test]
    fn test_config_flag() {
        let cli = parse(&["--config", "/etc/cassh.toml", "ca"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/cassh.toml")));
        assert!(matches!(cli.command, Command::Ca));
    }
}
