mod cli;

use cassh::prelude::*;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; usage errors fail with 1.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "cassh=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CasshError> {
    // User input is checked before settings are read or anything is sent.
    let admin_request = cli.command.admin_request()?;

    let config_path = match cli.config {
        Some(path) => path,
        None => UserSettings::default_path()?,
    };
    let settings = UserSettings::load(&config_path)?;
    tracing::debug!(config = %config_path.display(), url = %settings.base_url, "Loaded settings");

    let client = CasshClient::builder(settings).build()?;

    match cli.command {
        Command::Add => println!("{}", client.keys().add().await?),
        Command::Sign {
            display_only,
            force,
        } => match client.keys().sign(SignOptions { display_only, force }).await? {
            SignOutcome::Installed(path) => {
                println!("Signed key written to {}", path.display())
            }
            SignOutcome::Displayed(certificate) => println!("{}", certificate),
        },
        Command::Status => println!("{}", client.keys().status().await?.render()),
        Command::Ca => println!("{}", client.keys().ca().await?),
        Command::Krl => println!("{}", client.keys().krl().await?),
        Command::Admin { .. } => {
            if let Some((username, action)) = &admin_request {
                let outcome = client.admin().run(username, action).await?;
                println!("{}", outcome.render());
            }
        }
    }
    Ok(())
}
