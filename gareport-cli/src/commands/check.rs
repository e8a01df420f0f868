//! The `check` command: load credentials and authorize, nothing else.

use anyhow::Result;
use gareport_client::{GoogleService, ReportingService, ServiceAccountKey};

use crate::Cli;

/// Runs the check command.
pub async fn run(cli: &Cli) -> Result<()> {
    let key = ServiceAccountKey::discover(cli.credentials.as_deref())?;

    if !cli.quiet {
        println!("Account: {}", key.client_email);
        if let Some(project) = &key.project_id {
            println!("Project: {project}");
        }
    }

    let service = GoogleService::new(key);
    let token = service.authorize().await?;

    if !cli.quiet {
        let status = if cli.no_color {
            "✓ Authorized".to_string()
        } else {
            "\x1b[32m✓\x1b[0m Authorized".to_string()
        };
        match token.expires_at {
            Some(expires_at) => println!("{status} (token expires {expires_at})"),
            None => println!("{status}"),
        }
    }

    Ok(())
}
