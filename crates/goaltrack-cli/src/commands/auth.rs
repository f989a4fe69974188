use clap::Subcommand;
use goaltrack_core::integrations::notion::normalize_database_id;
use goaltrack_core::{Config, Credential};

use crate::context::Context;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Notion: login / logout / status
    Notion {
        #[command(subcommand)]
        action: AuthOp,
    },
    /// Cohere: login / logout / status
    Cohere {
        #[command(subcommand)]
        action: AuthOp,
    },
    /// Check that the configured task store is reachable
    Test,
}

#[derive(Subcommand)]
pub enum AuthOp {
    /// Store credentials in the OS keyring
    Login {
        /// Integration token or API key
        #[arg(long)]
        token: Option<String>,
        /// Database ID (for Notion)
        #[arg(long)]
        database_id: Option<String>,
    },
    /// Remove credentials from the OS keyring
    Logout,
    /// Show where each credential is found
    Status,
}

pub fn run(action: AuthAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Notion { action: op } => handle_notion(op),
        AuthAction::Cohere { action: op } => handle_cohere(op),
        AuthAction::Test => handle_test(ctx),
    }
}

fn handle_notion(op: AuthOp) -> Result<(), Box<dyn std::error::Error>> {
    match op {
        AuthOp::Login { token, database_id } => {
            let tok = token.ok_or("--token required for Notion")?;
            let db_id = database_id.ok_or("--database-id required for Notion")?;
            let db_id = normalize_database_id(&db_id);
            if tok.trim().is_empty() || db_id.is_empty() {
                return Err("token and database ID must not be empty".into());
            }
            Credential::NotionToken.store(&tok)?;
            Credential::NotionDatabaseId.store(&db_id)?;
            println!("Notion credentials saved; run `goaltrack auth test` to verify");
        }
        AuthOp::Logout => {
            Credential::NotionToken.forget()?;
            Credential::NotionDatabaseId.forget()?;
            println!("Notion credentials removed");
        }
        AuthOp::Status => {
            print_status(&[Credential::NotionToken, Credential::NotionDatabaseId]);
        }
    }
    Ok(())
}

fn handle_cohere(op: AuthOp) -> Result<(), Box<dyn std::error::Error>> {
    match op {
        AuthOp::Login { token, .. } => {
            let key = token.ok_or("--token required for Cohere")?;
            if key.trim().is_empty() {
                return Err("API key must not be empty".into());
            }
            Credential::CohereApiKey.store(&key)?;
            println!("Cohere API key saved");
        }
        AuthOp::Logout => {
            Credential::CohereApiKey.forget()?;
            println!("Cohere API key removed");
        }
        AuthOp::Status => print_status(&[Credential::CohereApiKey]),
    }
    Ok(())
}

fn print_status(credentials: &[Credential]) {
    for credential in credentials {
        match credential.source() {
            Some(source) => println!("{}: set ({source})", credential.env_var()),
            None => println!("{}: not set", credential.env_var()),
        }
    }
}

fn handle_test(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = ctx.store(&config)?;
    store.test_connection()?;
    println!("Connected to {}", store.display_name());
    Ok(())
}
