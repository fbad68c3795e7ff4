use clap::{Parser, Subcommand};
use roster_db::storage::mongodb::MongoDBStorage;

use crate::commands::{CreateUserParams, IssueTokenParams};

mod commands;

#[derive(Parser)]
#[command(name = "rosterctl", version, about = "Operator tooling for the roster user directory")]
pub struct Args {
    #[clap(subcommand)]
    command: Command,

    #[clap(
        short = 'D',
        long,
        env = "ROSTER_API_MONGODB_URI",
        default_value = "mongodb://localhost:27017/roster"
    )]
    db_url: String,
}

#[derive(Clone, Subcommand)]
pub enum Command {
    /// Insert a user directly into the database.
    #[command(name = "create-user")]
    CreateUser(CreateUserParams),

    /// Mint a bearer token for an existing user.
    #[command(name = "issue-token")]
    IssueToken(IssueTokenParams),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let stg = MongoDBStorage::new(&args.db_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to MongoDB: {e}"))?;

    match args.command {
        Command::CreateUser(params) => {
            let user = commands::create_user(&stg, params).await?;
            println!("Created user with ID {}", user.id);
        }
        Command::IssueToken(params) => {
            let token = commands::issue_token(&stg, params).await?;
            println!("{token}");
        }
    }

    Ok(())
}
