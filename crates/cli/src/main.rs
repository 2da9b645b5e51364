//! BizGenie CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bg-cli migrate
//!
//! # Create a platform admin account
//! bg-cli user create -e admin@example.com -n "Platform Admin" -r platform_admin -p <password>
//!
//! # Seed a demo tenant with leads and content
//! bg-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create accounts (notably platform admins, which have
//!   no self-serve registration path)
//! - `seed` - Seed the database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bg-cli")]
#[command(author, version, about = "BizGenie CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the database with a demo tenant
    Seed,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user account
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`platform_admin`, `business_admin`, `agent`)
        #[arg(short, long, default_value = "platform_admin")]
        role: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Business ID to bind the account to (required for agents)
        #[arg(short, long)]
        business: Option<i32>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
                business,
            } => {
                commands::user::create(&email, &name, &role, &password, business).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
