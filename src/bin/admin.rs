//! CLI administration tool for linkvault.
//!
//! Provides commands for managing user accounts and checking the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection and row counts
//! cargo run --bin admin -- db check
//!
//! # Register a user interactively
//! cargo run --bin admin -- user create
//!
//! # Show a user's public profile
//! cargo run --bin admin -- user show alice@example.com
//!
//! # Replace a user's API key
//! cargo run --bin admin -- user rotate-key alice@example.com
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` parts) and `JWT_SECRET`.
//! The admin tool always talks to PostgreSQL.

use linkvault::application::services::{AuthService, UserService};
use linkvault::config::{self, Config, StorageBackend};
use linkvault::domain::entities::PublicUser;
use linkvault::domain::repositories::{LinkRepository, UserRepository};
use linkvault::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use linkvault::server::connect_database;
use linkvault::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkvault.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },

    /// Show a user's profile
    Show { email: String },

    /// Generate a new API key for a user, replacing the old one
    RotateKey {
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show row counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }
    config.validate()?;

    if let Some(url) = config.database_url.as_deref() {
        println!(
            "{} {}",
            "Database:".bright_black(),
            config::mask_connection_string(url).bright_black()
        );
    }

    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(
        repo.clone(),
        Arc::new(AuthService::new(&config.jwt_secret)),
        Arc::new(CodeGenerator::from_os_rng()),
    );

    match action {
        UserAction::Create { username, email } => create_user(&service, username, email).await,
        UserAction::Show { email } => show_user(repo.as_ref(), &email).await,
        UserAction::RotateKey { email, yes } => {
            rotate_key(&service, repo.as_ref(), &email, yes).await
        }
    }
}

/// Registers a user through the same path as `POST /users/register`.
///
/// Missing arguments are prompted for; the password is always prompted
/// and never echoed.
async fn create_user(
    service: &UserService<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let user = service
        .register(&username, &email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "User created successfully!".green().bold());
    print_user(&user);

    Ok(())
}

/// Prints the public profile of the user with `email`.
async fn show_user(repo: &PgUserRepository, email: &str) -> Result<()> {
    let user = repo
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    print_user(&PublicUser::from(user));

    Ok(())
}

/// Replaces a user's API key after confirmation.
///
/// The new key is printed once; the previous key stops being associated
/// with the account immediately.
async fn rotate_key(
    service: &UserService<PgUserRepository>,
    repo: &PgUserRepository,
    email: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Rotate API key".bright_blue().bold());
    println!();

    let user = repo
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    println!("  User: {}", user.username.cyan());
    println!("  ID:   {}", user.id.to_string().bright_black());
    if user.api_key.is_some() {
        println!("{}", "  The current API key will be replaced.".yellow());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Generate a new API key?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let api_key = service
        .generate_api_key(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to rotate API key: {}", e))?;

    println!();
    println!("{}", "API key rotated".green().bold());
    println!("  API key: {}", api_key.bright_yellow().bold());
    println!();

    Ok(())
}

fn print_user(user: &PublicUser) {
    println!();
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Username: {}", user.username.cyan());
    println!("  Email:    {}", user.email.cyan());
    println!(
        "  Created:  {}",
        user.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!(
        "  API key:  {}",
        if user.api_key.is_some() {
            "set".green()
        } else {
            "none".bright_black()
        }
    );
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;
            println!("{}", "Database connection OK".green().bold());
            println!();

            let pool = Arc::new(pool.clone());
            let links = PgLinkRepository::new(pool.clone())
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
            let users = PgUserRepository::new(pool)
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

            println!("  Links: {}", links.to_string().bright_green().bold());
            println!("  Users: {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
