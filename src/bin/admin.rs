//! CLI administration tool for affiliate-linker.
//!
//! Manages the link cache directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register an affiliate link by hand (same as POST /add_ml)
//! cargo run --bin admin -- links add https://produto.mercadolivre.com.br/MLB-1 https://mercadolivre.com/sec/abc
//!
//! # Show the stored link for a URL
//! cargo run --bin admin -- links get https://produto.mercadolivre.com.br/MLB-1
//!
//! # List the most recent links
//! cargo run --bin admin -- links list --limit 20
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite URL, defaults to `sqlite://db.sqlite`

use affiliate_linker::domain::repositories::LinkRepository;
use affiliate_linker::infrastructure::persistence::{self, SqliteLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing affiliate-linker.
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
    /// Manage cached links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link cache subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Register an affiliate link for an original URL
    Add {
        /// Original product URL (exactly as callers will submit it)
        original: String,

        /// Affiliate URL to return for it
        affiliate: String,

        /// Overwrite an existing mapping without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the stored link for an original URL
    Get {
        original: String,
    },

    /// List stored links, most recent first
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "sqlite://db.sqlite".to_string());

    let pool = persistence::connect(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    persistence::run_migrations(&pool)
        .await
        .context("Failed to migrate")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &SqlitePool) -> Result<()> {
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::Add {
            original,
            affiliate,
            yes,
        } => add_link(&repo, &original, &affiliate, yes).await?,
        LinkAction::Get { original } => get_link(&repo, &original).await?,
        LinkAction::List { limit } => list_links(&repo, limit).await?,
    }

    Ok(())
}

/// Registers a mapping, asking before replacing a different existing value.
async fn add_link(
    repo: &SqliteLinkRepository,
    original: &str,
    affiliate: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Register Link".bright_blue().bold());
    println!();

    if original.is_empty() || affiliate.is_empty() {
        anyhow::bail!("Both original and affiliate URLs are required");
    }

    let existing = repo
        .get(original)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  Original:  {}", original.cyan());
    println!("  Affiliate: {}", affiliate.bright_yellow());

    if let Some(previous) = existing.as_deref()
        && previous != affiliate
    {
        println!("  Replaces:  {}", previous.bright_black());
        println!();

        if !skip_confirm {
            let confirmed = Confirm::new()
                .with_prompt("Overwrite the existing link?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }
    }

    repo.put(original, affiliate)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save link: {}", e))?;

    println!();
    println!("{}", "✅ Link saved successfully!".green().bold());
    println!();

    Ok(())
}

async fn get_link(repo: &SqliteLinkRepository, original: &str) -> Result<()> {
    let stored = repo
        .get(original)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match stored {
        Some(affiliate) => println!("{}", affiliate.bright_yellow()),
        None => println!("{}", "  Not cached".yellow()),
    }

    Ok(())
}

/// Lists cached links.
///
/// # Output Format
///
/// ```text
/// 📋 Cached Links
///
///   Updated            Original → Affiliate
///   ──────────────────────────────────────────────────────────────
///   2025-01-15 10:30   https://www.amazon.com.br/dp/B000123ABC
///                      → https://bit.ly/3xYz
/// ```
async fn list_links(repo: &SqliteLinkRepository, limit: i64) -> Result<()> {
    println!("{}", "📋 Cached Links".bright_blue().bold());
    println!();

    let links = repo
        .list(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links cached".yellow());
        return Ok(());
    }

    println!(
        "  {:<18} {}",
        "Updated".bright_white().bold(),
        "Original → Affiliate".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<18} {}",
            link.updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url.cyan()
        );
        println!("  {:<18} → {}", "", link.affiliate_url.bright_yellow());
    }

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!();
    println!(
        "  Showing {} of {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cached_links")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Cached links: {}", links.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
