//! CLI administration tool for tinylink.
//!
//! Manages short links and inspects the database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links, newest first
//! cargo run --bin admin -- links list
//!
//! # Search and sort by clicks
//! cargo run --bin admin -- links list --search docs --sort clicks
//!
//! # Create a link with a custom code
//! cargo run --bin admin -- links create https://example.com --code promo1
//!
//! # Show one link
//! cargo run --bin admin -- links show promo1
//!
//! # Delete a link
//! cargo run --bin admin -- links delete promo1
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `BASE_URL`,
//! `CODE_LENGTH`, `MAX_ALLOCATION_ATTEMPTS`.

use tinylink::application::services::LinkService;
use tinylink::config::Config;
use tinylink::domain::entities::{Link, LinkFilter, LinkSort, SortOrder};
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type AdminLinkService = LinkService<PgLinkRepository>;

/// CLI tool for managing tinylink.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Sort column for `links list`.
#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Created,
    Clicks,
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links
    List {
        /// Only show links whose code or URL contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort column
        #[arg(long, value_enum, default_value = "created")]
        sort: SortArg,

        /// Oldest / least clicked first
        #[arg(long)]
        asc: bool,
    },

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Create a short link
    Create {
        /// Long URL to shorten
        url: String,

        /// Custom short code (3-8 letters or digits)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a short link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = tinylink::config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(config: &Config, pool: &PgPool) -> AdminLinkService {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    LinkService::with_policy(repo, config.allocation_policy())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = link_service(config, pool);

    match action {
        LinkAction::List { search, sort, asc } => {
            let sort = match sort {
                SortArg::Created => LinkSort::CreatedAt,
                SortArg::Clicks => LinkSort::ClickCount,
            };
            let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
            let filter = LinkFilter::default()
                .with_search(search)
                .with_order(sort, order);

            list_links(&service, &filter).await?;
        }
        LinkAction::Show { code } => show_link(&service, config, &code).await?,
        LinkAction::Create { url, code } => {
            create_link(&service, config, &url, code.as_deref()).await?;
        }
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code      Clicks   Created            Long URL
///   ─────────────────────────────────────────────────────────────────────
///   promo1    12       2026-01-15 10:30   https://example.com/spring-sale
///   x8Kq2L    0        2026-01-14 09:12   https://docs.rs/axum
/// ```
async fn list_links(service: &AdminLinkService, filter: &LinkFilter) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.short_code.cyan(),
            link.click_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            truncate(&link.long_url, 60)
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints every field of one link.
async fn show_link(service: &AdminLinkService, config: &Config, code: &str) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link, &service.get_short_url(&config.base_url, &link.short_code));

    Ok(())
}

/// Creates a link through the same allocation policy as the API.
async fn create_link(
    service: &AdminLinkService,
    config: &Config,
    url: &str,
    code: Option<&str>,
) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    if code.is_none_or(str::is_empty) {
        let policy = service.policy();
        println!(
            "  Generating a {}-character code (up to {} attempts)",
            policy.code_length.to_string().bright_white(),
            policy.max_attempts.to_string().bright_white()
        );
    }

    let link = service
        .create_link(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    print_link(&link, &service.get_short_url(&config.base_url, &link.short_code));

    Ok(())
}

/// Deletes a link after confirmation.
///
/// Deleting an unknown code is not an error; the command just reports it.
async fn delete_link(service: &AdminLinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    match service.get_link(code).await {
        Ok(link) => {
            println!("  Code: {}", link.short_code.cyan());
            println!("  URL:  {}", link.long_url.bright_white());
            println!();
        }
        Err(_) => {
            println!("{}", "⚠️  No link with this code, nothing to delete".yellow());
            return Ok(());
        }
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of clicks
/// - Most clicked link
async fn handle_stats(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = link_service(config, pool);

    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:        {}",
        summary.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:       {}",
        summary.clicks.to_string().bright_green().bold()
    );

    let top = service
        .list_links(&LinkFilter::default().with_order(LinkSort::ClickCount, SortOrder::Desc))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    if let Some(link) = top.first().filter(|l| l.click_count > 0) {
        println!(
            "  Most clicked: {} ({} clicks)",
            link.short_code.cyan(),
            link.click_count.to_string().bright_green()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🔧 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Prints a link's details block.
fn print_link(link: &Link, short_url: &str) {
    println!();
    println!("  Code:         {}", link.short_code.cyan());
    println!("  Short URL:    {}", short_url.bright_yellow());
    println!("  Long URL:     {}", link.long_url.bright_white());
    println!(
        "  Clicks:       {}",
        link.click_count.to_string().bright_green()
    );
    match link.last_clicked_at.filter(|_| link.was_clicked()) {
        Some(at) => println!(
            "  Last clicked: {}",
            at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
        ),
        None => println!("  Last clicked: {}", "never".yellow()),
    }
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Shortens `s` to at most `max` characters, appending `...` when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
