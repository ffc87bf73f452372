//! CLI administration tool for the shortener.
//!
//! Works directly against the database, using the same configuration as the
//! server, so links can be inspected and toggled without HTTP access.
//!
//! # Usage
//!
//! ```bash
//! # Show a record by its secret key
//! cargo run --bin admin -- info abcde_Xa81kPq2
//!
//! # Deactivate / re-activate
//! cargo run --bin admin -- deactivate abcde_Xa81kPq2
//! cargo run --bin admin -- activate abcde_Xa81kPq2
//!
//! # Create a link
//! cargo run --bin admin -- create https://example.com --key my-link
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```

use shortener::application::services::{UrlService, UrlServiceSettings};
use shortener::config;
use shortener::domain::entities::{RecordState, UrlRecord};
use shortener::infrastructure::persistence::Database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing shortened URLs.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a shortened URL
    Create {
        /// Destination URL
        target_url: String,

        /// Custom key (generated if omitted)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show a record by secret key
    Info { secret_key: String },

    /// Deactivate a record
    Deactivate {
        secret_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Re-activate a record
    Activate { secret_key: String },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database = Database::connect(&config).await?;
    database.migrate().await?;

    let service = UrlService::new(
        database.url_repository(),
        UrlServiceSettings::from(&config),
    );

    match cli.command {
        Commands::Create { target_url, key } => create(&service, &target_url, key).await?,
        Commands::Info { secret_key } => info(&service, &secret_key).await?,
        Commands::Deactivate { secret_key, yes } => deactivate(&service, &secret_key, yes).await?,
        Commands::Activate { secret_key } => activate(&service, &secret_key).await?,
        Commands::Stats => stats(&service).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&service, &database).await?,
        },
    }

    database.close().await;

    Ok(())
}

async fn create(service: &UrlService, target_url: &str, key: Option<String>) -> Result<()> {
    let record = service
        .create_url(target_url, key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create URL: {}", e))?;

    println!("{}", "✅ Shortened URL created".green().bold());
    println!();
    print_record(service, &record);
    println!();
    println!(
        "{}",
        "⚠️  Keep the admin URL private: it can deactivate this link."
            .yellow()
            .bold()
    );

    Ok(())
}

async fn info(service: &UrlService, secret_key: &str) -> Result<()> {
    let record = service
        .get_admin_info(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("No record with this secret key")?;

    print_record(service, &record);

    Ok(())
}

/// Deactivates a record after confirmation (default: No).
async fn deactivate(service: &UrlService, secret_key: &str, skip_confirm: bool) -> Result<()> {
    let record = service
        .get_admin_info(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("No record with this secret key")?;

    if record.state() == RecordState::Inactive {
        println!("{}", "⚠️  This URL is already inactive".yellow());
        return Ok(());
    }

    println!("  Key:    {}", record.key.cyan());
    println!("  Target: {}", record.target_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service
        .deactivate(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate: {}", e))?
    {
        Some(r) => println!(
            "{} {}",
            "✅ Successfully deleted shortened URL for".green().bold(),
            r.target_url.bright_white()
        ),
        None => println!("{}", "⚠️  URL was deactivated concurrently".yellow()),
    }

    Ok(())
}

async fn activate(service: &UrlService, secret_key: &str) -> Result<()> {
    let record = service
        .reactivate(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to re-activate: {}", e))?
        .context("No inactive record with this secret key")?;

    println!(
        "{} {}",
        "✅ Successfully re-activated shortened URL for".green().bold(),
        record.target_url.bright_white()
    );

    Ok(())
}

/// Displays record and click totals.
async fn stats(service: &UrlService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  URLs:     {}",
        stats.total.to_string().bright_white().bold()
    );
    println!("  Active:   {}", stats.active.to_string().green());
    println!(
        "  Inactive: {}",
        (stats.total - stats.active).to_string().bright_black()
    );
    println!("  Clicks:   {}", stats.clicks.to_string().cyan());
    println!();

    Ok(())
}

async fn db_check(service: &UrlService, database: &Database) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    match service.health_check().await {
        Ok(()) => {
            println!(
                "{} ({})",
                "✅ Database connection OK".green().bold(),
                database.backend_name()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "❌ Database connection failed".red().bold());
            Err(anyhow::anyhow!("{}", e))
        }
    }
}

fn print_record(service: &UrlService, record: &UrlRecord) {
    let status = match record.state() {
        RecordState::Active => "ACTIVE".green(),
        RecordState::Inactive => "INACTIVE".red(),
    };

    println!("  Key:          {}", record.key.cyan());
    println!("  Target:       {}", record.target_url.bright_white());
    println!("  Status:       {}", status);
    println!("  Clicks:       {}", record.clicks);
    println!(
        "  Created:      {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    if let Some(at) = record.last_clicked_at {
        println!("  Last click:   {}", at.format("%Y-%m-%d %H:%M"));
    }
    if let Some(at) = record.deactivated_at {
        println!("  Deactivated:  {}", at.format("%Y-%m-%d %H:%M"));
    }
    println!("  URL:          {}", service.short_url(&record.key).bright_yellow());
    println!(
        "  Admin URL:    {}",
        service.admin_url(&record.secret_key).bright_yellow()
    );
}
