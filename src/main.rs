use clap::{Parser, Subcommand};
use configuration::Settings;
use database::{Database, DatabaseSettings};

/// The main entry point for the Todo API application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present).
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();
    let settings = configuration::load_settings()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::run_server(settings).await,
        Commands::Migrate { action } => handle_migrate(action, &settings).await,
        Commands::InitSchema => handle_init_schema(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small todo service: one table, two health endpoints, a versioned schema.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server.
    Serve,
    /// Manage the versioned database schema (the production path).
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Create the declared tables if absent (development bootstrap).
    InitSchema,
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations.
    Run,
    /// Revert the most recently applied migration.
    Revert,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_migrate(action: MigrateAction, settings: &Settings) -> anyhow::Result<()> {
    let db = Database::connect(&DatabaseSettings::from(settings)).await?;
    match action {
        MigrateAction::Run => {
            db.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Revert => {
            db.revert_last_migration().await?;
            tracing::info!("Most recent migration reverted");
        }
    }
    db.shutdown().await;
    Ok(())
}

async fn handle_init_schema(settings: &Settings) -> anyhow::Result<()> {
    let db = Database::connect(&DatabaseSettings::from(settings)).await?;
    db.initialize_schema().await?;
    tracing::info!("Schema bootstrap complete");
    db.shutdown().await;
    Ok(())
}
