//! Binary entry point: seeds the roster and runs a payroll close for the
//! current month, logging the batch report.

use chrono::Utc;
use dotenvy::dotenv;
use nexus_payroll::{
    config,
    core::{close, payroll::PayrollPolicy, roster},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> nexus_payroll::errors::Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;

    // 4. Seed the roster from config.toml (skipped when no config is present)
    match config::roster::load_default_roster() {
        Ok(roster_config) => {
            roster::seed_roster(&db, &roster_config).await?;
        }
        Err(e) => warn!("No seed roster loaded: {}", e),
    }

    // 5. Close the current month and report the outcome
    let month = Utc::now().format("%Y-%m").to_string();
    let report = close::close_month(&db, &month, &PayrollPolicy::default()).await?;
    info!("{}", close::format_close_summary(&report));

    Ok(())
}
