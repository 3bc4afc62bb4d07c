//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` (optionally from `.env`), e.g. `migration up`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    tracing::info!(
        migrations = migration::Migrator::migrations().len(),
        "Running post schema migrations"
    );
    cli::run_cli(migration::Migrator).await;
}
