//! Database migration runner.
//!
//! Usage: `DATABASE_URL=postgres://... migrator`

use gasto_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
