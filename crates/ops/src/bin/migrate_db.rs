use std::process::ExitCode;

use complaintbot_db::repositories::schema_repo::ColumnMigration;
use complaintbot_ops::cli::{self, Arity};
use complaintbot_ops::{maintenance, telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Add the escalation_level column to tickets if it is missing.

Usage: migrate-db";

const FLAGS: &[(&str, Arity)] = &[];

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();
    if let Err(code) = cli::parse_process_args(USAGE, FLAGS) {
        return code;
    }
    cli::finish(run().await)
}

async fn run() -> OpsResult<bool> {
    let pool = OpsConfig::from_env().connect().await?;
    match maintenance::add_escalation_level_column(&pool).await? {
        ColumnMigration::Added => println!("Added escalation_level column to tickets table"),
        ColumnMigration::AlreadyPresent => println!("escalation_level column already exists"),
    }
    println!("Database migration completed successfully");
    Ok(true)
}
