use std::process::ExitCode;

use complaintbot_ops::cli::{self, Arity};
use complaintbot_ops::{maintenance, telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Create every table in the configured database.

Usage: setup-db";

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
    maintenance::setup_database(&pool).await?;
    println!("Database tables created successfully!");
    Ok(true)
}
