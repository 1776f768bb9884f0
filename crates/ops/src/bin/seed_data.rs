use std::process::ExitCode;

use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::maintenance::{self, SeedOutcome, DEFAULT_SEED_PASSWORD};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Insert sample categories, users, agents and tickets into an empty database.

Usage: seed-data [--password <PASSWORD>]

Seeded users get PASSWORD (default: changeme123).";

const FLAGS: &[(&str, Arity)] = &[("password", Arity::Value)];

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();
    let flags = match cli::parse_process_args(USAGE, FLAGS) {
        Ok(flags) => flags,
        Err(code) => return code,
    };
    cli::finish(run(&flags).await)
}

async fn run(flags: &Flags) -> OpsResult<bool> {
    let password = flags
        .optional("password")
        .unwrap_or_else(|| DEFAULT_SEED_PASSWORD.to_string());

    let pool = OpsConfig::from_env().connect().await?;
    match maintenance::seed_sample_data(&pool, &password).await? {
        SeedOutcome::Seeded(summary) => {
            println!("Sample data added successfully!");
            println!("Categories: {}", summary.categories);
            println!("Users: {}", summary.users);
            println!("Agents: {}", summary.agents);
            println!("Tickets: {}", summary.ticket_ids.join(", "));
        }
        SeedOutcome::AlreadySeeded { users } => {
            println!("Database already contains {users} users; skipping seed");
        }
    }
    Ok(true)
}
