use std::process::ExitCode;

use complaintbot_ops::admin::{self, CreateAdminOutcome, NewAdmin};
use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Create an admin user.

Usage: create-admin --name <NAME> --email <EMAIL> --password <PASSWORD>";

const FLAGS: &[(&str, Arity)] = &[
    ("name", Arity::Value),
    ("email", Arity::Value),
    ("password", Arity::Value),
];

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
    let input = NewAdmin {
        full_name: flags.required("name")?,
        email: flags.required("email")?,
        password: flags.required("password")?,
    };

    let pool = OpsConfig::from_env().connect().await?;
    match admin::create_admin(&pool, &input).await? {
        CreateAdminOutcome::Created(user) => {
            println!("Admin user created successfully!");
            println!("Email: {}", user.email);
            println!("Role: {}", user.role);
        }
        CreateAdminOutcome::AlreadyExists => {
            println!("User with email {} already exists", input.email);
        }
    }
    Ok(true)
}
