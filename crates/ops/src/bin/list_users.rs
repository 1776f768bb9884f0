use std::process::ExitCode;

use complaintbot_ops::admin;
use complaintbot_ops::cli::{self, Arity};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
List every user with id, name, email and role.

Usage: list-users";

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
    let users = admin::list_users(&pool).await?;
    print!("{}", admin::format_user_table(&users));
    Ok(true)
}
