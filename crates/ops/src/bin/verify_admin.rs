use std::process::ExitCode;

use complaintbot_ops::admin::{self, DEFAULT_ADMIN_EMAILS};
use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Check whether admin accounts exist and show their details.

Usage: verify-admin [--email <EMAIL>]...

Without --email, checks admin@example.com and admin@complaintbot.ai.";

const FLAGS: &[(&str, Arity)] = &[("email", Arity::Value)];

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
    let mut emails = flags.all("email");
    if emails.is_empty() {
        emails = DEFAULT_ADMIN_EMAILS.iter().map(|e| e.to_string()).collect();
    }

    let pool = OpsConfig::from_env().connect().await?;
    for email in &emails {
        let user = admin::find_user(&pool, email).await?;
        println!("{}", admin::describe_lookup(email, user.as_ref()));
    }
    Ok(true)
}
