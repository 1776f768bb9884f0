use std::process::ExitCode;

use complaintbot_ops::auth_client::AuthClient;
use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Log in against the running web application.

Usage: test-login --email <EMAIL> --password <PASSWORD> [--base-url <URL>]

--base-url defaults to API_BASE_URL or http://localhost:5000.";

const FLAGS: &[(&str, Arity)] = &[
    ("email", Arity::Value),
    ("password", Arity::Value),
    ("base-url", Arity::Value),
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
    let email = flags.required("email")?;
    let password = flags.required("password")?;
    let base_url = flags
        .optional("base-url")
        .unwrap_or_else(|| OpsConfig::from_env().api_base_url);

    let client = AuthClient::new(base_url)?;
    let attempt = client.login(&email, &password).await?;
    print!("{}", attempt.report("Login"));
    Ok(attempt.succeeded())
}
