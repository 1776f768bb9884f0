use std::process::ExitCode;

use complaintbot_ops::auth_client::AuthClient;
use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Register an admin through the running web application.

Usage: register-admin --name <NAME> --email <EMAIL> --password <PASSWORD> [--base-url <URL>]";

const FLAGS: &[(&str, Arity)] = &[
    ("name", Arity::Value),
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
    let name = flags.required("name")?;
    let email = flags.required("email")?;
    let password = flags.required("password")?;
    let base_url = flags
        .optional("base-url")
        .unwrap_or_else(|| OpsConfig::from_env().api_base_url);

    let client = AuthClient::new(base_url)?;
    let attempt = client.register_admin(&name, &email, &password).await?;
    print!("{}", attempt.report("Registration"));
    Ok(attempt.succeeded())
}
