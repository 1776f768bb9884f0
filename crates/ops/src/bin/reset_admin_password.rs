use std::process::ExitCode;

use complaintbot_ops::admin::{self, PasswordReset};
use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::{telemetry, OpsConfig, OpsResult};

const USAGE: &str = "\
Regenerate the password hash of an existing admin.

Usage: reset-admin-password --email <EMAIL> --password <PASSWORD>";

const FLAGS: &[(&str, Arity)] = &[("email", Arity::Value), ("password", Arity::Value)];

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

    let pool = OpsConfig::from_env().connect().await?;
    match admin::reset_admin_password(&pool, &email, &password).await? {
        PasswordReset::Reset(user) => {
            println!("Password reset successfully for {}", user.email);
            Ok(true)
        }
        PasswordReset::NotAdmin { role } => {
            println!("User {email} is not an admin (role: {role}); password left unchanged");
            Ok(false)
        }
    }
}
