//! Minimal `--flag value` parsing shared by the tool binaries.
//!
//! Each binary declares the flags it accepts; anything else is a usage
//! error. Both `--flag value` and `--flag=value` are accepted.

use std::process::ExitCode;

use crate::error::{OpsError, OpsResult};

/// Whether a flag takes a value or is a bare switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Value,
    Switch,
}

/// Parsed command-line flags.
#[derive(Debug, Default)]
pub struct Flags {
    values: Vec<(String, String)>,
    switches: Vec<String>,
    help: bool,
}

impl Flags {
    /// Parse `args` (without the program name) against the declared flags.
    pub fn parse<I>(args: I, known: &[(&str, Arity)]) -> OpsResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Flags::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                flags.help = true;
                continue;
            }

            let Some(stripped) = arg.strip_prefix("--") else {
                return Err(OpsError::Usage(format!("unexpected argument '{arg}'")));
            };
            let (name, inline) = match stripped.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (stripped, None),
            };

            let arity = known
                .iter()
                .find(|(flag, _)| *flag == name)
                .map(|(_, arity)| *arity)
                .ok_or_else(|| OpsError::Usage(format!("unknown flag '--{name}'")))?;

            match arity {
                Arity::Switch => {
                    if inline.is_some() {
                        return Err(OpsError::Usage(format!("--{name} does not take a value")));
                    }
                    flags.switches.push(name.to_string());
                }
                Arity::Value => {
                    let value = match inline {
                        Some(value) => value,
                        None => args
                            .next()
                            .filter(|v| !v.starts_with("--"))
                            .ok_or_else(|| OpsError::Usage(format!("--{name} requires a value")))?,
                    };
                    flags.values.push((name.to_string(), value));
                }
            }
        }

        Ok(flags)
    }

    /// Whether `-h` / `--help` was given.
    pub fn help_requested(&self) -> bool {
        self.help
    }

    /// Last value given for `name`.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.values
            .iter()
            .rev()
            .find(|(flag, _)| flag == name)
            .map(|(_, value)| value.clone())
    }

    /// Last value given for `name`, or a usage error.
    pub fn required(&self, name: &str) -> OpsResult<String> {
        self.optional(name)
            .ok_or_else(|| OpsError::Usage(format!("missing required flag --{name}")))
    }

    /// Every value given for a repeatable flag, in order.
    pub fn all(&self, name: &str) -> Vec<String> {
        self.values
            .iter()
            .filter(|(flag, _)| flag == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s == name)
    }
}

/// Parse the process arguments, printing usage on `--help` or bad input.
///
/// `Err` carries the exit code the binary should return immediately.
pub fn parse_process_args(usage: &str, known: &[(&str, Arity)]) -> Result<Flags, ExitCode> {
    match Flags::parse(std::env::args().skip(1), known) {
        Ok(flags) if flags.help_requested() => {
            println!("{usage}");
            Err(ExitCode::SUCCESS)
        }
        Ok(flags) => Ok(flags),
        Err(e) => {
            eprintln!("error: {e}\n\n{usage}");
            Err(ExitCode::FAILURE)
        }
    }
}

/// Map a tool outcome to the process exit code, reporting errors.
pub fn finish(outcome: OpsResult<bool>) -> ExitCode {
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Operation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
