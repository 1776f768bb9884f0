use std::path::PathBuf;
use std::process::ExitCode;

use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::patching::{self, UpdatePair};
use complaintbot_ops::{telemetry, OpsResult};

const USAGE: &str = "\
Replace files with their .updated counterparts, keeping .bak backups.

Usage: apply-updates [--root <DIR>] [--target <FILE>]...

With --target, only the named files are updated (from <FILE>.updated).
Otherwise every *.updated file under --root (default: .) is applied.";

const FLAGS: &[(&str, Arity)] = &[("root", Arity::Value), ("target", Arity::Value)];

fn main() -> ExitCode {
    telemetry::init();
    let flags = match cli::parse_process_args(USAGE, FLAGS) {
        Ok(flags) => flags,
        Err(code) => return code,
    };
    cli::finish(run(&flags))
}

fn run(flags: &Flags) -> OpsResult<bool> {
    let root = PathBuf::from(flags.optional("root").unwrap_or_else(|| ".".into()));
    let targets = flags.all("target");

    let pairs = if targets.is_empty() {
        patching::discover_updates(&root)?
    } else {
        targets
            .iter()
            .map(|t| UpdatePair::for_target(root.join(t)))
            .collect()
    };

    let report = patching::apply_updates(&pairs);
    for (path, error) in &report.failed {
        eprintln!("Failed: {}: {error}", path.display());
    }
    print!("{}", report.summary());
    Ok(report.succeeded())
}
