use std::process::ExitCode;

use complaintbot_core::status::TicketStatus;
use complaintbot_notify::{NotifierKind, NotifyConfig, StatusNotifier};
use complaintbot_ops::cli::{self, Arity, Flags};
use complaintbot_ops::workflow::{
    self, StatusUpdateOutcome, StatusUpdateRequest, TicketSelector, Transition,
};
use complaintbot_ops::{telemetry, OpsConfig, OpsError, OpsResult};

const USAGE: &str = "\
Update a ticket's status and send the status-update notification.

Usage: send-status-email [OPTIONS]

Options:
  --ticket-id <ID>        Ticket to update (default: the first ticket)
  --owner-email <EMAIL>   Use the first ticket owned by this user instead
  --user-email <EMAIL>    Send to this address instead of the owner's
  --new-status <STATUS>   Target status
  --old-status <STATUS>   Old status to report when the status is unchanged
  --direct                Use the direct email backend
  --compare               Send through both backends

NOTIFICATION_BACKEND selects the backend when --direct is not given.";

const FLAGS: &[(&str, Arity)] = &[
    ("ticket-id", Arity::Value),
    ("owner-email", Arity::Value),
    ("user-email", Arity::Value),
    ("new-status", Arity::Value),
    ("old-status", Arity::Value),
    ("direct", Arity::Switch),
    ("compare", Arity::Switch),
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

fn parse_status(flags: &Flags, name: &str) -> OpsResult<Option<TicketStatus>> {
    flags
        .optional(name)
        .map(|raw| {
            raw.parse::<TicketStatus>().map_err(|_| {
                OpsError::Usage(format!(
                    "invalid --{name} '{raw}' (expected one of: {})",
                    TicketStatus::choices()
                ))
            })
        })
        .transpose()
}

fn request_from(flags: &Flags) -> OpsResult<StatusUpdateRequest> {
    let selector = match (flags.optional("ticket-id"), flags.optional("owner-email")) {
        (Some(_), Some(_)) => {
            return Err(OpsError::Usage(
                "--ticket-id and --owner-email are mutually exclusive".into(),
            ))
        }
        (Some(id), None) => TicketSelector::Id(id),
        (None, Some(email)) => TicketSelector::OwnedBy(email),
        (None, None) => TicketSelector::First,
    };
    Ok(StatusUpdateRequest {
        selector,
        new_status: parse_status(flags, "new-status")?,
        recipient_override: flags.optional("user-email"),
        old_status_override: parse_status(flags, "old-status")?,
    })
}

async fn run(flags: &Flags) -> OpsResult<bool> {
    let request = request_from(flags)?;
    let pool = OpsConfig::from_env().connect().await?;
    let notify_config = NotifyConfig::from_env();

    let outcome = if flags.switch("compare") {
        let mut built = Vec::new();
        for kind in [NotifierKind::Dispatcher, NotifierKind::Direct] {
            match notify_config.build(kind, &pool) {
                Ok(notifier) => built.push(notifier),
                Err(e) => tracing::warn!(backend = %kind, error = %e, "Backend unavailable, skipping"),
            }
        }
        let backends: Vec<&dyn StatusNotifier> = built.iter().map(|n| n.as_ref()).collect();
        workflow::compare_backends(&pool, &backends, &request).await?
    } else {
        let preferred = if flags.switch("direct") {
            NotifierKind::Direct
        } else {
            notify_config.backend
        };
        let notifier = notify_config.build_with_fallback(preferred, &pool)?;
        workflow::run_status_update(&pool, notifier.as_ref(), &request).await?
    };

    print_outcome(&outcome);
    Ok(outcome.notified())
}

fn print_outcome(outcome: &StatusUpdateOutcome) {
    match &outcome.transition {
        Transition::Changed { from, to, .. } => {
            println!("Updated ticket {} status from {from} to {to}", outcome.ticket_id);
        }
        Transition::Unchanged => {
            println!(
                "Ticket {} status unchanged; simulated update {} -> {}",
                outcome.ticket_id, outcome.old_status, outcome.new_status
            );
        }
    }
    for delivery in &outcome.deliveries {
        match &delivery.result {
            Ok(()) => println!("[{}] status update notification sent", delivery.backend),
            Err(e) => println!("[{}] failed to send status update: {e}", delivery.backend),
        }
    }
}
