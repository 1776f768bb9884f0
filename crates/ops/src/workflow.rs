//! Ticket status transition followed by a status-update notification.
//!
//! The transition and the notification are independent steps: a committed
//! transition is never undone because the notification failed, and the
//! [`StatusUpdateOutcome`] reports both results.

use chrono::Utc;
use complaintbot_core::status::TicketStatus;
use complaintbot_core::types::Timestamp;
use complaintbot_db::models::ticket::Ticket;
use complaintbot_db::models::user::User;
use complaintbot_db::repositories::{AgentRepo, TicketRepo, UserRepo};
use complaintbot_db::DbPool;
use complaintbot_notify::{NotifyError, StatusNotifier, StatusUpdate};

use crate::error::{OpsError, OpsResult};

/// How the ticket to update is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketSelector {
    /// A specific `TCK-` identifier.
    Id(String),
    /// The oldest ticket owned by the user with this email.
    OwnedBy(String),
    /// The oldest ticket in the system.
    First,
}

/// Input for [`run_status_update`] and [`compare_backends`].
#[derive(Debug, Clone)]
pub struct StatusUpdateRequest {
    pub selector: TicketSelector,
    /// Target status; `None` leaves the ticket as it is.
    pub new_status: Option<TicketStatus>,
    /// Send to this address instead of the owner's stored email.
    pub recipient_override: Option<String>,
    /// Old status to report when no transition happens.
    pub old_status_override: Option<TicketStatus>,
}

impl StatusUpdateRequest {
    pub fn for_ticket(id: impl Into<String>) -> Self {
        Self {
            selector: TicketSelector::Id(id.into()),
            new_status: None,
            recipient_override: None,
            old_status_override: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.new_status = Some(status);
        self
    }
}

/// Everything needed to address a status-update notification.
#[derive(Debug, Clone)]
pub struct NotificationContext {
    pub ticket: Ticket,
    pub owner: User,
    /// Owner's email, or the override when one was given.
    pub recipient_email: String,
    /// Full name of the assigned agent's user, when it could be resolved.
    pub agent_name: Option<String>,
}

impl NotificationContext {
    fn status_update(&self, old_status: &str, new_status: &str, at: Timestamp) -> StatusUpdate {
        StatusUpdate {
            ticket_id: self.ticket.id.clone(),
            ticket_title: self.ticket.title.clone(),
            user_id: self.owner.id,
            recipient_email: self.recipient_email.clone(),
            recipient_name: self.owner.full_name.clone(),
            old_status: old_status.to_string(),
            new_status: new_status.to_string(),
            agent_name: self.agent_name.clone(),
            timestamp: at,
        }
    }
}

/// Result of [`transition_status`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Changed {
        from: String,
        to: TicketStatus,
        at: Timestamp,
    },
    /// The ticket already had the target status; nothing was written.
    Unchanged,
}

/// Result of one backend's delivery attempt.
#[derive(Debug)]
pub struct DeliveryResult {
    pub backend: &'static str,
    pub result: Result<(), NotifyError>,
}

impl DeliveryResult {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// What a status-update run did.
#[derive(Debug)]
pub struct StatusUpdateOutcome {
    pub ticket_id: String,
    pub transition: Transition,
    /// `true` when the old status in the notification is a placeholder.
    pub simulated: bool,
    pub old_status: String,
    pub new_status: String,
    pub deliveries: Vec<DeliveryResult>,
}

impl StatusUpdateOutcome {
    /// Whether at least one backend delivered the notification.
    pub fn notified(&self) -> bool {
        self.deliveries.iter().any(DeliveryResult::succeeded)
    }
}

/// Look up the ticket, its owner and the assigned agent's name.
pub async fn resolve_context(
    pool: &DbPool,
    selector: &TicketSelector,
    recipient_override: Option<&str>,
) -> OpsResult<NotificationContext> {
    let ticket = match selector {
        TicketSelector::Id(id) => TicketRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| OpsError::not_found("ticket", id))?,
        TicketSelector::OwnedBy(email) => {
            let user = UserRepo::find_by_email(pool, email)
                .await?
                .ok_or_else(|| OpsError::not_found("user", email))?;
            TicketRepo::first_for_user(pool, user.id)
                .await?
                .ok_or_else(|| OpsError::not_found("ticket", format!("owned by {email}")))?
        }
        TicketSelector::First => TicketRepo::first(pool)
            .await?
            .ok_or_else(|| OpsError::not_found("ticket", "any"))?,
    };

    let owner = UserRepo::find_by_id(pool, ticket.user_id)
        .await?
        .ok_or_else(|| OpsError::not_found("user", ticket.user_id))?;

    let agent_name = match ticket.assigned_to {
        Some(agent_id) => match AgentRepo::find_by_id(pool, agent_id).await? {
            Some(agent) => UserRepo::find_by_id(pool, agent.user_id)
                .await?
                .map(|user| user.full_name),
            None => {
                tracing::warn!(ticket_id = %ticket.id, agent_id, "Assigned agent not found");
                None
            }
        },
        None => None,
    };

    let recipient_email = recipient_override
        .map(str::to_string)
        .unwrap_or_else(|| owner.email.clone());

    Ok(NotificationContext {
        ticket,
        owner,
        recipient_email,
        agent_name,
    })
}

/// Move a ticket to `new_status`.
///
/// Equal status is a no-op that leaves `updated_at` alone. Otherwise the
/// status, `updated_at` and (for `resolved`) `resolved_at` are written in
/// one transaction; a failed commit is rolled back and surfaces as
/// [`OpsError::Persistence`].
pub async fn transition_status(
    pool: &DbPool,
    ticket_id: &str,
    new_status: TicketStatus,
) -> OpsResult<Transition> {
    let ticket = TicketRepo::find_by_id(pool, ticket_id)
        .await?
        .ok_or_else(|| OpsError::not_found("ticket", ticket_id))?;

    if ticket.status == new_status.as_str() {
        tracing::info!(ticket_id, status = %new_status, "Status unchanged, skipping update");
        return Ok(Transition::Unchanged);
    }

    let change = TicketRepo::transition_status(pool, ticket_id, new_status, Utc::now())
        .await?
        .ok_or_else(|| OpsError::not_found("ticket", ticket_id))?;

    tracing::info!(
        ticket_id,
        from = %change.previous,
        to = %new_status,
        "Ticket status updated"
    );
    Ok(Transition::Changed {
        from: change.previous,
        to: new_status,
        at: change.ticket.updated_at,
    })
}

/// Send a status update for a ticket whose status is not changing.
///
/// The old status is `old_override` when given, otherwise a placeholder
/// (see [`TicketStatus::placeholder_previous`]). Nothing is written.
pub async fn simulate_notification(
    notifier: &dyn StatusNotifier,
    context: &NotificationContext,
    old_override: Option<TicketStatus>,
) -> (StatusUpdate, DeliveryResult) {
    let old = old_override
        .unwrap_or_else(|| TicketStatus::placeholder_previous(&context.ticket.status));
    let update = context.status_update(old.as_str(), &context.ticket.status, Utc::now());
    tracing::info!(
        ticket_id = %update.ticket_id,
        old_status = %update.old_status,
        "Simulating status update notification"
    );
    let result = deliver(notifier, &update).await;
    (update, result)
}

async fn deliver(notifier: &dyn StatusNotifier, update: &StatusUpdate) -> DeliveryResult {
    let result = notifier.notify_status_update(update).await;
    match &result {
        Ok(()) => tracing::info!(
            backend = notifier.name(),
            ticket_id = %update.ticket_id,
            to = %update.recipient_email,
            "Status update notification sent"
        ),
        Err(e) => tracing::error!(
            backend = notifier.name(),
            ticket_id = %update.ticket_id,
            error = %e,
            "Status update notification failed"
        ),
    }
    DeliveryResult {
        backend: notifier.name(),
        result,
    }
}

/// Resolve, transition if needed, then notify through `notifier`.
pub async fn run_status_update(
    pool: &DbPool,
    notifier: &dyn StatusNotifier,
    request: &StatusUpdateRequest,
) -> OpsResult<StatusUpdateOutcome> {
    compare_backends(pool, &[notifier], request).await
}

/// Like [`run_status_update`] but sends the same update through every
/// backend in `notifiers`. The transition happens once.
pub async fn compare_backends(
    pool: &DbPool,
    notifiers: &[&dyn StatusNotifier],
    request: &StatusUpdateRequest,
) -> OpsResult<StatusUpdateOutcome> {
    if notifiers.is_empty() {
        return Err(OpsError::Notification(NotifyError::NoChannels));
    }

    let context = resolve_context(
        pool,
        &request.selector,
        request.recipient_override.as_deref(),
    )
    .await?;

    let transition = match request.new_status {
        Some(status) => transition_status(pool, &context.ticket.id, status).await?,
        None => Transition::Unchanged,
    };

    let mut deliveries = Vec::with_capacity(notifiers.len());
    let (update, simulated) = match &transition {
        Transition::Changed { from, to, at } => {
            let update = context.status_update(from, to.as_str(), *at);
            for notifier in notifiers {
                deliveries.push(deliver(*notifier, &update).await);
            }
            (update, false)
        }
        Transition::Unchanged => {
            let (update, first) =
                simulate_notification(notifiers[0], &context, request.old_status_override).await;
            deliveries.push(first);
            for notifier in &notifiers[1..] {
                deliveries.push(deliver(*notifier, &update).await);
            }
            (update, true)
        }
    };

    Ok(StatusUpdateOutcome {
        ticket_id: context.ticket.id,
        transition,
        simulated,
        old_status: update.old_status,
        new_status: update.new_status,
        deliveries,
    })
}
