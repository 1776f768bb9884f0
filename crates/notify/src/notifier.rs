//! The notification backend seam.
//!
//! Callers hold a `Box<dyn StatusNotifier>` chosen from configuration (see
//! [`NotifierKind`](crate::config::NotifierKind)); swapping backends never
//! changes a call site.

use async_trait::async_trait;

use crate::email::{EmailDelivery, EmailError};
use crate::message::StatusUpdate;
use crate::webhook::WebhookError;

/// Error type for notification backends.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// The in-app channel could not store the notification.
    #[error("Notification store error: {0}")]
    Store(#[from] sqlx::Error),

    /// A backend or channel needs configuration that is missing.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// A dispatcher was built without any channel.
    #[error("No notification channels configured")]
    NoChannels,

    /// Every channel of a dispatcher failed.
    #[error("All {attempted} notification channels failed")]
    AllChannelsFailed { attempted: usize },
}

/// A backend that delivers ticket status updates.
#[async_trait]
pub trait StatusNotifier: Send + Sync {
    /// Short backend name for logs and reports.
    fn name(&self) -> &'static str;

    /// Deliver one status update. Not idempotent: calling twice sends twice.
    async fn notify_status_update(&self, update: &StatusUpdate) -> Result<(), NotifyError>;
}

/// Sends the status update as a single transactional email.
pub struct DirectEmailNotifier {
    email: EmailDelivery,
}

impl DirectEmailNotifier {
    pub fn new(email: EmailDelivery) -> Self {
        Self { email }
    }
}

#[async_trait]
impl StatusNotifier for DirectEmailNotifier {
    fn name(&self) -> &'static str {
        "direct_email"
    }

    async fn notify_status_update(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        tracing::info!(
            ticket_id = %update.ticket_id,
            to = %update.recipient_email,
            "Sending direct status update email"
        );
        self.email.deliver_status_update(update).await?;
        Ok(())
    }
}
