//! Multi-channel notification dispatcher.
//!
//! [`NotificationDispatcher`] fans a [`StatusUpdate`] out to every configured
//! [`NotificationChannel`]. Channels are attempted in order and independently;
//! the dispatch succeeds when at least one channel delivers.

use async_trait::async_trait;
use complaintbot_core::channels::{CHANNEL_EMAIL, CHANNEL_IN_APP, CHANNEL_WEBHOOK};
use complaintbot_db::models::notification::CreateNotification;
use complaintbot_db::repositories::NotificationRepo;
use complaintbot_db::DbPool;

use crate::email::EmailDelivery;
use crate::message::StatusUpdate;
use crate::notifier::{NotifyError, StatusNotifier};
use crate::webhook::WebhookDelivery;

/// One delivery path of the dispatcher.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name, one of the `CHANNEL_*` constants.
    fn name(&self) -> &'static str;

    async fn deliver(&self, update: &StatusUpdate) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// Email channel backed by SMTP.
pub struct EmailChannel {
    email: EmailDelivery,
}

impl EmailChannel {
    pub fn new(email: EmailDelivery) -> Self {
        Self { email }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        CHANNEL_EMAIL
    }

    async fn deliver(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        self.email.deliver_status_update(update).await?;
        Ok(())
    }
}

/// Webhook channel posting JSON to a fixed URL.
pub struct WebhookChannel {
    url: String,
    delivery: WebhookDelivery,
}

impl WebhookChannel {
    pub fn new(url: impl Into<String>, delivery: WebhookDelivery) -> Self {
        Self {
            url: url.into(),
            delivery,
        }
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        CHANNEL_WEBHOOK
    }

    async fn deliver(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        self.delivery.deliver(&self.url, update).await?;
        Ok(())
    }
}

/// In-app channel: stores the notification in the `notifications` table.
pub struct InAppChannel {
    pool: DbPool,
}

impl InAppChannel {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationChannel for InAppChannel {
    fn name(&self) -> &'static str {
        CHANNEL_IN_APP
    }

    async fn deliver(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        let id = NotificationRepo::create(
            &self.pool,
            &CreateNotification {
                user_id: update.user_id,
                ticket_id: Some(update.ticket_id.clone()),
                channel: CHANNEL_IN_APP.to_string(),
                subject: update.subject(),
                body: update.body(),
            },
        )
        .await?;
        tracing::debug!(notification_id = id, user_id = update.user_id, "In-app notification stored");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

/// Fans status updates out over several channels.
pub struct NotificationDispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// Names of the configured channels, in dispatch order.
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }
}

#[async_trait]
impl StatusNotifier for NotificationDispatcher {
    fn name(&self) -> &'static str {
        "dispatcher"
    }

    async fn notify_status_update(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        if self.channels.is_empty() {
            return Err(NotifyError::NoChannels);
        }

        let mut delivered = 0usize;
        for channel in &self.channels {
            match channel.deliver(update).await {
                Ok(()) => {
                    delivered += 1;
                    tracing::info!(
                        channel = channel.name(),
                        ticket_id = %update.ticket_id,
                        "Status update delivered"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        channel = channel.name(),
                        ticket_id = %update.ticket_id,
                        error = %e,
                        "Channel delivery failed"
                    );
                }
            }
        }

        if delivered == 0 {
            return Err(NotifyError::AllChannelsFailed {
                attempted: self.channels.len(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;

    struct FakeChannel {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl NotificationChannel for FakeChannel {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn deliver(&self, _update: &StatusUpdate) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::NotConfigured("fake".into()))
            } else {
                Ok(())
            }
        }
    }

    fn channel(fail: bool, calls: &Arc<AtomicUsize>) -> Box<dyn NotificationChannel> {
        Box::new(FakeChannel {
            fail,
            calls: Arc::clone(calls),
        })
    }

    fn update() -> StatusUpdate {
        StatusUpdate {
            ticket_id: "TCK-1700000000".into(),
            ticket_title: "Billing discrepancy".into(),
            user_id: 3,
            recipient_email: "customer2@example.com".into(),
            recipient_name: "Customer Two".into(),
            old_status: "in_progress".into(),
            new_status: "resolved".into(),
            agent_name: None,
            timestamp: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn succeeds_when_any_channel_succeeds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher =
            NotificationDispatcher::new(vec![channel(true, &calls), channel(false, &calls)]);

        dispatcher.notify_status_update(&update()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2, "every channel is attempted");
    }

    #[tokio::test]
    async fn fails_when_every_channel_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher =
            NotificationDispatcher::new(vec![channel(true, &calls), channel(true, &calls)]);

        let err = dispatcher.notify_status_update(&update()).await.unwrap_err();
        assert_matches!(err, NotifyError::AllChannelsFailed { attempted: 2 });
    }

    #[tokio::test]
    async fn empty_dispatcher_reports_no_channels() {
        let dispatcher = NotificationDispatcher::new(vec![]);
        let err = dispatcher.notify_status_update(&update()).await.unwrap_err();
        assert_matches!(err, NotifyError::NoChannels);
    }
}
