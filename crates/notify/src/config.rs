//! Backend selection.
//!
//! Which [`StatusNotifier`] a tool uses is decided here from configuration,
//! never by loading alternate code at runtime.

use std::fmt;
use std::str::FromStr;

use complaintbot_db::DbPool;

use crate::dispatcher::{
    EmailChannel, InAppChannel, NotificationChannel, NotificationDispatcher, WebhookChannel,
};
use crate::email::{EmailConfig, EmailDelivery};
use crate::notifier::{DirectEmailNotifier, NotifyError, StatusNotifier};
use crate::webhook::WebhookDelivery;

/// The two interchangeable notification backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierKind {
    /// One transactional email per update.
    Direct,
    /// Fan-out over email, webhook and in-app channels.
    Dispatcher,
}

impl NotifierKind {
    /// The backend to try when this one cannot be built.
    pub fn other(self) -> NotifierKind {
        match self {
            NotifierKind::Direct => NotifierKind::Dispatcher,
            NotifierKind::Dispatcher => NotifierKind::Direct,
        }
    }
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierKind::Direct => f.write_str("direct"),
            NotifierKind::Dispatcher => f.write_str("dispatcher"),
        }
    }
}

impl FromStr for NotifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "email" => Ok(NotifierKind::Direct),
            "dispatcher" | "notification" => Ok(NotifierKind::Dispatcher),
            other => Err(format!(
                "unknown notification backend '{other}' (expected 'direct' or 'dispatcher')"
            )),
        }
    }
}

/// Notification settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub backend: NotifierKind,
    /// SMTP settings; `None` when `SMTP_HOST` is unset.
    pub email: Option<EmailConfig>,
    /// Webhook endpoint for the dispatcher's webhook channel.
    pub webhook_url: Option<String>,
    /// Whether the dispatcher stores in-app notifications.
    pub in_app: bool,
}

impl NotifyConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default      |
    /// |------------------------|--------------|
    /// | `NOTIFICATION_BACKEND` | `dispatcher` |
    /// | `NOTIFY_WEBHOOK_URL`   | unset        |
    /// | `NOTIFY_IN_APP`        | `true`       |
    ///
    /// SMTP variables are documented on [`EmailConfig::from_env`]. An
    /// unparseable `NOTIFICATION_BACKEND` falls back to the default with a
    /// warning.
    pub fn from_env() -> Self {
        let backend = match std::env::var("NOTIFICATION_BACKEND") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "Ignoring NOTIFICATION_BACKEND");
                NotifierKind::Dispatcher
            }),
            Err(_) => NotifierKind::Dispatcher,
        };

        let in_app = std::env::var("NOTIFY_IN_APP")
            .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            backend,
            email: EmailConfig::from_env(),
            webhook_url: std::env::var("NOTIFY_WEBHOOK_URL")
                .ok()
                .filter(|u| !u.trim().is_empty()),
            in_app,
        }
    }

    /// Build the backend of the given kind.
    pub fn build(
        &self,
        kind: NotifierKind,
        pool: &DbPool,
    ) -> Result<Box<dyn StatusNotifier>, NotifyError> {
        match kind {
            NotifierKind::Direct => {
                let email = self
                    .email
                    .clone()
                    .ok_or_else(|| NotifyError::NotConfigured("SMTP_HOST".into()))?;
                Ok(Box::new(DirectEmailNotifier::new(EmailDelivery::new(email))))
            }
            NotifierKind::Dispatcher => {
                let mut channels: Vec<Box<dyn NotificationChannel>> = Vec::new();
                if let Some(email) = &self.email {
                    channels.push(Box::new(EmailChannel::new(EmailDelivery::new(email.clone()))));
                }
                if let Some(url) = &self.webhook_url {
                    channels.push(Box::new(WebhookChannel::new(url, WebhookDelivery::new()?)));
                }
                if self.in_app {
                    channels.push(Box::new(InAppChannel::new(pool.clone())));
                }
                if channels.is_empty() {
                    return Err(NotifyError::NoChannels);
                }
                let dispatcher = NotificationDispatcher::new(channels);
                tracing::debug!(channels = ?dispatcher.channel_names(), "Dispatcher built");
                Ok(Box::new(dispatcher))
            }
        }
    }

    /// Build `preferred`, falling back to the other backend if `preferred`
    /// cannot be constructed. Returns the first construction error when
    /// neither can be built.
    pub fn build_with_fallback(
        &self,
        preferred: NotifierKind,
        pool: &DbPool,
    ) -> Result<Box<dyn StatusNotifier>, NotifyError> {
        match self.build(preferred, pool) {
            Ok(notifier) => Ok(notifier),
            Err(e) => {
                let fallback = preferred.other();
                tracing::warn!(
                    preferred = %preferred,
                    fallback = %fallback,
                    error = %e,
                    "Notification backend unavailable, falling back"
                );
                self.build(fallback, pool).map_err(|_| e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_aliases() {
        assert_eq!("direct".parse::<NotifierKind>(), Ok(NotifierKind::Direct));
        assert_eq!(" Dispatcher ".parse::<NotifierKind>(), Ok(NotifierKind::Dispatcher));
        assert_eq!("notification".parse::<NotifierKind>(), Ok(NotifierKind::Dispatcher));
        assert!("smtp2".parse::<NotifierKind>().is_err());
    }

    #[test]
    fn other_swaps_backends() {
        assert_eq!(NotifierKind::Direct.other(), NotifierKind::Dispatcher);
        assert_eq!(NotifierKind::Dispatcher.other(), NotifierKind::Direct);
    }
}
