//! Ticket status-update notifications.
//!
//! - [`StatusUpdate`] -- the message every backend delivers.
//! - [`StatusNotifier`] -- the backend seam. Two implementations:
//!   [`DirectEmailNotifier`] (one SMTP email) and [`NotificationDispatcher`]
//!   (fan-out over [`NotificationChannel`]s).
//! - [`NotifyConfig`] / [`NotifierKind`] -- backend selection from the
//!   environment.
//! - [`email`] / [`webhook`] -- the underlying SMTP and HTTP deliveries.

pub mod config;
pub mod dispatcher;
pub mod email;
pub mod message;
pub mod notifier;
pub mod webhook;

pub use config::{NotifierKind, NotifyConfig};
pub use dispatcher::{
    EmailChannel, InAppChannel, NotificationChannel, NotificationDispatcher, WebhookChannel,
};
pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use message::StatusUpdate;
pub use notifier::{DirectEmailNotifier, NotifyError, StatusNotifier};
pub use webhook::{WebhookDelivery, WebhookError};
