//! Well-known notification channel name constants.
//!
//! These match the values stored in `notifications.channel` and the channel
//! names reported by the notification dispatcher.

/// Notification stored in the `notifications` table for the in-app inbox.
pub const CHANNEL_IN_APP: &str = "in_app";

/// Webhook notification delivered to an external HTTP endpoint.
pub const CHANNEL_WEBHOOK: &str = "webhook";

/// Email notification delivered via SMTP.
pub const CHANNEL_EMAIL: &str = "email";
