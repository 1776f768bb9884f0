//! The status-update message delivered by every notification backend.

use chrono::{DateTime, Utc};
use complaintbot_core::types::DbId;
use serde::{Deserialize, Serialize};

/// A ticket moved (or is reported as moving) from `old_status` to
/// `new_status`.
///
/// Statuses are carried as stored text so that legacy values can still be
/// reported verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub ticket_id: String,
    pub ticket_title: String,

    /// Owner of the ticket; in-app notifications are filed under this user.
    pub user_id: DbId,

    /// Delivery address. May differ from the owner's stored email when the
    /// caller overrides the recipient.
    pub recipient_email: String,
    pub recipient_name: String,

    pub old_status: String,
    pub new_status: String,

    /// Display name of the assigned agent, when the ticket has one.
    pub agent_name: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl StatusUpdate {
    /// Email subject / in-app title.
    pub fn subject(&self) -> String {
        format!(
            "[Ticket {}] Status updated to {}",
            self.ticket_id,
            humanize(&self.new_status)
        )
    }

    /// Plain-text body.
    pub fn body(&self) -> String {
        let mut body = format!(
            "Hello {},\n\n\
             The status of your ticket \"{}\" ({}) has changed.\n\n\
             Previous status: {}\n\
             New status: {}\n",
            self.recipient_name,
            self.ticket_title,
            self.ticket_id,
            humanize(&self.old_status),
            humanize(&self.new_status),
        );
        if let Some(agent) = &self.agent_name {
            body.push_str(&format!("Assigned agent: {agent}\n"));
        }
        body.push_str(&format!(
            "Updated at: {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M UTC")
        ));
        body
    }
}

/// `in_progress` -> `In Progress`.
fn humanize(status: &str) -> String {
    status
        .split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
