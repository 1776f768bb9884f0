//! Domain vocabulary shared by every complaintbot crate.
//!
//! - [`types`] -- primary key and timestamp aliases.
//! - [`error`] -- [`CoreError`](error::CoreError), the domain error taxonomy.
//! - [`roles`] -- well-known user role names.
//! - [`status`] -- the canonical ticket status and priority enumerations.
//! - [`ticket_id`] -- `TCK-<unix seconds>` ticket identifiers.
//! - [`channels`] -- notification channel names.

pub mod channels;
pub mod error;
pub mod roles;
pub mod status;
pub mod ticket_id;
pub mod types;
