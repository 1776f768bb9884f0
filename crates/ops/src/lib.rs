//! Operational tools for the complaintbot support desk.
//!
//! Every tool under `src/bin` is a thin shell over one function in this
//! library: parse flags, open the database (when needed), call the
//! operation, print the result, exit 0 or 1.
//!
//! - [`workflow`] -- ticket status transition and status-update notification.
//! - [`admin`] -- create, reset, list and verify users.
//! - [`maintenance`] -- schema setup, the `escalation_level` migration, seeding.
//! - [`auth_client`] -- login / register smoke tests over HTTP.
//! - [`patching`] -- `.updated` file hot-patching with `.bak` backups.

pub mod admin;
pub mod auth_client;
pub mod cli;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod password;
pub mod patching;
pub mod telemetry;
pub mod workflow;

pub use config::OpsConfig;
pub use error::{OpsError, OpsResult};
