#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use complaintbot_db::models::agent::{Agent, CreateAgent};
use complaintbot_core::status::{TicketPriority, TicketStatus};
use complaintbot_db::models::ticket::{CreateTicket, Ticket};
use complaintbot_db::models::user::{CreateUser, User};
use complaintbot_db::repositories::{AgentRepo, TicketRepo, UserRepo};
use complaintbot_db::DbPool;
use complaintbot_notify::{NotifyError, StatusNotifier, StatusUpdate};

/// Fresh in-memory database with every migration applied.
pub async fn test_pool() -> DbPool {
    let pool = complaintbot_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool should open");
    complaintbot_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    pool
}

pub async fn insert_user(pool: &DbPool, name: &str, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            full_name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user insert should succeed")
}

pub async fn insert_agent(pool: &DbPool, user_id: i64) -> Agent {
    AgentRepo::create(
        pool,
        &CreateAgent {
            user_id,
            specialization: Some("Technical".to_string()),
            max_tickets: 10,
            is_available: true,
        },
    )
    .await
    .expect("agent insert should succeed")
}

pub async fn insert_ticket(
    pool: &DbPool,
    id: &str,
    user_id: i64,
    status: &str,
    assigned_to: Option<i64>,
) -> Ticket {
    TicketRepo::create(
        pool,
        &CreateTicket {
            id: id.to_string(),
            title: "Cannot access my account".to_string(),
            description: "Locked out since yesterday".to_string(),
            user_id,
            category: Some("Account".to_string()),
            category_id: None,
            priority: TicketPriority::Medium,
            status: status.parse::<TicketStatus>().expect("test status should parse"),
            assigned_to,
        },
    )
    .await
    .expect("ticket insert should succeed")
}

/// Notifier that records every update it is asked to deliver.
pub struct RecordingNotifier {
    name: &'static str,
    fail: bool,
    pub sent: Mutex<Vec<StatusUpdate>>,
}

impl RecordingNotifier {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn sent(&self) -> Vec<StatusUpdate> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusNotifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn notify_status_update(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(update.clone());
        if self.fail {
            return Err(NotifyError::NotConfigured("recording notifier set to fail".into()));
        }
        Ok(())
    }
}
