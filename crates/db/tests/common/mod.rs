#![allow(dead_code)]

use complaintbot_core::status::{TicketPriority, TicketStatus};
use complaintbot_db::models::ticket::{CreateTicket, Ticket};
use complaintbot_db::models::user::{CreateUser, User};
use complaintbot_db::repositories::{TicketRepo, UserRepo};
use complaintbot_db::DbPool;

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

pub async fn insert_user(pool: &DbPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            full_name: format!("Test {email}"),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user insert should succeed")
}

pub async fn insert_ticket(pool: &DbPool, id: &str, user_id: i64, status: &str) -> Ticket {
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
            assigned_to: None,
        },
    )
    .await
    .expect("ticket insert should succeed")
}
