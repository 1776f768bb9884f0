//! Backend construction and the in-app channel against a real database.

use assert_matches::assert_matches;
use complaintbot_core::status::{TicketPriority, TicketStatus};
use complaintbot_db::models::ticket::CreateTicket;
use complaintbot_db::models::user::CreateUser;
use complaintbot_db::repositories::{NotificationRepo, TicketRepo, UserRepo};
use complaintbot_db::DbPool;
use complaintbot_notify::{NotifierKind, NotifyConfig, NotifyError, StatusUpdate};

async fn pool_with_ticket() -> (DbPool, i64) {
    let pool = complaintbot_db::create_pool("sqlite::memory:").await.unwrap();
    complaintbot_db::run_migrations(&pool).await.unwrap();
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            full_name: "Customer One".into(),
            email: "customer1@example.com".into(),
            password_hash: "hash".into(),
            role: "user".into(),
        },
    )
    .await
    .unwrap();
    TicketRepo::create(
        &pool,
        &CreateTicket {
            id: "TCK-1700000000".into(),
            title: "Cannot access my account".into(),
            description: String::new(),
            user_id: user.id,
            category: None,
            category_id: None,
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            assigned_to: None,
        },
    )
    .await
    .unwrap();
    (pool, user.id)
}

fn in_app_only() -> NotifyConfig {
    NotifyConfig {
        backend: NotifierKind::Dispatcher,
        email: None,
        webhook_url: None,
        in_app: true,
    }
}

fn update(user_id: i64) -> StatusUpdate {
    StatusUpdate {
        ticket_id: "TCK-1700000000".into(),
        ticket_title: "Cannot access my account".into(),
        user_id,
        recipient_email: "customer1@example.com".into(),
        recipient_name: "Customer One".into(),
        old_status: "open".into(),
        new_status: "resolved".into(),
        agent_name: None,
        timestamp: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_direct_requires_smtp() {
    let (pool, _) = pool_with_ticket().await;
    let result = in_app_only().build(NotifierKind::Direct, &pool);
    assert_matches!(result.err(), Some(NotifyError::NotConfigured(var)) if var == "SMTP_HOST");
}

#[tokio::test]
async fn test_dispatcher_without_channels_is_rejected() {
    let (pool, _) = pool_with_ticket().await;
    let config = NotifyConfig {
        in_app: false,
        ..in_app_only()
    };
    assert_matches!(
        config.build(NotifierKind::Dispatcher, &pool).err(),
        Some(NotifyError::NoChannels)
    );
}

#[tokio::test]
async fn test_fallback_to_dispatcher_stores_in_app_notification() {
    let (pool, user_id) = pool_with_ticket().await;
    let notifier = in_app_only()
        .build_with_fallback(NotifierKind::Direct, &pool)
        .unwrap();
    assert_eq!(notifier.name(), "dispatcher");

    notifier.notify_status_update(&update(user_id)).await.unwrap();

    let stored = NotificationRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].channel, "in_app");
    assert_eq!(stored[0].ticket_id.as_deref(), Some("TCK-1700000000"));
    assert!(stored[0].body.contains("New status: Resolved"));
}
