//! Database maintenance: schema setup, the `escalation_level` column
//! migration, and sample-data seeding.

use chrono::Utc;
use complaintbot_core::roles::{ROLE_ADMIN, ROLE_USER};
use complaintbot_core::status::{TicketPriority, TicketStatus};
use complaintbot_core::ticket_id::ticket_id_for_unix;
use complaintbot_db::models::agent::CreateAgent;
use complaintbot_db::models::category::CreateCategory;
use complaintbot_db::models::ticket::CreateTicket;
use complaintbot_db::models::user::CreateUser;
use complaintbot_db::repositories::schema_repo::ColumnMigration;
use complaintbot_db::repositories::{AgentRepo, CategoryRepo, SchemaRepo, TicketRepo, UserRepo};
use complaintbot_db::DbPool;

use crate::error::OpsResult;
use crate::password;

/// Password given to seeded users when none is supplied.
pub const DEFAULT_SEED_PASSWORD: &str = "changeme123";

/// Create every table by applying the embedded migrations.
pub async fn setup_database(pool: &DbPool) -> OpsResult<()> {
    complaintbot_db::health_check(pool).await?;
    complaintbot_db::run_migrations(pool).await?;
    tracing::info!("Database tables created");
    Ok(())
}

/// Add `tickets.escalation_level INTEGER DEFAULT 0` if it is missing.
///
/// Safe to run repeatedly.
pub async fn add_escalation_level_column(pool: &DbPool) -> OpsResult<ColumnMigration> {
    let outcome = SchemaRepo::add_integer_column(pool, "tickets", "escalation_level", 0).await?;
    Ok(outcome)
}

/// What [`seed_sample_data`] inserted.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub categories: usize,
    pub users: usize,
    pub agents: usize,
    pub ticket_ids: Vec<String>,
}

#[derive(Debug)]
pub enum SeedOutcome {
    Seeded(SeedSummary),
    /// Users already exist; nothing was inserted.
    AlreadySeeded { users: i64 },
}

const CATEGORIES: [(&str, &str); 4] = [
    ("Technical Issue", "Problems with software or hardware"),
    ("Billing", "Questions about billing or payments"),
    ("Account", "Account-related issues"),
    ("General Inquiry", "General questions about services"),
];

const USERS: [(&str, &str, &str); 3] = [
    ("Admin User", "admin@example.com", ROLE_ADMIN),
    ("Customer One", "customer1@example.com", ROLE_USER),
    ("Customer Two", "customer2@example.com", ROLE_USER),
];

/// Insert sample categories, users, agents and tickets into an empty
/// database.
///
/// Both agents wrap the admin user. Ticket ids are `TCK-<now>` and
/// `TCK-<now + 1>` so they never collide within one run.
///
/// Everything is inserted in one transaction: a failed insert leaves the
/// database empty, so the seed can simply be run again.
pub async fn seed_sample_data(pool: &DbPool, seed_password: &str) -> OpsResult<SeedOutcome> {
    let password_hash = password::hash_password(seed_password)?;
    let mut tx = pool.begin().await?;

    let existing = UserRepo::count(&mut *tx).await?;
    if existing > 0 {
        tx.rollback().await?;
        return Ok(SeedOutcome::AlreadySeeded { users: existing });
    }

    let mut summary = SeedSummary::default();

    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = CategoryRepo::create(
            &mut *tx,
            &CreateCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            },
        )
        .await?;
        categories.push(category);
    }
    summary.categories = categories.len();

    let mut users = Vec::with_capacity(USERS.len());
    for (full_name, email, role) in USERS {
        let user = UserRepo::create(
            &mut *tx,
            &CreateUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.clone(),
                role: role.to_string(),
            },
        )
        .await?;
        users.push(user);
    }
    summary.users = users.len();

    let mut agents = Vec::new();
    for specialization in ["Technical", "Billing"] {
        let agent = AgentRepo::create(
            &mut *tx,
            &CreateAgent {
                user_id: users[0].id,
                specialization: Some(specialization.to_string()),
                max_tickets: 10,
                is_available: true,
            },
        )
        .await?;
        agents.push(agent);
    }
    summary.agents = agents.len();

    let base = Utc::now().timestamp();
    let tickets = [
        CreateTicket {
            id: ticket_id_for_unix(base),
            title: "Cannot access my account".to_string(),
            description: "I'm unable to log in to my account since yesterday".to_string(),
            user_id: users[1].id,
            category: Some(categories[2].name.clone()),
            category_id: Some(categories[2].id),
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            assigned_to: Some(agents[0].id),
        },
        CreateTicket {
            id: ticket_id_for_unix(base + 1),
            title: "Billing discrepancy".to_string(),
            description: "I was charged twice for my last payment".to_string(),
            user_id: users[2].id,
            category: Some(categories[1].name.clone()),
            category_id: Some(categories[1].id),
            priority: TicketPriority::High,
            status: TicketStatus::InProgress,
            assigned_to: Some(agents[1].id),
        },
    ];
    for input in &tickets {
        let ticket = TicketRepo::create(&mut *tx, input).await?;
        summary.ticket_ids.push(ticket.id);
    }
    tx.commit().await?;

    tracing::info!(
        categories = summary.categories,
        users = summary.users,
        agents = summary.agents,
        tickets = summary.ticket_ids.len(),
        "Sample data added"
    );
    Ok(SeedOutcome::Seeded(summary))
}
