//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument.

pub mod agent_repo;
pub mod category_repo;
pub mod notification_repo;
pub mod schema_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use agent_repo::AgentRepo;
pub use category_repo::CategoryRepo;
pub use notification_repo::NotificationRepo;
pub use schema_repo::SchemaRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
