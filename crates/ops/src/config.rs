/// Default SQLite database, relative to the working directory.
const DEFAULT_DATABASE_URL: &str = "sqlite://complaintbot.db";

/// Default base URL of the running web application.
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Settings shared by the operational tools, loaded from the environment.
///
/// Notification settings live in
/// [`NotifyConfig`](complaintbot_notify::NotifyConfig).
#[derive(Debug, Clone)]
pub struct OpsConfig {
    /// SQLite connection URL.
    pub database_url: String,
    /// Base URL for the `/api/auth/*` smoke tests.
    pub api_base_url: String,
}

impl OpsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// | Env Var        | Default                     |
    /// |----------------|-----------------------------|
    /// | `DATABASE_URL` | `sqlite://complaintbot.db`  |
    /// | `API_BASE_URL` | `http://localhost:5000`     |
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            api_base_url: std::env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
        }
    }

    /// Open the configured database.
    pub async fn connect(&self) -> Result<complaintbot_db::DbPool, sqlx::Error> {
        let pool = complaintbot_db::create_pool(&self.database_url).await?;
        tracing::debug!(database_url = %self.database_url, "Database pool created");
        Ok(pool)
    }
}
