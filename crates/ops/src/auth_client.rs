//! HTTP smoke tests against the web application's auth endpoints.
//!
//! `POST /api/auth/login` must answer 200 and `POST /api/auth/register` 201
//! with a body of the form
//! `{"access_token": "...", "user": {"name": "...", "role": "..."}}`.
//! Any other status is a failed attempt; the raw body is kept for printing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OpsResult;
use crate::password::preview;

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    full_name: &'a str,
    email: &'a str,
    password: &'a str,
    role: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponseBody {
    access_token: String,
    user: AuthUserBody,
}

#[derive(Debug, Deserialize)]
struct AuthUserBody {
    name: String,
    role: String,
}

/// Session details parsed from a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user_name: String,
    pub role: String,
    /// First 20 characters of the access token.
    pub token_preview: String,
}

/// Result of one login or register call.
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    pub status: u16,
    pub body: String,
    /// Present only when the status was the expected one and the body parsed.
    pub session: Option<AuthSession>,
}

impl AuthAttempt {
    pub fn succeeded(&self) -> bool {
        self.session.is_some()
    }

    /// Human-readable report, as printed by the tools.
    pub fn report(&self, action: &str) -> String {
        let mut out = format!("Status Code: {}\n", self.status);
        match &self.session {
            Some(session) => {
                out.push_str(&format!("{action} successful!\n"));
                out.push_str(&format!("User: {}\n", session.user_name));
                out.push_str(&format!("Role: {}\n", session.role));
                out.push_str(&format!("Access Token: {}\n", session.token_preview));
            }
            None => out.push_str(&format!("{action} failed: {}\n", self.body)),
        }
        out
    }
}

/// Thin client for the auth endpoints.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> OpsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /api/auth/login`; success is HTTP 200.
    pub async fn login(&self, email: &str, password: &str) -> OpsResult<AuthAttempt> {
        self.post(
            "/api/auth/login",
            &LoginRequest { email, password },
            reqwest::StatusCode::OK,
        )
        .await
    }

    /// `POST /api/auth/register` with role `admin`; success is HTTP 201.
    pub async fn register_admin(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> OpsResult<AuthAttempt> {
        self.post(
            "/api/auth/register",
            &RegisterRequest {
                full_name,
                email,
                password,
                role: complaintbot_core::roles::ROLE_ADMIN,
            },
            reqwest::StatusCode::CREATED,
        )
        .await
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        expected: reqwest::StatusCode,
    ) -> OpsResult<AuthAttempt> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let session = if status == expected {
            match serde_json::from_str::<AuthResponseBody>(&body) {
                Ok(parsed) => Some(AuthSession {
                    user_name: parsed.user.name,
                    role: parsed.user.role,
                    token_preview: preview(&parsed.access_token, 20),
                }),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Unexpected auth response body");
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(url = %url, status = status.as_u16(), ok = session.is_some(), "Auth request finished");
        Ok(AuthAttempt {
            status: status.as_u16(),
            body,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_report_includes_raw_body() {
        let attempt = AuthAttempt {
            status: 401,
            body: r#"{"error":"Invalid credentials"}"#.into(),
            session: None,
        };
        assert!(!attempt.succeeded());
        assert_eq!(
            attempt.report("Login"),
            "Status Code: 401\nLogin failed: {\"error\":\"Invalid credentials\"}\n"
        );
    }

    #[test]
    fn successful_report_lists_session() {
        let attempt = AuthAttempt {
            status: 200,
            body: String::new(),
            session: Some(AuthSession {
                user_name: "Admin User".into(),
                role: "admin".into(),
                token_preview: "eyJhbGciOiJIUzI1NiIs...".into(),
            }),
        };
        let report = attempt.report("Login");
        assert!(report.contains("Login successful!"));
        assert!(report.contains("Role: admin"));
    }
}
