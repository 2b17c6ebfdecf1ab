//! Account service: registration and email/password sessions.

use serde_json::json;

use super::client::Client;
use super::models::{Session, User};
use crate::error::Error;

/// Session slug the platform resolves to "the caller's active session".
pub const CURRENT_SESSION: &str = "current";

#[derive(Debug, Clone)]
pub struct Account {
    client: Client,
}

impl Account {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Registers a new account under a client-generated user id.
    pub async fn create(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, Error> {
        self.client
            .post(
                "/account",
                &json!({
                    "userId": user_id,
                    "email": email,
                    "password": password,
                    "name": name,
                }),
            )
            .await
    }

    /// Opens an email/password session.
    ///
    /// The platform delivers the session secret as a cookie; it is copied
    /// into [`Session::secret`] so callers can persist it for later runs.
    pub async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, Error> {
        let response = self
            .client
            .post_response(
                "/account/sessions/email",
                &json!({
                    "email": email,
                    "password": password,
                }),
            )
            .await?;

        let cookie_secret = response
            .cookies()
            .find(|cookie| cookie.name().starts_with("a_session"))
            .map(|cookie| cookie.value().to_string());

        let mut session: Session = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;
        if session.secret.is_empty() {
            if let Some(secret) = cookie_secret {
                session.secret = secret;
            }
        }
        Ok(session)
    }

    /// Deletes a session; pass [`CURRENT_SESSION`] for the active one.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), Error> {
        self.client
            .delete(&format!("/account/sessions/{}", session_id))
            .await
    }

    /// Fetches the account behind the current session.
    pub async fn get(&self) -> Result<User, Error> {
        self.client.get("/account").await
    }
}
