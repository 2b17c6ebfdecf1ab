//! Session gateway: login, logout and registration with first-run
//! bootstrap.

use uuid::Uuid;

use crate::appwrite::{Session, User, CURRENT_SESSION};
use crate::context::AppContext;
use crate::error::Error;
use crate::food::FoodRepository;
use crate::models::ProfileDocument;
use crate::profile::{fallback_avatar_url, ProfileRepository};

/// Login, logout and registration against the remote account service.
#[derive(Debug, Clone)]
pub struct SessionGateway {
    ctx: AppContext,
}

/// Outcome of a successful registration.
///
/// The session comes from the auto-login step and is absent when that
/// step failed; the account itself is committed either way.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: String,
    pub session: Option<Session>,
}

/// Logs and discards the outcome of a cleanup call.
///
/// For steps that are allowed to fail, like deleting a session that may
/// not exist before opening a new one.
fn discard_outcome<T>(what: &str, result: Result<T, Error>) {
    if let Err(e) = result {
        tracing::debug!("{} failed (ignored): {}", what, e);
    }
}

impl SessionGateway {
    pub fn new(ctx: &AppContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Opens an email/password session, clearing any session left over
    /// from a previous run first.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        discard_outcome(
            "delete stale session",
            self.ctx.account.delete_session(CURRENT_SESSION).await,
        );

        let session = self.ctx.account.create_email_session(email, password).await?;
        tracing::info!("logged in as {}", session.user_id);
        Ok(session)
    }

    /// Closes the current session.
    pub async fn logout(&self) -> Result<(), Error> {
        self.ctx.account.delete_session(CURRENT_SESSION).await
    }

    /// The account behind the current session, or `None` when nobody is
    /// logged in. Transport failures also read as "nobody".
    pub async fn current_identity(&self) -> Option<User> {
        match self.ctx.account.get().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("no current identity: {}", e);
                None
            }
        }
    }

    /// Registers an account and bootstraps its first-run state: profile
    /// document, session, one seeded food entry.
    ///
    /// Account and profile-document creation can fail the call; nothing is
    /// rolled back when they do. Auto-login and seeding failures are
    /// logged only, so a registered account is usable even when the
    /// bootstrap finished partially. The auto-login session is handed back
    /// so callers can keep using it instead of opening another one.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Registration, Error> {
        discard_outcome(
            "delete stale session",
            self.ctx.account.delete_session(CURRENT_SESSION).await,
        );

        let user = self
            .ctx
            .account
            .create(&Uuid::new_v4().to_string(), email, password, name)
            .await?;
        tracing::info!("account created: {}", user.id);

        let profiles = ProfileRepository::new(&self.ctx);
        profiles
            .create_document(&ProfileDocument {
                user_id: user.id.clone(),
                name: name.to_string(),
                email: email.to_string(),
                avatar_url: fallback_avatar_url(name),
            })
            .await?;

        let session = match self.ctx.account.create_email_session(email, password).await {
            Ok(session) => {
                let foods = FoodRepository::new(&self.ctx);
                if let Err(e) = foods.seed_initial(&user.id).await {
                    tracing::warn!("initial food entry not created: {}", e);
                }
                Some(session)
            }
            Err(e) => {
                tracing::warn!("auto-login after registration failed: {}", e);
                None
            }
        };

        Ok(Registration {
            user_id: user.id,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn unreachable_ctx() -> AppContext {
        let config = Config {
            endpoint: "http://127.0.0.1:9".to_string(),
            project_id: "test".to_string(),
            ..Config::default()
        };
        AppContext::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_current_identity_absent_when_endpoint_unreachable() {
        let gateway = SessionGateway::new(&unreachable_ctx());
        assert!(gateway.current_identity().await.is_none());
    }

    #[tokio::test]
    async fn test_register_fails_when_account_creation_fails() {
        let gateway = SessionGateway::new(&unreachable_ctx());
        let result = gateway
            .register("ada@example.com", "pw12345678", "Ada")
            .await;
        assert!(result.is_err());
    }
}
