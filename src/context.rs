//! Process-wide handles to the remote services.

use crate::appwrite::{Account, Client, Databases, Storage};
use crate::config::Config;
use crate::error::Error;

/// Remote-service handles plus the configuration they were built from.
///
/// Built once at startup and handed to the repositories, which keep cheap
/// clones. Nothing here is mutated after construction; concurrent use
/// needs no further guarding.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub account: Account,
    pub databases: Databases,
    pub storage: Storage,
}

impl AppContext {
    /// Context with no established session, suitable for registration and
    /// login.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::build(config, None)
    }

    /// Context that authenticates with a previously issued session secret.
    pub fn with_session(config: Config, secret: impl Into<String>) -> Result<Self, Error> {
        Self::build(config, Some(secret.into()))
    }

    fn build(config: Config, session: Option<String>) -> Result<Self, Error> {
        let mut client = Client::new(&config)?;
        if let Some(secret) = session {
            client = client.with_session(secret);
        }
        Ok(Self {
            account: Account::new(client.clone()),
            databases: Databases::new(client.clone()),
            storage: Storage::new(client),
            config,
        })
    }
}
