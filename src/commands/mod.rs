//! CLI subcommands.
//!
//! The session secret from a successful login is kept in a file next to
//! the config so later invocations can pick it up again.

mod account;
mod food;
mod profile;
mod upload;

pub use account::AccountCommand;
pub use food::FoodCommand;
pub use profile::ProfileCommand;
pub use upload::UploadCommand;

use std::path::PathBuf;

/// Session file path: ~/.config/tastylog/session
fn session_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("tastylog")
        .join("session")
}

/// Session secret saved by a previous login, if any.
pub fn load_session() -> Option<String> {
    let secret = std::fs::read_to_string(session_path()).ok()?;
    let secret = secret.trim().to_string();
    if secret.is_empty() {
        None
    } else {
        Some(secret)
    }
}

pub(crate) fn store_session(secret: &str) -> std::io::Result<()> {
    let path = session_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, secret)
}

pub(crate) fn clear_session() {
    // Nothing to do when the file never existed
    let _ = std::fs::remove_file(session_path());
}
