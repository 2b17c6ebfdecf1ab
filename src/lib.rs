//! TastyLog data-access layer.
//!
//! Everything the food journal persists lives in a hosted Appwrite
//! project: accounts and sessions, per-user profile and food-log
//! documents, and uploaded images. This crate wraps that remote surface
//! in typed repositories: [`SessionGateway`] for sessions,
//! [`ProfileRepository`] for the merged profile view, [`FoodRepository`]
//! for journal entries and [`MediaStore`] for image upload.
//!
//! All operations are single async calls with no retry policy; a failed
//! call is reported, never replayed. Cancelling an operation is dropping
//! its future.

pub mod appwrite;
pub mod auth;
pub mod config;
pub mod error;
pub mod food;
pub mod media;
pub mod models;
pub mod profile;

mod context;

pub use auth::{Registration, SessionGateway};
pub use config::Config;
pub use context::AppContext;
pub use error::Error;
pub use food::FoodRepository;
pub use media::{mime_for_filename, MediaStore};
pub use models::{FoodItem, ProfileDocument, ProfileView};
pub use profile::{reconcile, ProfileRepository};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
