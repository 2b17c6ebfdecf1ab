//! Minimal client for the Appwrite REST API.
//!
//! Covers the three services the app consumes: Account (registration and
//! email/password sessions), Databases (document CRUD with equality
//! filters) and Storage (image upload and view URLs). The platform is
//! treated as an opaque remote service; nothing here retries, batches or
//! caches.

mod account;
mod client;
mod databases;
mod models;
mod storage;

pub use account::{Account, CURRENT_SESSION};
pub use client::Client;
pub use databases::{Databases, Query};
pub use models::{Document, DocumentList, File, Session, User};
pub use storage::Storage;
