//! Data types for journal entries and profiles.

mod food_item;
mod profile;

pub use food_item::FoodItem;
pub use profile::{ProfileDocument, ProfileView};
