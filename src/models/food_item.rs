use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::appwrite::Document;

/// A single food-log entry owned by one user.
///
/// Ownership is plain data: every entry carries the owner's `user_id` and
/// queries filter on it. The store itself enforces nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Server-side document id, empty until the entry has been stored.
    #[serde(default)]
    pub document_id: String,
    /// Client-generated unique token, stored as a plain attribute.
    pub food_id: String,
    pub user_id: String,
    pub title: String,
    /// Free-form date string as entered by the user.
    pub time: String,
    pub rating: f64,
    pub price: f64,
    /// Single tag; the UI renders it as a list of one.
    pub tag: String,
    pub img_url: String,
    pub content: Option<String>,
    pub location: Option<String>,
}

impl FoodItem {
    /// New entry with a fresh food id and neutral defaults.
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            document_id: String::new(),
            food_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            time: time.into(),
            rating: 0.0,
            price: 0.0,
            tag: String::new(),
            img_url: String::new(),
            content: None,
            location: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = img_url.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Decodes a stored document, defaulting any attribute the document
    /// lacks or stores under the wrong type.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            document_id: doc.id.clone(),
            food_id: doc.str_field("food_id").unwrap_or_default().to_string(),
            user_id: doc.str_field("user_id").unwrap_or_default().to_string(),
            title: doc.str_field("title").unwrap_or_default().to_string(),
            time: doc.str_field("time").unwrap_or_default().to_string(),
            rating: doc.f64_field("rating").unwrap_or(0.0),
            price: doc.f64_field("price").unwrap_or(0.0),
            tag: doc.str_field("tag").unwrap_or_default().to_string(),
            img_url: doc.str_field("img_url").unwrap_or_default().to_string(),
            content: doc.str_field("content").map(str::to_string),
            location: doc.str_field("location").map(str::to_string),
        }
    }
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.title, self.time)?;
        writeln!(f, "  rating: {:.1}  price: ¥{:.2}", self.rating, self.price)?;

        if !self.tag.is_empty() {
            writeln!(f, "  tag: {}", self.tag)?;
        }

        if let Some(location) = &self.location {
            writeln!(f, "  location: {}", location)?;
        }

        if let Some(content) = &self.content {
            writeln!(f, "  notes: {}", content)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_food_item_new() {
        let item = FoodItem::new("u1", "Ramen", "2025-03-01");

        assert!(!item.food_id.is_empty());
        assert!(item.document_id.is_empty());
        assert_eq!(item.user_id, "u1");
        assert_eq!(item.title, "Ramen");
        assert_eq!(item.rating, 0.0);
        assert_eq!(item.price, 0.0);
        assert!(item.content.is_none());
        assert!(item.location.is_none());
    }

    #[test]
    fn test_food_item_builders() {
        let item = FoodItem::new("u1", "Ramen", "2025-03-01")
            .with_rating(4.5)
            .with_price(58.0)
            .with_tag("#noodles")
            .with_location("Shibuya");

        assert_eq!(item.rating, 4.5);
        assert_eq!(item.price, 58.0);
        assert_eq!(item.tag, "#noodles");
        assert_eq!(item.location, Some("Shibuya".to_string()));
    }

    #[test]
    fn test_from_document_defaults_missing_fields() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "food_id": "f1",
            "user_id": "u1",
            "title": "Ramen"
        }))
        .unwrap();

        let item = FoodItem::from_document(&doc);
        assert_eq!(item.document_id, "doc1");
        assert_eq!(item.food_id, "f1");
        assert_eq!(item.title, "Ramen");
        assert_eq!(item.time, "");
        assert_eq!(item.rating, 0.0);
        assert_eq!(item.price, 0.0);
        assert!(item.content.is_none());
    }

    #[test]
    fn test_from_document_full() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "food_id": "f1",
            "user_id": "u1",
            "title": "Ramen",
            "time": "2025-03-01",
            "rating": 4.5,
            "price": 58.0,
            "tag": "#noodles",
            "img_url": "https://img.example/1.jpg",
            "content": "rich broth",
            "location": "Shibuya"
        }))
        .unwrap();

        let item = FoodItem::from_document(&doc);
        assert_eq!(item.rating, 4.5);
        assert_eq!(item.price, 58.0);
        assert_eq!(item.img_url, "https://img.example/1.jpg");
        assert_eq!(item.content, Some("rich broth".to_string()));
        assert_eq!(item.location, Some("Shibuya".to_string()));
    }

    #[test]
    fn test_display() {
        let item = FoodItem::new("u1", "Ramen", "2025-03-01")
            .with_price(58.0)
            .with_tag("#noodles");

        let output = format!("{}", item);
        assert!(output.contains("Ramen - 2025-03-01"));
        assert!(output.contains("¥58.00"));
        assert!(output.contains("#noodles"));
    }
}
