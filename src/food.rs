//! Food-item repository: per-user CRUD over the food-list collection.

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::appwrite::Query;
use crate::context::AppContext;
use crate::error::Error;
use crate::models::FoodItem;

/// CRUD over one user's food-log entries.
#[derive(Debug, Clone)]
pub struct FoodRepository {
    ctx: AppContext,
}

impl FoodRepository {
    pub fn new(ctx: &AppContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    fn database_id(&self) -> &str {
        &self.ctx.config.database_id
    }

    fn collection_id(&self) -> &str {
        &self.ctx.config.food_collection_id
    }

    /// Stores a new entry and returns it with the document id filled in.
    pub async fn add(&self, item: &FoodItem) -> Result<FoodItem, Error> {
        let doc = self
            .ctx
            .databases
            .create_document(
                self.database_id(),
                self.collection_id(),
                &Uuid::new_v4().to_string(),
                item_payload(item, true),
            )
            .await?;
        tracing::debug!("food entry created: {}", doc.id);
        Ok(FoodItem::from_document(&doc))
    }

    /// All entries owned by `user_id`.
    ///
    /// A failed query reads as an empty list; callers only ever see
    /// entries or nothing.
    pub async fn list_for_user(&self, user_id: &str) -> Vec<FoodItem> {
        let result = self
            .ctx
            .databases
            .list_documents(
                self.database_id(),
                self.collection_id(),
                &[Query::equal("user_id", user_id)],
            )
            .await;

        match result {
            Ok(list) => list.documents.iter().map(FoodItem::from_document).collect(),
            Err(e) => {
                tracing::warn!("food list query failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Rewrites the stored entry behind `document_id`.
    pub async fn update(&self, document_id: &str, item: &FoodItem) -> Result<FoodItem, Error> {
        let doc = self
            .ctx
            .databases
            .update_document(
                self.database_id(),
                self.collection_id(),
                document_id,
                item_payload(item, false),
            )
            .await?;
        Ok(FoodItem::from_document(&doc))
    }

    /// Removes the stored entry behind `document_id`.
    pub async fn delete(&self, document_id: &str) -> Result<(), Error> {
        tracing::debug!("deleting food entry {}", document_id);
        self.ctx
            .databases
            .delete_document(self.database_id(), self.collection_id(), document_id)
            .await
    }

    /// One-shot sample entry created right after registration so a new
    /// account does not open onto an empty journal.
    pub(crate) async fn seed_initial(&self, user_id: &str) -> Result<(), Error> {
        let item = FoodItem::new(user_id, "My first meal", today()).with_tag("#firsts");
        self.add(&item).await?;
        Ok(())
    }
}

/// Today's date in the `YYYY-MM-DD` form entries use.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Wire payload for an entry. Updates keep the stored food id, so
/// `include_food_id` is set only on create.
fn item_payload(item: &FoodItem, include_food_id: bool) -> Map<String, Value> {
    let mut data = Map::new();
    if include_food_id {
        data.insert("food_id".to_string(), Value::String(item.food_id.clone()));
    }
    data.insert("user_id".to_string(), Value::String(item.user_id.clone()));
    data.insert("title".to_string(), Value::String(item.title.clone()));
    data.insert("time".to_string(), Value::String(item.time.clone()));
    data.insert("rating".to_string(), json!(item.rating));
    data.insert("price".to_string(), json!(item.price));
    data.insert("tag".to_string(), Value::String(item.tag.clone()));
    data.insert("img_url".to_string(), Value::String(item.img_url.clone()));
    if let Some(content) = &item.content {
        data.insert("content".to_string(), Value::String(content.clone()));
    }
    if let Some(location) = &item.location {
        data.insert("location".to_string(), Value::String(location.clone()));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_includes_food_id_on_create_only() {
        let item = FoodItem::new("u1", "Ramen", "2025-03-01");

        let create = item_payload(&item, true);
        assert_eq!(
            create.get("food_id"),
            Some(&Value::String(item.food_id.clone()))
        );

        let update = item_payload(&item, false);
        assert!(!update.contains_key("food_id"));
        assert_eq!(update.get("title"), Some(&Value::String("Ramen".into())));
    }

    #[test]
    fn test_payload_omits_absent_optionals() {
        let item = FoodItem::new("u1", "Ramen", "2025-03-01");
        let data = item_payload(&item, true);

        assert!(!data.contains_key("content"));
        assert!(!data.contains_key("location"));
    }

    #[test]
    fn test_payload_carries_optionals_when_set() {
        let item = FoodItem::new("u1", "Ramen", "2025-03-01")
            .with_content("rich broth")
            .with_location("Shibuya");
        let data = item_payload(&item, true);

        assert_eq!(
            data.get("content"),
            Some(&Value::String("rich broth".into()))
        );
        assert_eq!(
            data.get("location"),
            Some(&Value::String("Shibuya".into()))
        );
    }

    #[test]
    fn test_today_is_a_date_string() {
        let value = today();
        assert_eq!(value.len(), 10);
        assert_eq!(value.matches('-').count(), 2);
    }
}
