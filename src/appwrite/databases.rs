//! Databases service: document CRUD scoped by database and collection ids.

use serde_json::{json, Map, Value};

use super::client::Client;
use super::models::{Document, DocumentList};
use crate::error::Error;

/// A query filter in the platform's JSON wire form.
#[derive(Debug, Clone)]
pub struct Query(Value);

impl Query {
    /// Matches documents whose `attribute` equals `value`.
    pub fn equal(attribute: &str, value: &str) -> Self {
        Self(json!({
            "method": "equal",
            "attribute": attribute,
            "values": [value],
        }))
    }

    /// Orders results by `attribute`, oldest value first.
    pub fn order_asc(attribute: &str) -> Self {
        Self(json!({
            "method": "orderAsc",
            "attribute": attribute,
        }))
    }

    /// Serializes into the form expected in the `queries[]` parameter.
    pub fn to_wire(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Databases {
    client: Client,
}

impl Databases {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, Error> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        self.client
            .post(&path, &json!({ "documentId": document_id, "data": data }))
            .await
    }

    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, Error> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_wire()))
            .collect();
        self.client.get_with_query(&path, &params).await
    }

    pub async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, Error> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        self.client.patch(&path, &json!({ "data": data })).await
    }

    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), Error> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        self.client.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_query_wire_form() {
        let wire = Query::equal("user_id", "u1").to_wire();
        let parsed: Value = serde_json::from_str(&wire).unwrap();

        assert_eq!(parsed["method"], "equal");
        assert_eq!(parsed["attribute"], "user_id");
        assert_eq!(parsed["values"], json!(["u1"]));
    }

    #[test]
    fn test_order_asc_query_wire_form() {
        let wire = Query::order_asc("$createdAt").to_wire();
        let parsed: Value = serde_json::from_str(&wire).unwrap();

        assert_eq!(parsed["method"], "orderAsc");
        assert_eq!(parsed["attribute"], "$createdAt");
    }
}
