//! Wire types for the subset of the Appwrite API the app consumes.

use serde::Deserialize;
use serde_json::{Map, Value};

/// An account-level user record.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// An authenticated session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Session secret for reuse outside this process. The platform only
    /// puts it in the body for some callers, so it may be backfilled from
    /// the session cookie instead.
    #[serde(default)]
    pub secret: String,
}

/// A document from a database collection: platform metadata plus the
/// collection's own attributes, kept as loose JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Document {
    /// String attribute, if present and actually a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Numeric attribute, if present and actually a number.
    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }
}

/// Page of documents returned by a list call.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<Document>,
}

/// Metadata of a stored blob.
#[derive(Debug, Clone, Deserialize)]
pub struct File {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_flattens_attributes() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "$createdAt": "2025-03-01T00:00:00.000+00:00",
            "title": "Ramen",
            "rating": 4.5
        }))
        .unwrap();

        assert_eq!(doc.id, "doc1");
        assert_eq!(doc.str_field("title"), Some("Ramen"));
        assert_eq!(doc.f64_field("rating"), Some(4.5));
    }

    #[test]
    fn test_document_field_type_mismatch_reads_as_absent() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "title": 42
        }))
        .unwrap();

        assert_eq!(doc.str_field("title"), None);
        assert_eq!(doc.f64_field("title"), Some(42.0));
        assert_eq!(doc.str_field("missing"), None);
    }

    #[test]
    fn test_session_without_secret() {
        let session: Session = serde_json::from_value(json!({
            "$id": "s1",
            "userId": "u1"
        }))
        .unwrap();

        assert_eq!(session.user_id, "u1");
        assert!(session.secret.is_empty());
    }
}
