use serde::{Deserialize, Serialize};

use crate::appwrite::Document;

/// Per-user profile document stored in the users collection.
///
/// Distinct from the account record: the account owns the authoritative
/// name and email, the document owns the avatar. There is at most one per
/// user by convention only; nothing server-side enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl ProfileDocument {
    /// Decodes a stored document, defaulting absent attributes.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            user_id: doc.str_field("user_id").unwrap_or_default().to_string(),
            name: doc.str_field("name").unwrap_or_default().to_string(),
            email: doc.str_field("email").unwrap_or_default().to_string(),
            avatar_url: doc.str_field("avatar_url").unwrap_or_default().to_string(),
        }
    }
}

/// Display-ready profile assembled from the account record and the stored
/// profile document. Computed on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_document_decode() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "user_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "avatar_url": "https://img.example/ada.png"
        }))
        .unwrap();

        let profile = ProfileDocument::from_document(&doc);
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.avatar_url, "https://img.example/ada.png");
    }

    #[test]
    fn test_profile_document_missing_avatar_defaults_empty() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "user_id": "u1"
        }))
        .unwrap();

        let profile = ProfileDocument::from_document(&doc);
        assert!(profile.avatar_url.is_empty());
        assert!(profile.name.is_empty());
    }
}
