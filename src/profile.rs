//! Current-user profile resolution and updates.
//!
//! The account record and the stored profile document can disagree, and
//! the document may not exist at all. [`reconcile`] merges the two into a
//! single display-ready view; the update operations use the same
//! existence check to decide between creating and patching the document.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::appwrite::{Query, User};
use crate::context::AppContext;
use crate::error::Error;
use crate::models::{ProfileDocument, ProfileView};

/// Public avatar-generation service used for accounts that never uploaded
/// an avatar.
const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Avatar URL for the no-document fallback: name parameter only, spaces
/// folded to `+` and nothing else escaped.
pub(crate) fn fallback_avatar_url(name: &str) -> String {
    format!("{}?name={}", AVATAR_SERVICE, name.replace(' ', "+"))
}

/// Avatar URL used when a profile document exists but carries no avatar:
/// form-encoded name plus sizing and format parameters.
pub(crate) fn generated_avatar_url(name: &str) -> String {
    format!(
        "{}?name={}&size=200&background=random&format=png&rounded=true",
        AVATAR_SERVICE,
        form_encode(name)
    )
}

/// Form-style URL encoding: percent escapes, with spaces as `+`.
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Merges the account record with the stored profile document.
///
/// The account's name and email always win over the document's possibly
/// stale copies. The avatar comes from the document when it has one;
/// otherwise it is synthesized, with a richer parameter set on the
/// document-backed path than on the no-document path. That asymmetry is
/// how the app has always behaved and is kept on purpose.
pub fn reconcile(user: &User, doc: Option<&ProfileDocument>) -> ProfileView {
    match doc {
        Some(doc) => {
            let avatar_url = if doc.avatar_url.is_empty() {
                generated_avatar_url(&user.name)
            } else {
                doc.avatar_url.clone()
            };
            ProfileView {
                name: user.name.clone(),
                email: user.email.clone(),
                avatar_url,
            }
        }
        None => ProfileView {
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_url: fallback_avatar_url(&user.name),
        },
    }
}

/// Read and update operations over the users collection.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    ctx: AppContext,
}

impl ProfileRepository {
    pub fn new(ctx: &AppContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    fn database_id(&self) -> &str {
        &self.ctx.config.database_id
    }

    fn collection_id(&self) -> &str {
        &self.ctx.config.users_collection_id
    }

    /// Resolves the current caller's merged profile.
    ///
    /// Absence is the only failure callers can observe: no session, no
    /// matching document on an errored query, and transport failures all
    /// collapse to `None`. The view, when present, always has a non-empty
    /// name, email and avatar URL.
    pub async fn resolve_profile(&self) -> Option<ProfileView> {
        let user = match self.ctx.account.get().await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!("no current user: {}", e);
                return None;
            }
        };

        match self.find_document(&user.id).await {
            Ok(found) => Some(reconcile(&user, found.as_ref().map(|(_, doc)| doc))),
            Err(e) => {
                tracing::warn!("profile document query failed: {}", e);
                None
            }
        }
    }

    /// Renames the caller, creating the profile document if it does not
    /// exist yet.
    pub async fn update_name(&self, new_name: &str) -> Result<(), Error> {
        let user = self.ctx.account.get().await?;

        match self.find_document(&user.id).await? {
            Some((document_id, _)) => {
                let mut data = Map::new();
                data.insert("name".to_string(), Value::String(new_name.to_string()));
                self.ctx
                    .databases
                    .update_document(self.database_id(), self.collection_id(), &document_id, data)
                    .await?;
            }
            None => {
                tracing::debug!("no profile document for {}, creating one", user.id);
                self.create_document(&ProfileDocument {
                    user_id: user.id.clone(),
                    name: new_name.to_string(),
                    email: user.email.clone(),
                    avatar_url: String::new(),
                })
                .await?;
            }
        }
        Ok(())
    }

    /// Points the caller's avatar at `avatar_url`, creating the profile
    /// document if it does not exist yet.
    pub async fn update_avatar(&self, avatar_url: &str) -> Result<(), Error> {
        let user = self.ctx.account.get().await?;

        match self.find_document(&user.id).await? {
            Some((document_id, _)) => {
                let mut data = Map::new();
                data.insert(
                    "avatar_url".to_string(),
                    Value::String(avatar_url.to_string()),
                );
                self.ctx
                    .databases
                    .update_document(self.database_id(), self.collection_id(), &document_id, data)
                    .await?;
            }
            None => {
                tracing::debug!("no profile document for {}, creating one", user.id);
                self.create_document(&ProfileDocument {
                    user_id: user.id.clone(),
                    name: user.name.clone(),
                    email: user.email.clone(),
                    avatar_url: avatar_url.to_string(),
                })
                .await?;
            }
        }
        Ok(())
    }

    /// Stores a fresh profile document under a generated document id.
    pub(crate) async fn create_document(&self, profile: &ProfileDocument) -> Result<String, Error> {
        let mut data = Map::new();
        data.insert(
            "user_id".to_string(),
            Value::String(profile.user_id.clone()),
        );
        data.insert("name".to_string(), Value::String(profile.name.clone()));
        data.insert("email".to_string(), Value::String(profile.email.clone()));
        data.insert(
            "avatar_url".to_string(),
            Value::String(profile.avatar_url.clone()),
        );

        let doc = self
            .ctx
            .databases
            .create_document(
                self.database_id(),
                self.collection_id(),
                &Uuid::new_v4().to_string(),
                data,
            )
            .await?;
        tracing::debug!("profile document created: {}", doc.id);
        Ok(doc.id)
    }

    /// First profile document for `user_id`, ordered oldest first so that
    /// duplicate documents resolve the same way on every call.
    async fn find_document(
        &self,
        user_id: &str,
    ) -> Result<Option<(String, ProfileDocument)>, Error> {
        let list = self
            .ctx
            .databases
            .list_documents(
                self.database_id(),
                self.collection_id(),
                &[
                    Query::equal("user_id", user_id),
                    Query::order_asc("$createdAt"),
                ],
            )
            .await?;

        Ok(list
            .documents
            .first()
            .map(|doc| (doc.id.clone(), ProfileDocument::from_document(doc))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn stored_doc(avatar_url: &str) -> ProfileDocument {
        ProfileDocument {
            user_id: "u1".to_string(),
            name: "Old Name".to_string(),
            email: "old@example.com".to_string(),
            avatar_url: avatar_url.to_string(),
        }
    }

    #[test]
    fn test_stored_avatar_is_used_verbatim() {
        let doc = stored_doc("https://img.example/ada.png");
        let view = reconcile(&ada(), Some(&doc));

        assert_eq!(view.avatar_url, "https://img.example/ada.png");
    }

    #[test]
    fn test_account_fields_win_over_document() {
        let doc = stored_doc("https://img.example/ada.png");
        let view = reconcile(&ada(), Some(&doc));

        assert_eq!(view.name, "Ada Lovelace");
        assert_eq!(view.email, "ada@example.com");
    }

    #[test]
    fn test_empty_avatar_synthesizes_rich_url() {
        let doc = stored_doc("");
        let view = reconcile(&ada(), Some(&doc));

        assert_eq!(
            view.avatar_url,
            "https://ui-avatars.com/api/?name=Ada+Lovelace&size=200&background=random&format=png&rounded=true"
        );
    }

    #[test]
    fn test_no_document_uses_bare_url() {
        let view = reconcile(&ada(), None);

        assert_eq!(view.name, "Ada Lovelace");
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(
            view.avatar_url,
            "https://ui-avatars.com/api/?name=Ada+Lovelace"
        );
    }

    #[test]
    fn test_view_never_has_empty_fields() {
        for doc in [None, Some(stored_doc("")), Some(stored_doc("https://a/b"))] {
            let view = reconcile(&ada(), doc.as_ref());
            assert!(!view.name.is_empty());
            assert!(!view.email.is_empty());
            assert!(!view.avatar_url.is_empty());
        }
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let doc = stored_doc("");
        let first = reconcile(&ada(), Some(&doc));
        let second = reconcile(&ada(), Some(&doc));

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_transport_failure_reads_as_absent() {
        let config = crate::config::Config {
            endpoint: "http://127.0.0.1:9".to_string(),
            project_id: "test".to_string(),
            ..crate::config::Config::default()
        };
        let repo = ProfileRepository::new(&AppContext::new(config).unwrap());

        assert!(repo.resolve_profile().await.is_none());
    }

    #[test]
    fn test_form_encoding_escapes_beyond_spaces() {
        let user = User {
            id: "u2".to_string(),
            name: "Ada & Co".to_string(),
            email: "team@example.com".to_string(),
        };
        let view = reconcile(&user, Some(&stored_doc("")));

        assert!(view.avatar_url.contains("name=Ada+%26+Co"));
    }
}
