//! Storage service: blob upload and view URLs.

use reqwest::multipart::{Form, Part};

use super::client::Client;
use super::models::File;
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Storage {
    client: Client,
}

impl Storage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Uploads a blob under the given file id.
    pub async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        filename: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<File, Error> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| Error::InvalidInput(format!("bad mime type '{}': {}", mime_type, e)))?;
        let form = Form::new()
            .text("fileId", file_id.to_string())
            .part("file", part);

        self.client
            .post_multipart(&format!("/storage/buckets/{}/files", bucket_id), form)
            .await
    }

    /// URL that serves the blob inline, scoped to the project.
    pub fn view_url(&self, bucket_id: &str, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.client.endpoint(),
            bucket_id,
            file_id,
            self.client.project_id()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_view_url_shape() {
        let config = Config {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: "proj1".to_string(),
            ..Config::default()
        };
        let storage = Storage::new(Client::new(&config).unwrap());

        assert_eq!(
            storage.view_url("food_images", "file42"),
            "https://cloud.appwrite.io/v1/storage/buckets/food_images/files/file42/view?project=proj1"
        );
    }
}
