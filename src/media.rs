//! Media store: MIME sniffing and image upload.

use uuid::Uuid;

use crate::context::AppContext;
use crate::error::Error;

/// Largest accepted avatar payload.
const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Maps a filename to a MIME type by extension, case-insensitive.
/// Unknown extensions fall back to a generic binary type.
pub fn mime_for_filename(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Image upload into the configured bucket.
#[derive(Debug, Clone)]
pub struct MediaStore {
    ctx: AppContext,
}

impl MediaStore {
    pub fn new(ctx: &AppContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Uploads an image under a generated file id and returns its public
    /// preview URL.
    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<String, Error> {
        let mime_type = mime_for_filename(filename);
        let file = self
            .ctx
            .storage
            .create_file(
                &self.ctx.config.images_bucket_id,
                &Uuid::new_v4().to_string(),
                filename,
                bytes,
                mime_type,
            )
            .await?;
        tracing::debug!("uploaded {} as {} ({})", filename, file.id, mime_type);
        Ok(self.preview_url(&file.id))
    }

    /// Uploads an avatar image and returns its public preview URL.
    ///
    /// The payload is capped at 5 MiB, and the filename is forced to a
    /// `.jpg` extension because the image picker hands over JPEG data
    /// without one.
    pub async fn upload_avatar(&self, filename: &str, bytes: Vec<u8>) -> Result<String, Error> {
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(Error::FileTooLarge {
                size: bytes.len(),
                limit: MAX_AVATAR_BYTES,
            });
        }

        let filename = normalize_avatar_filename(filename);
        let file = self
            .ctx
            .storage
            .create_file(
                &self.ctx.config.images_bucket_id,
                &Uuid::new_v4().to_string(),
                &filename,
                bytes,
                "image/jpeg",
            )
            .await?;
        Ok(self.preview_url(&file.id))
    }

    /// Public URL for a stored image.
    pub fn preview_url(&self, file_id: &str) -> String {
        self.ctx
            .storage
            .view_url(&self.ctx.config.images_bucket_id, file_id)
    }
}

fn normalize_avatar_filename(filename: &str) -> String {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        filename.to_string()
    } else {
        format!("{}.jpg", filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for_filename("photo.jpg"), "image/jpeg");
        assert_eq!(mime_for_filename("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for_filename("photo.png"), "image/png");
        assert_eq!(mime_for_filename("photo.gif"), "image/gif");
        assert_eq!(mime_for_filename("photo.webp"), "image/webp");
        assert_eq!(mime_for_filename("photo.bmp"), "image/bmp");
    }

    #[test]
    fn test_mime_is_case_insensitive() {
        assert_eq!(mime_for_filename("PHOTO.JPG"), "image/jpeg");
        assert_eq!(mime_for_filename("photo.PnG"), "image/png");
    }

    #[test]
    fn test_mime_defaults_to_binary() {
        assert_eq!(mime_for_filename("photo.tiff"), "application/octet-stream");
        assert_eq!(mime_for_filename("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_normalize_avatar_filename() {
        assert_eq!(normalize_avatar_filename("me.jpg"), "me.jpg");
        assert_eq!(normalize_avatar_filename("me.JPEG"), "me.JPEG");
        assert_eq!(normalize_avatar_filename("me.png"), "me.png.jpg");
        assert_eq!(normalize_avatar_filename("me"), "me.jpg");
    }

    #[tokio::test]
    async fn test_avatar_size_limit_rejected_locally() {
        let ctx = AppContext::new(Config::default()).unwrap();
        let store = MediaStore::new(&ctx);

        let err = store
            .upload_avatar("big.jpg", vec![0; MAX_AVATAR_BYTES + 1])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { .. }));
    }
}
