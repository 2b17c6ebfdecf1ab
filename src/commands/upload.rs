//! Stand-alone image upload.

use clap::Args;
use std::path::PathBuf;

use tastylog::{AppContext, MediaStore};

#[derive(Args)]
pub struct UploadCommand {
    /// Image file to upload
    pub file: PathBuf,
}

impl UploadCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = tokio::fs::read(&self.file).await?;
        let filename = self
            .file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let url = MediaStore::new(ctx).upload_image(&filename, bytes).await?;
        println!("{}", url);
        Ok(())
    }
}
