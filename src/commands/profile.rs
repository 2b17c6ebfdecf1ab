//! Profile commands.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use tastylog::{AppContext, MediaStore, ProfileRepository};

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the merged profile of the current user
    Show,

    /// Change the display name
    SetName { name: String },

    /// Upload an image and use it as the avatar
    SetAvatar { file: PathBuf },
}

impl ProfileCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let repo = ProfileRepository::new(ctx);

        match &self.command {
            ProfileSubcommand::Show => match repo.resolve_profile().await {
                Some(profile) => {
                    println!("Name:   {}", profile.name);
                    println!("Email:  {}", profile.email);
                    println!("Avatar: {}", profile.avatar_url);
                }
                None => println!("Not logged in"),
            },
            ProfileSubcommand::SetName { name } => {
                repo.update_name(name).await?;
                println!("Name updated");
            }
            ProfileSubcommand::SetAvatar { file } => {
                let bytes = tokio::fs::read(file).await?;
                let filename = file
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| "avatar".to_string());

                let url = MediaStore::new(ctx).upload_avatar(&filename, bytes).await?;
                repo.update_avatar(&url).await?;
                println!("Avatar updated: {}", url);
            }
        }

        Ok(())
    }
}
