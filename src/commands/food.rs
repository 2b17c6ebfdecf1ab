//! Food-log commands.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use tastylog::food::today;
use tastylog::{AppContext, FoodItem, FoodRepository, MediaStore, SessionGateway};

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Log a new food entry
    Add {
        title: String,

        /// Date of the meal (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        time: Option<String>,

        #[arg(long, short)]
        rating: Option<f64>,

        #[arg(long, short)]
        price: Option<f64>,

        /// Single tag, e.g. "#noodles"
        #[arg(long)]
        tag: Option<String>,

        /// Image file to upload and attach
        #[arg(long)]
        image: Option<PathBuf>,

        /// Free-form notes
        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// List the caller's entries
    List,

    /// Change fields of an existing entry
    Update {
        document_id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short)]
        time: Option<String>,

        #[arg(long, short)]
        rating: Option<f64>,

        #[arg(long, short)]
        price: Option<f64>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Delete an entry
    Delete { document_id: String },
}

impl FoodCommand {
    pub async fn run(&self, ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
        let gateway = SessionGateway::new(ctx);
        let user = gateway
            .current_identity()
            .await
            .ok_or("Not logged in. Run `tastylog account login` first.")?;
        let repo = FoodRepository::new(ctx);

        match &self.command {
            FoodSubcommand::Add {
                title,
                time,
                rating,
                price,
                tag,
                image,
                content,
                location,
            } => {
                let img_url = match image {
                    Some(path) => {
                        let bytes = tokio::fs::read(path).await?;
                        let filename = path
                            .file_name()
                            .map(|name| name.to_string_lossy().to_string())
                            .unwrap_or_else(|| "image".to_string());
                        MediaStore::new(ctx).upload_image(&filename, bytes).await?
                    }
                    None => String::new(),
                };

                let time = time.clone().unwrap_or_else(today);
                let mut item = FoodItem::new(&user.id, title, time).with_img_url(img_url);
                if let Some(rating) = rating {
                    item = item.with_rating(*rating);
                }
                if let Some(price) = price {
                    item = item.with_price(*price);
                }
                if let Some(tag) = tag {
                    item = item.with_tag(tag);
                }
                if let Some(content) = content {
                    item = item.with_content(content);
                }
                if let Some(location) = location {
                    item = item.with_location(location);
                }

                let created = repo.add(&item).await?;
                println!("Created entry {}", created.document_id);
                print!("{}", created);
            }
            FoodSubcommand::List => {
                let items = repo.list_for_user(&user.id).await;
                if items.is_empty() {
                    println!("No entries yet");
                }
                for item in items {
                    println!("[{}]", item.document_id);
                    print!("{}", item);
                }
            }
            FoodSubcommand::Update {
                document_id,
                title,
                time,
                rating,
                price,
                tag,
                content,
                location,
            } => {
                let items = repo.list_for_user(&user.id).await;
                let mut item = items
                    .into_iter()
                    .find(|item| item.document_id == *document_id)
                    .ok_or_else(|| format!("Entry not found: {}", document_id))?;

                if let Some(title) = title {
                    item.title = title.clone();
                }
                if let Some(time) = time {
                    item.time = time.clone();
                }
                if let Some(rating) = rating {
                    item.rating = *rating;
                }
                if let Some(price) = price {
                    item.price = *price;
                }
                if let Some(tag) = tag {
                    item.tag = tag.clone();
                }
                if let Some(content) = content {
                    item.content = Some(content.clone());
                }
                if let Some(location) = location {
                    item.location = Some(location.clone());
                }

                let updated = repo.update(document_id, &item).await?;
                println!("Updated entry {}", updated.document_id);
                print!("{}", updated);
            }
            FoodSubcommand::Delete { document_id } => {
                repo.delete(document_id).await?;
                println!("Deleted entry {}", document_id);
            }
        }

        Ok(())
    }
}
