use serde::Deserialize;
use std::path::PathBuf;

/// Connection settings for the Appwrite project backing the app.
///
/// The database, collection and bucket ids are fixed per deployment; the
/// code never creates or discovers them at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Appwrite API endpoint
    pub endpoint: String,
    /// Appwrite project ID
    pub project_id: String,
    /// Database holding the users and food-list collections
    pub database_id: String,
    /// Collection of per-user profile documents
    pub users_collection_id: String,
    /// Collection of food-log entries
    pub food_collection_id: String,
    /// Bucket for food and avatar images
    pub images_bucket_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            database_id: "tastylog".to_string(),
            users_collection_id: "users".to_string(),
            food_collection_id: "food_list".to_string(),
            images_bucket_id: "food_images".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        // Apply environment variable overrides
        if let Ok(endpoint) = std::env::var("TASTYLOG_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(project_id) = std::env::var("TASTYLOG_PROJECT_ID") {
            config.project_id = project_id;
        }
        if let Ok(database_id) = std::env::var("TASTYLOG_DATABASE_ID") {
            config.database_id = database_id;
        }
        if let Ok(users) = std::env::var("TASTYLOG_USERS_COLLECTION_ID") {
            config.users_collection_id = users;
        }
        if let Ok(food) = std::env::var("TASTYLOG_FOOD_COLLECTION_ID") {
            config.food_collection_id = food;
        }
        if let Ok(bucket) = std::env::var("TASTYLOG_IMAGES_BUCKET_ID") {
            config.images_bucket_id = bucket;
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/tastylog/config.yaml
    pub fn default_config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".config")
            .join("tastylog")
            .join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
