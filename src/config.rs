use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Metadata API (TMDB) key
    pub tmdb_api_key: String,

    /// Metadata API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Recommendation backend base URL
    #[serde(default = "default_recommend_api_url")]
    pub recommend_api_url: String,

    /// Path of the persisted watch-history JSON file
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_recommend_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_history_path() -> PathBuf {
    PathBuf::from("watch_history.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
