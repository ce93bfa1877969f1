use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            run_on_startup: default_true(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_schedule() -> String {
    // Seconds-resolution cron, as parsed by the scheduler.
    "0 0 */6 * * *".to_string() // Every 6 hours
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.api_key.is_empty() || self.tmdb.api_key == "YOUR_API_KEY" {
            return Err(anyhow::anyhow!("tmdb.api_key is not configured"));
        }
        if self.tmdb.api_base.is_empty() {
            return Err(anyhow::anyhow!("tmdb.api_base cannot be empty"));
        }
        if self.tmdb.image_base.is_empty() {
            return Err(anyhow::anyhow!("tmdb.image_base cannot be empty"));
        }
        if self.refresh.schedule.is_empty() {
            return Err(anyhow::anyhow!("refresh.schedule cannot be empty"));
        }
        Ok(())
    }
}
