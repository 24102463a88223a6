use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Location of the four reference files.
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub dir: PathBuf,
    #[serde(default = "default_products")]
    pub products: String,
    #[serde(default = "default_shops")]
    pub shops: String,
    #[serde(default = "default_taggings")]
    pub taggings: String,
    #[serde(default = "default_tags")]
    pub tags: String,
}

fn default_products() -> String {
    "products.csv".to_string()
}
fn default_shops() -> String {
    "shops.csv".to_string()
}
fn default_taggings() -> String {
    "taggings.csv".to_string()
}
fn default_tags() -> String {
    "tags.csv".to_string()
}

impl DataConfig {
    pub fn products_path(&self) -> PathBuf {
        self.dir.join(&self.products)
    }

    pub fn shops_path(&self) -> PathBuf {
        self.dir.join(&self.shops)
    }

    pub fn taggings_path(&self) -> PathBuf {
        self.dir.join(&self.taggings)
    }

    pub fn tags_path(&self) -> PathBuf {
        self.dir.join(&self.tags)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_count")]
    pub default_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
        }
    }
}

fn default_count() -> usize {
    shop_search_core::DEFAULT_COUNT
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;

    // Relative data dirs are relative to the config file, not the cwd.
    if config.data.dir.is_relative() {
        if let Some(parent) = path.parent() {
            config.data.dir = parent.join(&config.data.dir);
        }
    }

    Ok(config)
}

/// Parse and validate a config document without touching the filesystem.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}
