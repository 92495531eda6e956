//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taxonomy_index_domain::{
    KeyNormalizer, PathKeyNormalizer, SortOrder,
    usecases::{BuildConfig, ListingConfig, TaxonomyDef},
};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Singular to plural, e.g. `tag = "tags"`
    #[serde(default = "default_taxonomies")]
    pub taxonomies: BTreeMap<String, String>,

    #[serde(default)]
    pub keys: KeysConfig,

    #[serde(default)]
    pub listing: ListingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_content_path")]
    pub content_path: PathBuf,

    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Keep the case of terms in keys instead of lowercasing
    #[serde(default)]
    pub preserve_case: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingSettings {
    #[serde(default)]
    pub order: SortOrder,

    #[serde(default)]
    pub reverse: bool,

    #[serde(default)]
    pub limit: Option<usize>,
}

// Default value functions
fn default_content_path() -> PathBuf {
    PathBuf::from("./content.json")
}

fn default_max_workers() -> usize {
    4
}

fn default_taxonomies() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("category".to_string(), "categories".to_string()),
        ("tag".to_string(), "tags".to_string()),
    ])
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            content_path: default_content_path(),
            max_workers: default_max_workers(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            taxonomies: default_taxonomies(),
            keys: KeysConfig::default(),
            listing: ListingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./taxonomy-index.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("TAXONOMY_INDEX")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            taxonomies: self
                .taxonomies
                .iter()
                .map(|(singular, plural)| TaxonomyDef::new(singular, plural))
                .collect(),
            max_workers: self.general.max_workers,
        }
    }

    pub fn listing_config(&self) -> ListingConfig {
        ListingConfig {
            order: self.listing.order,
            reverse: self.listing.reverse,
            limit: self.listing.limit,
        }
    }

    pub fn normalizer(&self) -> Arc<dyn KeyNormalizer> {
        Arc::new(PathKeyNormalizer::new(self.keys.preserve_case))
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# taxonomy-index configuration

[general]
content_path = "./content.json"
max_workers = 4

# singular = "plural"
[taxonomies]
tag = "tags"
category = "categories"
# series = "series"

[keys]
# Keep term case in keys ("Rust" and "rust" become different terms)
preserve_case = false

[listing]
order = "alphabetical"  # alphabetical, by_count
reverse = false
# limit = 20
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_toml_parses() {
        let config: AppConfig = toml::from_str(&AppConfig::example_toml()).unwrap();

        assert_eq!(config.general.max_workers, 4);
        assert_eq!(config.taxonomies.get("tag").map(String::as_str), Some("tags"));
        assert_eq!(config.listing.order, SortOrder::Alphabetical);
        assert!(!config.keys.preserve_case);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.general.content_path, PathBuf::from("./content.json"));
        assert_eq!(config.taxonomies.len(), 2);
        assert_eq!(config.build_config().taxonomies.len(), 2);
    }

    #[test]
    fn test_listing_order_accepts_count_alias() {
        let config: AppConfig = toml::from_str("[listing]\norder = \"count\"\n").unwrap();
        assert_eq!(config.listing_config().order, SortOrder::ByCount);
    }
}
