//! Configuration for the taxonomy engine
//!
//! Loaded from a JSON file when one exists; every field falls back to its
//! default so older files without newer fields still deserialize.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{FilterLevel, FILTER_LEVEL_COUNT};

/// Upper bound accepted for `max_name_length`
const MAX_SUPPORTED_NAME_LENGTH: usize = 1024;

const CONFIG_FILE: &str = "taxonomy.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Longest category name accepted on create/rename (in characters)
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Strip surrounding whitespace from names before submitting them
    #[serde(default = "default_trim_names")]
    pub trim_names: bool,

    /// Capacity of the taxonomy event broadcast channel
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Column labels for the three filter levels
    #[serde(default = "default_level_labels")]
    pub level_labels: [String; FILTER_LEVEL_COUNT],
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            trim_names: default_trim_names(),
            event_channel_capacity: default_event_channel_capacity(),
            level_labels: default_level_labels(),
        }
    }
}

fn default_max_name_length() -> usize {
    120
}

fn default_trim_names() -> bool {
    true
}

fn default_event_channel_capacity() -> usize {
    128
}

fn default_level_labels() -> [String; FILTER_LEVEL_COUNT] {
    [
        "Category".to_string(),
        "Sub-category".to_string(),
        "Species".to_string(),
    ]
}

impl TaxonomyConfig {
    /// Load configuration from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or holds values
    /// rejected by [`TaxonomyConfig::validate`].
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No taxonomy config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate().map_err(|msg| anyhow::anyhow!(msg))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_name_length == 0 {
            return Err("max_name_length must be greater than 0".to_string());
        }

        if self.max_name_length > MAX_SUPPORTED_NAME_LENGTH {
            return Err(format!(
                "max_name_length cannot exceed {}",
                MAX_SUPPORTED_NAME_LENGTH
            ));
        }

        if self.event_channel_capacity == 0 {
            return Err("event_channel_capacity must be greater than 0".to_string());
        }

        if self.level_labels.iter().any(|label| label.trim().is_empty()) {
            return Err("level_labels cannot contain empty labels".to_string());
        }

        Ok(())
    }

    pub fn label_for(&self, level: FilterLevel) -> &str {
        &self.level_labels[level.depth()]
    }
}

/// Default config location: `~/.nursery/taxonomy.json`
pub fn default_config_path() -> Result<PathBuf, std::io::Error> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine home directory",
        )
    })?;

    Ok(home_dir.join(".nursery").join(CONFIG_FILE))
}
