//! Taxonomy Snapshot Browser
//!
//! Standalone binary that loads a taxonomy snapshot from a JSON file into
//! an in-memory backend, runs it through the same `TaxonomyService` the
//! presentation layer uses and prints the visible rows as an indented table.
//! Handy for checking filter and expansion behavior against real data
//! without a UI.
//!
//! # Usage
//!
//! ```bash
//! # Print root categories
//! TAXONOMY_SNAPSHOT=./taxonomy.json cargo run --bin taxonomy-dev
//!
//! # Species filter, ancestors of matches open automatically
//! TAXONOMY_SNAPSHOT=./taxonomy.json TAXONOMY_FILTER_SPECIES=gala cargo run --bin taxonomy-dev
//! ```
//!
//! # Environment Variables
//!
//! - `TAXONOMY_SNAPSHOT`: Path to a JSON array of nested categories (required)
//! - `TAXONOMY_CONFIG`: Config file (default: ~/.nursery/taxonomy.json)
//! - `TAXONOMY_FILTER_CATEGORY`: Filter text for the first level
//! - `TAXONOMY_FILTER_SUBCATEGORY`: Filter text for the second level
//! - `TAXONOMY_FILTER_SPECIES`: Filter text for the third level
//! - `TAXONOMY_EXPAND_ALL`: Set to "1" to open every category when no filter is set
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use nursery_core::config::{default_config_path, TaxonomyConfig};
use nursery_core::{
    CategoryNode, FilterLevel, FilterState, InMemoryBackend, TaxonomyService, VisibleRow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let snapshot_path: PathBuf = env::var("TAXONOMY_SNAPSHOT")
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("TAXONOMY_SNAPSHOT must point to a snapshot file"))?;

    let config_path = match env::var("TAXONOMY_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => default_config_path()?,
    };
    let config = TaxonomyConfig::load(&config_path).await?;
    tracing::info!("Config: {}", config_path.display());

    let contents = tokio::fs::read_to_string(&snapshot_path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
    let forest: Vec<CategoryNode> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse snapshot {}", snapshot_path.display()))?;
    tracing::info!("Snapshot: {}", snapshot_path.display());

    let backend = Arc::new(InMemoryBackend::from_forest(&forest));
    let mut service = TaxonomyService::with_config(backend, config)?;
    service.refresh().await?;

    let filter = filter_from_env();
    if filter.is_active() {
        service.set_filter(filter);
    } else if env::var("TAXONOMY_EXPAND_ALL").is_ok_and(|value| value == "1") {
        service.expand_all();
    }

    let rows = service.visible_rows();
    tracing::info!(
        "{} of {} categories visible",
        rows.len(),
        service.tree().len()
    );

    for row in &rows {
        println!("{}", format_row(service.config(), row, service.is_open(&row.id)));
    }

    Ok(())
}

fn filter_from_env() -> FilterState {
    let mut filter = FilterState::default();
    for (level, key) in [
        (FilterLevel::Category, "TAXONOMY_FILTER_CATEGORY"),
        (FilterLevel::SubCategory, "TAXONOMY_FILTER_SUBCATEGORY"),
        (FilterLevel::Species, "TAXONOMY_FILTER_SPECIES"),
    ] {
        if let Ok(text) = env::var(key) {
            filter.set(level, text);
        }
    }
    filter
}

fn format_row(config: &TaxonomyConfig, row: &VisibleRow, open: bool) -> String {
    let marker = match (row.has_children, open) {
        (false, _) => " ",
        (true, true) => "-",
        (true, false) => "+",
    };
    let label = match FilterLevel::from_depth(row.depth) {
        Some(level) => config.label_for(level).to_string(),
        None => format!("Level {}", row.depth + 1),
    };

    format!(
        "{}{} {} [{}] ({})",
        "  ".repeat(row.depth),
        marker,
        row.name,
        label,
        row.id
    )
}
