//! Glide configuration file handling
//!
//! ```toml
//! [defaults]
//! easing = 0.15
//!
//! [regions.main]
//! viewport = "page-viewport"
//! content = "page-content"
//! bar = "page-bar"
//! track = "page-track"
//! thumb = "page-thumb"
//!
//! [regions.chat]
//! viewport = "chat-viewport"
//! content = "chat-log"
//! bar = "chat-bar"
//! track = "chat-track"
//! thumb = "chat-thumb"
//! scroll = { pin_to_end = true, stop_propagation = true }
//! ```
//!
//! `[defaults]` is merged under every region's `scroll` table key by key.

use anyhow::{Context, Result};
use glide_scroll::ScrollConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Element identifiers of one region's five handles
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegionElements {
    pub viewport: String,
    pub content: String,
    pub bar: String,
    pub track: String,
    pub thumb: String,
}

/// One configured region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    pub elements: RegionElements,
    pub scroll: ScrollConfig,
}

/// Top-level Glide configuration (glide.toml)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlideConfig {
    pub defaults: ScrollConfig,
    /// Regions in file order
    pub regions: IndexMap<String, RegionConfig>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    defaults: toml::Table,
    #[serde(default)]
    regions: IndexMap<String, RawRegion>,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    #[serde(flatten)]
    elements: RegionElements,
    #[serde(default)]
    scroll: toml::Table,
}

impl GlideConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration text.
    ///
    /// A region whose merged scroll settings are invalid is logged and left
    /// out; malformed TOML or a broken `[defaults]` table fails the whole load.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(source).context("Invalid glide config")?;

        let defaults = parse_scroll(raw.defaults.clone()).context("Invalid [defaults] table")?;

        let mut regions = IndexMap::with_capacity(raw.regions.len());
        for (name, region) in raw.regions {
            let mut merged = raw.defaults.clone();
            merged.extend(region.scroll);

            match parse_scroll(merged) {
                Ok(scroll) => {
                    regions.insert(
                        name,
                        RegionConfig {
                            elements: region.elements,
                            scroll,
                        },
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        region = %name,
                        error = %err,
                        "invalid scroll config, region skipped"
                    );
                }
            }
        }

        Ok(Self { defaults, regions })
    }

    pub fn region(&self, name: &str) -> Option<&RegionConfig> {
        self.regions.get(name)
    }
}

fn parse_scroll(table: toml::Table) -> glide_scroll::Result<ScrollConfig> {
    let config: ScrollConfig = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}
