//! Configuration types for facets.
//!
//! [`Config::load`] reads `~/.config/facets/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::error::Result;
use crate::filter::Filter;
use crate::list::default_filters_with_range;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[filters]
include_date_filter = true
default_date_range  = "last week"
statuses            = ["open", "fixed", "regressed", "ignored", "discarded"]
date_presets        = ["last hour", "last 24 hours", "last week", "last 30 days"]

[ui]
panel_width_pct = 40
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/facets/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[filters]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FiltersConfig {
    #[serde(default = "default_include_date_filter")]
    pub include_date_filter: bool,
    #[serde(default = "default_date_range")]
    pub default_date_range: String,
    /// Status values offered by the status facet.
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,
    /// Range expressions the date facet cycles through.
    #[serde(default = "default_date_presets")]
    pub date_presets: Vec<String>,
}

fn default_include_date_filter() -> bool {
    true
}

fn default_date_range() -> String {
    crate::list::DEFAULT_DATE_RANGE.to_string()
}

fn default_statuses() -> Vec<String> {
    ["open", "fixed", "regressed", "ignored", "discarded"]
        .map(String::from)
        .to_vec()
}

fn default_date_presets() -> Vec<String> {
    ["last hour", "last 24 hours", "last week", "last 30 days"]
        .map(String::from)
        .to_vec()
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            include_date_filter: default_include_date_filter(),
            default_date_range: default_date_range(),
            statuses: default_statuses(),
            date_presets: default_date_presets(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_panel_width_pct")]
    pub panel_width_pct: u16,
}

fn default_panel_width_pct() -> u16 {
    40
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            panel_width_pct: default_panel_width_pct(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/facets/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The filter set a listing starts with and resets to.
    pub fn default_filters(&self) -> Vec<Filter> {
        default_filters_with_range(
            &self.filters.default_date_range,
            self.filters.include_date_filter,
        )
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("facets")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
