use crate::error::{PulseError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "gitpulse.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/gitpulse/config.toml";

/// Layered settings: the working directory file overrides the global one,
/// flags override both. Both files are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PulseConfig {
    pub feed: Option<FeedConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub limit: Option<usize>,
    #[serde(default)]
    pub skip_archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Option<ConfigFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Md,
    Json,
}

impl PulseConfig {
    pub fn feed_limit(&self) -> Option<usize> {
        self.feed.as_ref().and_then(|feed| feed.limit)
    }

    pub fn skip_archived(&self) -> bool {
        self.feed
            .as_ref()
            .map(|feed| feed.skip_archived)
            .unwrap_or(false)
    }

    pub fn output_format(&self) -> Option<ConfigFormat> {
        self.output.as_ref().and_then(|output| output.format)
    }
}

pub fn load_config(cwd: &Path) -> Result<PulseConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(cwd, global.as_deref())
}

pub(crate) fn load_config_with_global(
    cwd: &Path,
    global_path: Option<&Path>,
) -> Result<PulseConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &cwd.join(DEFAULT_CONFIG_FILE))?;

    merged
        .try_into()
        .map_err(|e: toml::de::Error| PulseError::ConfigParse(e.to_string()))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| PulseError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
