use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level touchquirk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchquirkConfig {
    /// Alternate root for `/sys` lookups (testing, offline snapshots).
    pub sysfs_root: Option<PathBuf>,
    pub log: LogConfig,
    pub inject: InjectConfig,
    pub firmware: FirmwareConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by `TOUCHQUIRK_LOG`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectConfig {
    /// Directory receiving `<device>.json` property files.
    pub output_dir: PathBuf,
    /// Log the properties instead of writing them.
    pub dry_run: bool,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("/run/touchquirk"),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmwareConfig {
    /// Refuse to scan dumps larger than this.
    pub max_scan_bytes: u64,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            max_scan_bytes: 256 * 1024 * 1024,
        }
    }
}

const SYSTEM_CONFIG: &str = "/etc/touchquirk/config.toml";

fn load_system() -> Option<toml::Value> {
    let content = std::fs::read_to_string(Path::new(SYSTEM_CONFIG)).ok()?;
    toml::from_str(&content).ok()
}

/// Load the user config file (~/.config/touchquirk/config.toml) if it exists.
fn load_user() -> Option<toml::Value> {
    let dir = dirs::config_dir()?;
    let path = dir.join("touchquirk").join("config.toml");
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Recursively merge two TOML values. Tables are merged key-by-key;
/// all other types in `overlay` replace `base`.
fn merge_values(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_values(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

fn load_from_path(path: &Path) -> TouchquirkConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            eprintln!(
                "warning: failed to parse config at {}: {}",
                path.display(),
                e
            );
            TouchquirkConfig::default()
        }),
        Err(e) => {
            eprintln!(
                "warning: failed to read config at {}: {}",
                path.display(),
                e
            );
            TouchquirkConfig::default()
        }
    }
}

/// Load the merged config: system defaults, then user overrides.
/// If `override_path` is provided, use only that file instead.
///
/// Runs before logging is set up, so problems go straight to stderr.
pub fn load(override_path: Option<&PathBuf>) -> TouchquirkConfig {
    if let Some(path) = override_path {
        return load_from_path(path);
    }

    let merged = match (load_system(), load_user()) {
        (Some(s), Some(u)) => Some(merge_values(s, u)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    };

    match merged {
        Some(value) => value.try_into().unwrap_or_else(|e| {
            eprintln!("warning: failed to deserialize config: {}", e);
            TouchquirkConfig::default()
        }),
        None => TouchquirkConfig::default(),
    }
}
