use crate::error::AttachError;
use crate::quirks::record::{Property, serialize_properties};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Where injected properties end up.
///
/// The coordinator guarantees at most one successful call per boot; stores
/// need not be idempotent.
pub trait PropertyStore: Send + Sync {
    fn attach_properties(&self, device_id: &str, properties: &[Property]) -> Result<(), AttachError>;
}

#[derive(Serialize)]
struct PropertyFile<'a> {
    device: &'a str,
    #[serde(serialize_with = "serialize_properties")]
    properties: &'a [Property],
}

/// Writes each device's properties to `<dir>/<device>.json` for the
/// userspace consumer (udev helper, driver loader) to pick up.
#[derive(Debug, Clone)]
pub struct JsonPropertyStore {
    dir: PathBuf,
}

impl JsonPropertyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, device_id: &str) -> PathBuf {
        let file: String = device_id
            .chars()
            .map(|c| if c == '/' { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl PropertyStore for JsonPropertyStore {
    fn attach_properties(&self, device_id: &str, properties: &[Property]) -> Result<(), AttachError> {
        let fail = |reason: String| AttachError {
            device: device_id.to_string(),
            reason,
        };

        fs::create_dir_all(&self.dir)
            .map_err(|e| fail(format!("{}: {}", self.dir.display(), e)))?;

        let json = serde_json::to_string_pretty(&PropertyFile {
            device: device_id,
            properties,
        })
        .map_err(|e| fail(e.to_string()))?;

        let path = self.path_for(device_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| fail(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| fail(format!("{}: {}", path.display(), e)))?;

        info!(device = device_id, path = %path.display(), "wrote device properties");
        Ok(())
    }
}

/// Dry-run store: logs what would be attached and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPropertyStore;

impl PropertyStore for LogPropertyStore {
    fn attach_properties(&self, device_id: &str, properties: &[Property]) -> Result<(), AttachError> {
        for p in properties {
            info!(device = device_id, "would set {} = {}", p.key, p.value);
        }
        Ok(())
    }
}
