use crate::detect::dmi::DmiField;
use crate::detect::i2c::I2C_DEVICES_DIR;
use crate::sysfs::SysfsRoot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A capture of every sysfs path touchquirk reads.
/// Serialized to JSON to reproduce a machine's identity in tests or bug reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// touchquirk version that created this snapshot
    pub version: String,
    pub timestamp: String,
    /// Captured file paths and their contents (relative paths, newline stripped)
    pub files: BTreeMap<String, String>,
    /// Directories that carry no captured file but must exist
    pub dirs: Vec<String>,
}

impl Snapshot {
    pub fn capture(sysfs: &SysfsRoot) -> Self {
        let mut files = BTreeMap::new();
        let mut dirs = Vec::new();

        for field in DmiField::ALL {
            let path = field.sysfs_path();
            if let Some(val) = sysfs.read_optional(&path).unwrap_or(None) {
                files.insert(path, val);
            }
        }

        capture_i2c_devices(sysfs, &mut files, &mut dirs);

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            files,
            dirs,
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Recreate the captured tree under `root` and return a `SysfsRoot` for it.
    pub fn materialize(&self, root: &Path) -> std::io::Result<SysfsRoot> {
        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir))?;
        }
        for (path, content) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&full_path, format!("{}\n", content))?;
        }
        Ok(SysfsRoot::new(root))
    }
}

fn capture_i2c_devices(
    sysfs: &SysfsRoot,
    files: &mut BTreeMap<String, String>,
    dirs: &mut Vec<String>,
) {
    let entries = match sysfs.list_dir(I2C_DEVICES_DIR) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in &entries {
        let base = format!("{}/{}", I2C_DEVICES_DIR, entry);
        dirs.push(base.clone());

        let name_path = format!("{}/name", base);
        if let Some(val) = sysfs.read_optional(&name_path).unwrap_or(None) {
            files.insert(name_path, val);
        }

        // Only presence matters; the link target is not reproducible.
        let fw_node = format!("{}/firmware_node", base);
        if sysfs.exists(&fw_node) {
            dirs.push(fw_node);
        }
    }
}
