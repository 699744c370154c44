use crate::inject::bus::{BusKind, DeviceArrival};
use crate::sysfs::SysfsRoot;
use serde::{Deserialize, Serialize};

pub const I2C_DEVICES_DIR: &str = "sys/bus/i2c/devices";

/// An I2C client as enumerated under `/sys/bus/i2c/devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I2cClient {
    /// Directory name on the bus, e.g. `i2c-MSSL1680:00` or `1-0040`.
    pub node: String,
    /// Client name as reported by the `name` attribute.
    pub name: String,
    /// Whether the client was instantiated from an ACPI node.
    pub acpi_companion: bool,
}

impl I2cClient {
    pub fn arrival(&self) -> DeviceArrival {
        DeviceArrival {
            device_id: self.name.clone(),
            bus: BusKind::I2c,
            acpi_companion: self.acpi_companion,
        }
    }
}

/// Adapters share the bus directory with clients; they are named `i2c-<n>`.
fn is_adapter(node: &str) -> bool {
    node.strip_prefix("i2c-")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

pub fn detect(sysfs: &SysfsRoot) -> Vec<I2cClient> {
    let entries = match sysfs.list_dir(I2C_DEVICES_DIR) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    entries
        .into_iter()
        .filter(|node| !is_adapter(node))
        .filter_map(|node| {
            let base = format!("{}/{}", I2C_DEVICES_DIR, node);
            let name = sysfs.read_optional(format!("{}/name", base)).unwrap_or(None)?;
            let acpi_companion = sysfs.exists(format!("{}/firmware_node", base));
            Some(I2cClient {
                node,
                name,
                acpi_companion,
            })
        })
        .collect()
}
