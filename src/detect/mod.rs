pub mod dmi;
pub mod i2c;

use crate::sysfs::SysfsRoot;

/// Everything the host side reads from sysfs at startup.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub dmi: dmi::PlatformIdentity,
    pub i2c: Vec<i2c::I2cClient>,
}

impl HostInfo {
    pub fn detect(sysfs: &SysfsRoot) -> Self {
        Self {
            dmi: dmi::PlatformIdentity::detect(sysfs),
            i2c: i2c::detect(sysfs),
        }
    }
}
