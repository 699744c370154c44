use crate::sysfs::SysfsRoot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const DMI_ID_DIR: &str = "sys/class/dmi/id";

/// DMI string fields a quirk rule can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DmiField {
    BiosVendor,
    BiosVersion,
    BiosDate,
    SysVendor,
    ProductName,
    ProductVersion,
    ProductFamily,
    BoardVendor,
    BoardName,
    BoardVersion,
    ChassisVendor,
    ChassisVersion,
}

impl DmiField {
    pub const ALL: [DmiField; 12] = [
        DmiField::BiosVendor,
        DmiField::BiosVersion,
        DmiField::BiosDate,
        DmiField::SysVendor,
        DmiField::ProductName,
        DmiField::ProductVersion,
        DmiField::ProductFamily,
        DmiField::BoardVendor,
        DmiField::BoardName,
        DmiField::BoardVersion,
        DmiField::ChassisVendor,
        DmiField::ChassisVersion,
    ];

    /// Attribute file name under `/sys/class/dmi/id`.
    pub fn attribute(self) -> &'static str {
        match self {
            DmiField::BiosVendor => "bios_vendor",
            DmiField::BiosVersion => "bios_version",
            DmiField::BiosDate => "bios_date",
            DmiField::SysVendor => "sys_vendor",
            DmiField::ProductName => "product_name",
            DmiField::ProductVersion => "product_version",
            DmiField::ProductFamily => "product_family",
            DmiField::BoardVendor => "board_vendor",
            DmiField::BoardName => "board_name",
            DmiField::BoardVersion => "board_version",
            DmiField::ChassisVendor => "chassis_vendor",
            DmiField::ChassisVersion => "chassis_version",
        }
    }

    pub fn from_attribute(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.attribute() == name)
    }

    pub fn sysfs_path(self) -> String {
        format!("{}/{}", DMI_ID_DIR, self.attribute())
    }
}

impl fmt::Display for DmiField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// Snapshot of the machine's DMI strings, taken once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformIdentity {
    fields: BTreeMap<DmiField, String>,
}

impl PlatformIdentity {
    pub fn detect(sysfs: &SysfsRoot) -> Self {
        let mut fields = BTreeMap::new();
        for field in DmiField::ALL {
            if let Some(value) = sysfs.read_optional(field.sysfs_path()).unwrap_or(None) {
                fields.insert(field, value);
            }
        }
        Self { fields }
    }

    /// Value of a field, or `None` when the firmware did not provide it.
    pub fn get(&self, field: DmiField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn with(mut self, field: DmiField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (DmiField, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(DmiField, String)> for PlatformIdentity {
    fn from_iter<I: IntoIterator<Item = (DmiField, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Source of the platform identity snapshot.
pub trait IdentitySource {
    fn read_identity(&self) -> PlatformIdentity;
}

impl IdentitySource for SysfsRoot {
    fn read_identity(&self) -> PlatformIdentity {
        PlatformIdentity::detect(self)
    }
}

impl IdentitySource for PlatformIdentity {
    fn read_identity(&self) -> PlatformIdentity {
        self.clone()
    }
}
