use crate::error::{Error, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Bounded comparison length for bus device names (`I2C_NAME_SIZE`).
pub const DEVICE_NAME_MAX: usize = 20;

/// Longest magic prefix a firmware descriptor can carry.
pub const FIRMWARE_PREFIX_MAX: usize = 8;

/// Typed value of a device property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Presence-only flag.
    Bool,
    U32(u32),
    Str(Cow<'static, str>),
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Bool => serializer.serialize_bool(true),
            PropertyValue::U32(v) => serializer.serialize_u32(*v),
            PropertyValue::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool => write!(f, "true"),
            PropertyValue::U32(v) => write!(f, "{}", v),
            PropertyValue::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// A single key/value device property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: Cow<'static, str>,
    pub value: PropertyValue,
}

impl Property {
    pub const fn flag(key: &'static str) -> Self {
        Self {
            key: Cow::Borrowed(key),
            value: PropertyValue::Bool,
        }
    }

    pub const fn u32(key: &'static str, value: u32) -> Self {
        Self {
            key: Cow::Borrowed(key),
            value: PropertyValue::U32(value),
        }
    }

    pub const fn string(key: &'static str, value: &'static str) -> Self {
        Self {
            key: Cow::Borrowed(key),
            value: PropertyValue::Str(Cow::Borrowed(value)),
        }
    }
}

/// Serializes an ordered property set as a JSON/TOML map, preserving order.
pub fn serialize_properties<S: Serializer>(
    properties: &[Property],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for p in properties {
        map.serialize_entry(p.key.as_ref(), &p.value)?;
    }
    map.end()
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Expected identity of an embedded firmware blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmwareDescriptor {
    /// Name the firmware loader requests the blob under.
    pub storage_name: Cow<'static, str>,
    #[serde(serialize_with = "serialize_hex")]
    pub prefix: Cow<'static, [u8]>,
    pub length: usize,
    #[serde(serialize_with = "serialize_hex")]
    pub sha256: [u8; 32],
}

impl FirmwareDescriptor {
    pub const fn new(
        storage_name: &'static str,
        prefix: &'static [u8],
        length: usize,
        sha256: [u8; 32],
    ) -> Self {
        Self {
            storage_name: Cow::Borrowed(storage_name),
            prefix: Cow::Borrowed(prefix),
            length,
            sha256,
        }
    }
}

/// Configuration applied to one touchscreen model.
///
/// Built once at startup; construction enforces the descriptor invariants so a
/// malformed table aborts initialization instead of surfacing at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationRecord {
    model: Cow<'static, str>,
    target_device: Cow<'static, str>,
    #[serde(serialize_with = "serialize_properties")]
    properties: Cow<'static, [Property]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    firmware: Option<FirmwareDescriptor>,
}

impl ConfigurationRecord {
    pub fn new(
        model: impl Into<Cow<'static, str>>,
        target_device: impl Into<Cow<'static, str>>,
        properties: impl Into<Cow<'static, [Property]>>,
        firmware: Option<FirmwareDescriptor>,
    ) -> Result<Self> {
        let model = model.into();
        if let Some(fw) = &firmware {
            if fw.prefix.len() > FIRMWARE_PREFIX_MAX {
                return Err(Error::MalformedRecord {
                    model: model.into_owned(),
                    detail: format!(
                        "firmware prefix is {} bytes, at most {} allowed",
                        fw.prefix.len(),
                        FIRMWARE_PREFIX_MAX
                    ),
                });
            }
            if fw.prefix.len() > fw.length {
                return Err(Error::MalformedRecord {
                    model: model.into_owned(),
                    detail: format!(
                        "firmware prefix ({} bytes) longer than expected length ({} bytes)",
                        fw.prefix.len(),
                        fw.length
                    ),
                });
            }
        }

        Ok(Self {
            model,
            target_device: target_device.into(),
            properties: properties.into(),
            firmware,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn target_device(&self) -> &str {
        &self.target_device
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn firmware(&self) -> Option<&FirmwareDescriptor> {
        self.firmware.as_ref()
    }

    /// Whether `device_id` names this record's target, comparing at most
    /// [`DEVICE_NAME_MAX`] bytes.
    pub fn targets(&self, device_id: &str) -> bool {
        bounded(&self.target_device) == bounded(device_id)
    }
}

fn bounded(name: &str) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[..bytes.len().min(DEVICE_NAME_MAX)]
}
