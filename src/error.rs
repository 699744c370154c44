use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sysfs read failed: {path}: {source}")]
    SysfsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rule '{rule}' has no match criteria")]
    InvalidRule { rule: String },

    #[error("malformed record for {model}: {detail}")]
    MalformedRecord { model: String, detail: String },

    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejection reasons for a firmware candidate, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no firmware descriptor for the selected configuration")]
    NoDescriptor,

    #[error("firmware length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("firmware prefix mismatch: expected {expected}, got {actual}")]
    PrefixMismatch { expected: String, actual: String },

    #[error("firmware sha256 mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}

/// Registration with the device-arrival stream failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to subscribe to device arrivals: {0}")]
pub struct SubscriptionError(pub String);

/// The property store refused to attach properties to a device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to attach properties to {device}: {reason}")]
pub struct AttachError {
    pub device: String,
    pub reason: String,
}
