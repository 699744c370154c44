use crate::error::SubscriptionError;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusKind {
    I2c,
    Other,
}

/// A peripheral announced by the enumeration subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceArrival {
    /// Bus-level device name (the I2C client name).
    pub device_id: String,
    pub bus: BusKind,
    /// Whether the device was instantiated from firmware (ACPI) tables.
    pub acpi_companion: bool,
}

impl DeviceArrival {
    /// An ACPI-enumerated I2C client, the only kind quirks are applied to.
    pub fn i2c(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            bus: BusKind::I2c,
            acpi_companion: true,
        }
    }
}

pub type ArrivalCallback = Arc<dyn Fn(&DeviceArrival) + Send + Sync>;

/// Releases a subscription when dropped.
pub struct SubscriptionHandle {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Stop delivery now instead of at drop.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Device-arrival notification source.
pub trait DeviceBus {
    fn subscribe(&self, callback: ArrivalCallback) -> Result<SubscriptionHandle, SubscriptionError>;
}

/// In-process arrival event registry, driven by the host.
///
/// Callbacks run on the announcing thread, outside the registry lock.
#[derive(Default, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Default)]
struct EventBusInner {
    next_id: AtomicU64,
    subscribers: Mutex<BTreeMap<u64, ArrivalCallback>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `arrival` to every current subscriber.
    pub fn announce(&self, arrival: &DeviceArrival) {
        let callbacks: Vec<ArrivalCallback> =
            self.inner.subscribers.lock().values().cloned().collect();
        trace!(device = %arrival.device_id, subscribers = callbacks.len(), "device arrival");
        for callback in callbacks {
            callback(arrival);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

impl DeviceBus for EventBus {
    fn subscribe(&self, callback: ArrivalCallback) -> Result<SubscriptionHandle, SubscriptionError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().insert(id, callback);

        let inner = Arc::downgrade(&self.inner);
        Ok(SubscriptionHandle::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.subscribers.lock().remove(&id);
            }
        }))
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
