//! Event-driven, at-most-once property injection.
//!
//! The coordinator owns the configuration selected at startup and listens for
//! device arrivals. The first arrival naming the record's target device gets
//! the property set attached; every later arrival is a no-op.

pub mod bus;
pub mod host;
pub mod store;

use crate::error::{AttachError, SubscriptionError, ValidationError};
use crate::firmware::{self, Accepted};
use crate::quirks::SelectedConfiguration;
use crate::quirks::record::{ConfigurationRecord, FirmwareDescriptor};
use bus::{BusKind, DeviceArrival, DeviceBus, SubscriptionHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use store::PropertyStore;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionState {
    Uninitialized,
    /// No rule matched; nothing will ever be applied.
    NoMatch,
    /// Waiting for the target device.
    Matched,
    /// An arrival claimed the record and is attaching.
    Applying,
    Applied,
}

/// What a single arrival event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// Nothing selected, or the device is not an ACPI I2C client.
    Ignored,
    /// Not the target device.
    NotTarget,
    Applied,
    AlreadyApplied,
    /// Another arrival holds the claim; this one is dropped even if that
    /// attach later fails.
    InProgress,
    Failed(AttachError),
}

pub struct InjectionCoordinator<S> {
    selected: SelectedConfiguration,
    store: S,
    state: Mutex<InjectionState>,
    subscribed: AtomicBool,
}

impl<S: PropertyStore> InjectionCoordinator<S> {
    pub fn new(selected: SelectedConfiguration, store: S) -> Arc<Self> {
        Arc::new(Self {
            selected,
            store,
            state: Mutex::new(InjectionState::Uninitialized),
            subscribed: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> InjectionState {
        *self.state.lock()
    }

    pub fn selected(&self) -> Option<&ConfigurationRecord> {
        self.selected.record()
    }

    /// Descriptor of the firmware the selected configuration expects, if any.
    pub fn firmware_descriptor(&self) -> Option<&FirmwareDescriptor> {
        self.selected.record().and_then(ConfigurationRecord::firmware)
    }

    pub fn validate_firmware(&self, candidate: &[u8]) -> Result<Accepted, ValidationError> {
        let descriptor = self
            .firmware_descriptor()
            .ok_or(ValidationError::NoDescriptor)?;
        firmware::validate(descriptor, candidate)
    }

    /// Readiness signal: subscribed and still waiting for the target device.
    pub fn is_listening(&self) -> bool {
        self.subscribed.load(Ordering::Acquire) && self.state() == InjectionState::Matched
    }

    fn update(&self, to: InjectionState) {
        *self.state.lock() = to;
    }

    /// Handle one arrival event.
    ///
    /// The state lock is held only to claim the record; the store is called
    /// with the lock released.
    pub fn handle_arrival(&self, arrival: &DeviceArrival) -> ArrivalOutcome {
        let Some(record) = self.selected.record() else {
            return ArrivalOutcome::Ignored;
        };
        if arrival.bus != BusKind::I2c || !arrival.acpi_companion {
            return ArrivalOutcome::Ignored;
        }
        if !record.targets(&arrival.device_id) {
            return ArrivalOutcome::NotTarget;
        }

        {
            let mut state = self.state.lock();
            match *state {
                InjectionState::Matched => *state = InjectionState::Applying,
                InjectionState::Applying => {
                    debug!(device = %arrival.device_id, "attach in progress, dropping arrival");
                    return ArrivalOutcome::InProgress;
                }
                InjectionState::Applied => {
                    debug!(device = %arrival.device_id, "properties already applied");
                    return ArrivalOutcome::AlreadyApplied;
                }
                InjectionState::Uninitialized | InjectionState::NoMatch => {
                    return ArrivalOutcome::Ignored;
                }
            }
        }

        match self
            .store
            .attach_properties(&arrival.device_id, record.properties())
        {
            Ok(()) => {
                self.update(InjectionState::Applied);
                info!(
                    model = record.model(),
                    device = %arrival.device_id,
                    count = record.properties().len(),
                    "attached touchscreen properties"
                );
                ArrivalOutcome::Applied
            }
            Err(e) => {
                self.update(InjectionState::Matched);
                error!(device = %arrival.device_id, "failed to add properties: {}", e.reason);
                ArrivalOutcome::Failed(e)
            }
        }
    }
}

impl<S: PropertyStore + 'static> InjectionCoordinator<S> {
    /// Leave `Uninitialized`, subscribing to `bus` only if a record was selected.
    ///
    /// Must run before the bus starts announcing devices; arrivals announced
    /// earlier are missed. A failed subscription leaves the coordinator in
    /// `Matched` with no live injection path and returns the error. Only the
    /// first call does anything; later calls return `Ok(None)`.
    pub fn start(
        self: &Arc<Self>,
        bus: &impl DeviceBus,
    ) -> Result<Option<SubscriptionHandle>, SubscriptionError> {
        {
            let mut state = self.state.lock();
            let current = *state;
            if current != InjectionState::Uninitialized {
                debug!(state = ?current, "coordinator already started");
                return Ok(None);
            }
            if !self.selected.is_matched() {
                *state = InjectionState::NoMatch;
                debug!("no configuration selected, not subscribing");
                return Ok(None);
            }
            *state = InjectionState::Matched;
        }

        let coordinator = Arc::clone(self);
        match bus.subscribe(Arc::new(move |arrival: &DeviceArrival| {
            coordinator.handle_arrival(arrival);
        })) {
            Ok(handle) => {
                self.subscribed.store(true, Ordering::Release);
                Ok(Some(handle))
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }
}
