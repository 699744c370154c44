use super::bus::{DeviceArrival, DeviceBus, EventBus};
use super::store::PropertyStore;
use super::{InjectionCoordinator, InjectionState};
use crate::detect::i2c;
use crate::error::Result;
use crate::quirks::{ConfigurationRule, SelectedConfiguration};
use crate::sysfs::SysfsRoot;
use tracing::{info, warn};

/// Summary of one injection pass over the I2C bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectReport {
    pub model: Option<String>,
    pub target_device: Option<String>,
    pub announced: usize,
    pub state: InjectionState,
}

/// Match this machine, subscribe, then replay the I2C clients present in
/// sysfs as arrival events.
///
/// Subscription happens before the first announcement, so a target that is
/// already enumerated is still seen. A subscription failure is logged and the
/// pass ends in `Matched` without touching any device.
pub fn run<S: PropertyStore + 'static>(
    sysfs: &SysfsRoot,
    rules: &[ConfigurationRule],
    store: S,
) -> Result<InjectReport> {
    let selected = SelectedConfiguration::resolve(sysfs, rules)?;
    let bus = EventBus::new();
    Ok(run_on_bus(sysfs, selected, store, &bus, |arrival| {
        bus.announce(arrival)
    }))
}

fn run_on_bus<S, B>(
    sysfs: &SysfsRoot,
    selected: SelectedConfiguration,
    store: S,
    bus: &B,
    announce: impl Fn(&DeviceArrival),
) -> InjectReport
where
    S: PropertyStore + 'static,
    B: DeviceBus,
{
    let model = selected.record().map(|r| r.model().to_string());
    let target_device = selected.record().map(|r| r.target_device().to_string());
    let coordinator = InjectionCoordinator::new(selected, store);

    let mut announced = 0;
    match coordinator.start(bus) {
        Ok(Some(_handle)) => {
            for client in i2c::detect(sysfs) {
                announce(&client.arrival());
                announced += 1;
            }
        }
        Ok(None) => info!("no touchscreen quirk for this machine"),
        Err(e) => warn!("injection disabled: {}", e),
    }

    InjectReport {
        model,
        target_device,
        announced,
        state: coordinator.state(),
    }
}
