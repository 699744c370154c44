use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use touchquirk::detect::HostInfo;
use touchquirk::detect::dmi::DmiField;
use touchquirk::error::ValidationError;
use touchquirk::firmware;
use touchquirk::inject::InjectionState;
use touchquirk::inject::host;
use touchquirk::inject::store::{JsonPropertyStore, LogPropertyStore};
use touchquirk::quirks::record::{ConfigurationRecord, FirmwareDescriptor, Property};
use touchquirk::quirks::table::builtin_rules;
use touchquirk::quirks::{self, ConfigurationRule, MatchCriterion, SelectedConfiguration};
use touchquirk::snapshot::Snapshot;
use touchquirk::sysfs::SysfsRoot;

fn write_dmi(root: &Path, fields: &[(&str, &str)]) {
    let dmi = root.join("sys/class/dmi/id");
    fs::create_dir_all(&dmi).unwrap();
    for (attr, value) in fields {
        fs::write(dmi.join(attr), format!("{}\n", value)).unwrap();
    }
}

/// Add an I2C client; `acpi` controls whether it gets a firmware_node link.
fn add_i2c_client(root: &Path, node: &str, name: &str, acpi: bool) {
    let dev = root.join("sys/bus/i2c/devices").join(node);
    fs::create_dir_all(&dev).unwrap();
    fs::write(dev.join("name"), format!("{}\n", name)).unwrap();
    if acpi {
        fs::create_dir_all(dev.join("firmware_node")).unwrap();
    }
}

/// A Chuwi Hi8 tablet: ilife/S806 board, Silead controller at MSSL0001:00,
/// plus an unrelated accelerometer and the adapter entry.
fn create_chuwi_hi8_fixture(root: &Path) {
    write_dmi(
        root,
        &[
            ("sys_vendor", "ilife"),
            ("product_name", "S806"),
            ("bios_version", "H1D_S806_206"),
        ],
    );
    fs::create_dir_all(root.join("sys/bus/i2c/devices/i2c-1")).unwrap();
    add_i2c_client(root, "i2c-BOSC0200:00", "BOSC0200:00", true);
    add_i2c_client(root, "i2c-MSSL0001:00", "MSSL0001:00", true);
}

fn create_unknown_laptop_fixture(root: &Path) {
    write_dmi(
        root,
        &[
            ("sys_vendor", "Framework"),
            ("product_name", "Laptop 16 (AMD Ryzen 7040 Series)"),
        ],
    );
    add_i2c_client(root, "i2c-PIXA3854:00", "PIXA3854:00", true);
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_chuwi_hi8_detection() {
    let tmp = TempDir::new().unwrap();
    create_chuwi_hi8_fixture(tmp.path());
    let sysfs = SysfsRoot::new(tmp.path());

    let host = HostInfo::detect(&sysfs);
    assert_eq!(host.dmi.get(DmiField::SysVendor), Some("ilife"));
    assert_eq!(host.dmi.get(DmiField::ProductName), Some("S806"));
    assert_eq!(host.dmi.get(DmiField::BoardName), None);

    let names: Vec<&str> = host.i2c.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["BOSC0200:00", "MSSL0001:00"]);
    assert!(host.i2c.iter().all(|c| c.acpi_companion));
}

#[test]
fn test_chuwi_hi8_selects_quirk() {
    let tmp = TempDir::new().unwrap();
    create_chuwi_hi8_fixture(tmp.path());
    let sysfs = SysfsRoot::new(tmp.path());
    let rules = builtin_rules().unwrap();

    let selected = SelectedConfiguration::resolve(&sysfs, &rules).unwrap();
    let record = selected.record().expect("Chuwi Hi8 should match");
    assert_eq!(record.model(), "Chuwi Hi8");
    assert_eq!(record.target_device(), "MSSL0001:00");
    assert!(record.firmware().is_none());
}

#[test]
fn test_inject_writes_target_properties_once() {
    let tmp = TempDir::new().unwrap();
    create_chuwi_hi8_fixture(tmp.path());
    let sysfs = SysfsRoot::new(tmp.path());
    let out = tmp.path().join("run");
    let rules = builtin_rules().unwrap();

    let report = host::run(&sysfs, &rules, JsonPropertyStore::new(&out)).unwrap();
    assert_eq!(report.model.as_deref(), Some("Chuwi Hi8"));
    assert_eq!(report.announced, 2);
    assert_eq!(report.state, InjectionState::Applied);

    let written: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written, ["MSSL0001:00.json"]);

    let file = read_json(&out.join("MSSL0001:00.json"));
    assert_eq!(file["device"], "MSSL0001:00");
    let props = &file["properties"];
    assert_eq!(props["touchscreen-size-x"], 1665);
    assert_eq!(props["touchscreen-size-y"], 1140);
    assert_eq!(props["touchscreen-swapped-x-y"], true);
    assert_eq!(props["silead,home-button"], true);
    assert_eq!(props["firmware-name"], "gsl1680-chuwi-hi8.fw");
}

#[test]
fn test_inject_ignores_target_without_acpi_companion() {
    let tmp = TempDir::new().unwrap();
    write_dmi(tmp.path(), &[("sys_vendor", "ilife"), ("product_name", "S806")]);
    add_i2c_client(tmp.path(), "1-0040", "MSSL0001:00", false);
    let sysfs = SysfsRoot::new(tmp.path());
    let out = tmp.path().join("run");

    let report = host::run(&sysfs, &builtin_rules().unwrap(), JsonPropertyStore::new(&out)).unwrap();
    assert_eq!(report.announced, 1);
    assert_eq!(report.state, InjectionState::Matched);
    assert!(!out.exists());
}

#[test]
fn test_inject_missing_target_stays_matched() {
    let tmp = TempDir::new().unwrap();
    write_dmi(tmp.path(), &[("sys_vendor", "ilife"), ("product_name", "S806")]);
    add_i2c_client(tmp.path(), "i2c-BOSC0200:00", "BOSC0200:00", true);
    let sysfs = SysfsRoot::new(tmp.path());
    let out = tmp.path().join("run");

    let report = host::run(&sysfs, &builtin_rules().unwrap(), JsonPropertyStore::new(&out)).unwrap();
    assert_eq!(report.target_device.as_deref(), Some("MSSL0001:00"));
    assert_eq!(report.state, InjectionState::Matched);
    assert!(!out.exists());
}

#[test]
fn test_unknown_machine_is_left_alone() {
    let tmp = TempDir::new().unwrap();
    create_unknown_laptop_fixture(tmp.path());
    let sysfs = SysfsRoot::new(tmp.path());
    let out = tmp.path().join("run");

    let report = host::run(&sysfs, &builtin_rules().unwrap(), JsonPropertyStore::new(&out)).unwrap();
    assert!(report.model.is_none());
    assert_eq!(report.announced, 0);
    assert_eq!(report.state, InjectionState::NoMatch);
    assert!(!out.exists());
}

#[test]
fn test_empty_sysfs_matches_nothing() {
    let tmp = TempDir::new().unwrap();
    let sysfs = SysfsRoot::new(tmp.path());

    let host = HostInfo::detect(&sysfs);
    assert!(host.dmi.is_empty());
    assert!(host.i2c.is_empty());
    assert!(quirks::first_match(&host.dmi, &builtin_rules().unwrap())
        .unwrap()
        .is_none());
}

#[test]
fn test_dry_run_reaches_applied_without_writing() {
    let tmp = TempDir::new().unwrap();
    create_chuwi_hi8_fixture(tmp.path());
    let sysfs = SysfsRoot::new(tmp.path());

    let report = host::run(&sysfs, &builtin_rules().unwrap(), LogPropertyStore).unwrap();
    assert_eq!(report.state, InjectionState::Applied);
    assert!(!tmp.path().join("run").exists());
}

#[test]
fn test_pipo_w2s_descriptor_rejects_blank_blob() {
    let tmp = TempDir::new().unwrap();
    write_dmi(tmp.path(), &[("sys_vendor", "PIPO"), ("product_name", "W2S")]);
    let sysfs = SysfsRoot::new(tmp.path());

    let selected = SelectedConfiguration::resolve(&sysfs, &builtin_rules().unwrap()).unwrap();
    let fw = selected
        .record()
        .and_then(|r| r.firmware())
        .expect("Pipo W2S carries a firmware descriptor");
    assert_eq!(fw.length, 39072);

    // A zero-filled blob of the right size fails on the magic prefix, not the digest.
    let blob = vec![0u8; fw.length];
    assert!(matches!(
        firmware::validate(fw, &blob),
        Err(ValidationError::PrefixMismatch { .. })
    ));
}

/// A descriptor for a synthetic blob, with its digest computed here.
fn synthetic_descriptor(blob: &[u8]) -> FirmwareDescriptor {
    FirmwareDescriptor {
        storage_name: Cow::Borrowed("silead/gsl1680-test.fw"),
        prefix: Cow::Owned(blob[..8].to_vec()),
        length: blob.len(),
        sha256: Sha256::digest(blob).into(),
    }
}

fn synthetic_blob() -> Vec<u8> {
    let mut blob = vec![0xf0, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
    blob.extend((0..248u32).map(|i| (i * 7 % 251) as u8));
    blob
}

#[test]
fn test_extract_from_dump_then_validate() {
    let blob = synthetic_blob();
    let descriptor = synthetic_descriptor(&blob);

    // A decoy with the right prefix but wrong body sits before the real copy.
    let mut dump = vec![0xffu8; 64];
    dump.extend_from_slice(&blob[..8]);
    dump.extend(std::iter::repeat_n(0u8, blob.len() - 8));
    dump.extend(std::iter::repeat_n(0xaau8, 40));
    let real_offset = dump.len();
    dump.extend_from_slice(&blob);
    dump.extend(std::iter::repeat_n(0u8, 16));
    assert_eq!(real_offset % firmware::EMBEDDED_FW_ALIGN, 0);

    let tmp = TempDir::new().unwrap();
    let dump_path = tmp.path().join("efi.bin");
    fs::write(&dump_path, &dump).unwrap();

    let haystack = fs::read(&dump_path).unwrap();
    let found = firmware::scan(&descriptor, &haystack).expect("embedded copy should be found");
    assert_eq!(found.offset, real_offset);
    assert_eq!(found.data, blob.as_slice());

    let extracted = tmp.path().join("gsl1680-test.fw");
    fs::write(&extracted, found.data).unwrap();
    let accepted = firmware::validate(&descriptor, &fs::read(&extracted).unwrap()).unwrap();
    assert_eq!(accepted.length, blob.len());
    assert_eq!(accepted.sha256, hex::encode(descriptor.sha256));
}

#[test]
fn test_custom_table_exact_rule_needs_whole_value() {
    let record = Arc::new(
        ConfigurationRecord::new(
            "Test Tablet",
            "MSSL1680:00",
            vec![Property::u32("touchscreen-size-x", 1920)],
            None,
        )
        .unwrap(),
    );
    let rules = vec![
        ConfigurationRule::new(
            "Test Tablet",
            [
                MatchCriterion::substring(DmiField::SysVendor, "Insyde"),
                MatchCriterion::exact(DmiField::ProductName, "Tablet"),
            ],
            Arc::clone(&record),
        )
        .unwrap(),
    ];

    let tmp = TempDir::new().unwrap();
    write_dmi(
        tmp.path(),
        &[("sys_vendor", "Insyde Corp."), ("product_name", "Tablet 10")],
    );
    add_i2c_client(tmp.path(), "i2c-MSSL1680:00", "MSSL1680:00", true);
    let sysfs = SysfsRoot::new(tmp.path());
    let out = tmp.path().join("run");

    let report = host::run(&sysfs, &rules, JsonPropertyStore::new(&out)).unwrap();
    assert_eq!(report.state, InjectionState::NoMatch);

    write_dmi(tmp.path(), &[("product_name", "Tablet")]);
    let report = host::run(&sysfs, &rules, JsonPropertyStore::new(&out)).unwrap();
    assert_eq!(report.state, InjectionState::Applied);
    assert_eq!(
        read_json(&out.join("MSSL1680:00.json"))["properties"]["touchscreen-size-x"],
        1920
    );
}

#[test]
fn test_snapshot_reproduces_match() {
    let tmp = TempDir::new().unwrap();
    create_chuwi_hi8_fixture(tmp.path());
    let sysfs = SysfsRoot::new(tmp.path());

    let snap = Snapshot::capture(&sysfs);
    let snap_path = tmp.path().join("snapshot.json");
    snap.save(&snap_path).unwrap();

    let dst = TempDir::new().unwrap();
    let restored = Snapshot::load(&snap_path)
        .unwrap()
        .materialize(dst.path())
        .unwrap();

    let original = HostInfo::detect(&sysfs);
    let replayed = HostInfo::detect(&restored);
    assert_eq!(original.dmi, replayed.dmi);
    assert_eq!(original.i2c, replayed.i2c);

    let out = dst.path().join("run");
    let report = host::run(&restored, &builtin_rules().unwrap(), JsonPropertyStore::new(&out)).unwrap();
    assert_eq!(report.state, InjectionState::Applied);
    assert!(out.join("MSSL0001:00.json").exists());
}
