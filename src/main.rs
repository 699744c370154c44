use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use touchquirk::cli::{Cli, Command};
use touchquirk::config::TouchquirkConfig;
use touchquirk::detect::HostInfo;
use touchquirk::inject::store::{JsonPropertyStore, LogPropertyStore};
use touchquirk::quirks::record::FirmwareDescriptor;
use touchquirk::quirks::{self, ConfigurationRule};
use touchquirk::snapshot::Snapshot;
use touchquirk::sysfs::SysfsRoot;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TOUCHQUIRK_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = touchquirk::config::load(cli.config.as_ref());
    init_logging(&config);

    let sysfs = match cli.sysfs_root.as_ref().or(config.sysfs_root.as_ref()) {
        Some(root) => SysfsRoot::new(root),
        None => SysfsRoot::system(),
    };
    let rules = quirks::table::builtin_rules()?;

    match cli.command {
        Command::Identify => cmd_identify(&sysfs, &rules, cli.json)?,
        Command::List => cmd_list(&rules, cli.json),
        Command::Verify { file, rule } => {
            cmd_verify(&sysfs, &rules, &file, rule.as_deref(), cli.json)?
        }
        Command::Extract { dump, output, rule } => cmd_extract(
            &sysfs,
            &rules,
            &config,
            &dump,
            output.as_deref(),
            rule.as_deref(),
            cli.json,
        )?,
        Command::Inject {
            dry_run,
            output_dir,
        } => cmd_inject(&sysfs, &rules, &config, dry_run, output_dir, cli.json)?,
        Command::Snapshot { output } => cmd_snapshot(&sysfs, output.as_deref())?,
        Command::Completions { shell } => touchquirk::cli::print_completions(shell),
    }

    Ok(())
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_logging(config: &TouchquirkConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .init();
}

fn cmd_identify(sysfs: &SysfsRoot, rules: &[ConfigurationRule], json: bool) -> Result<()> {
    let host = HostInfo::detect(sysfs);
    let matched = quirks::first_match(&host.dmi, rules)?;

    if json {
        touchquirk::output::print_identity_json(&host.dmi, &host.i2c, matched);
        return Ok(());
    }

    touchquirk::output::print_identity(&host.dmi, &host.i2c);
    println!();
    match matched {
        Some(rule) => {
            touchquirk::output::print_record(&rule.name, &rule.record);
            let present = host
                .i2c
                .iter()
                .any(|c| c.acpi_companion && rule.record.targets(&c.name));
            if !present {
                println!(
                    "  {} {} is not enumerated on the I2C bus.",
                    "Note:".yellow(),
                    rule.record.target_device()
                );
            }
        }
        None => touchquirk::output::print_no_match(&host.dmi),
    }

    Ok(())
}

fn cmd_list(rules: &[ConfigurationRule], json: bool) {
    if json {
        touchquirk::output::print_rules_json(rules);
    } else {
        touchquirk::output::print_rules(rules);
    }
}

/// The descriptor named by `--rule`, or the one this machine selects.
fn pick_descriptor<'a>(
    sysfs: &SysfsRoot,
    rules: &'a [ConfigurationRule],
    rule_name: Option<&str>,
) -> Result<&'a FirmwareDescriptor> {
    let rule = match rule_name {
        Some(name) => rules
            .iter()
            .find(|r| r.name == name)
            .with_context(|| format!("no quirk rule named {:?}", name))?,
        None => {
            let host = HostInfo::detect(sysfs);
            quirks::first_match(&host.dmi, rules)?.context(
                "no quirk rule matches this machine; pass --rule to pick a descriptor",
            )?
        }
    };

    rule.record
        .firmware()
        .with_context(|| format!("{} has no embedded firmware descriptor", rule.name))
}

fn cmd_verify(
    sysfs: &SysfsRoot,
    rules: &[ConfigurationRule],
    file: &Path,
    rule_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let descriptor = pick_descriptor(sysfs, rules, rule_name)?;
    let candidate =
        fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let result = touchquirk::firmware::validate(descriptor, &candidate);

    if json {
        touchquirk::output::print_validation_json(&result);
    } else {
        touchquirk::output::print_validation(&result);
    }

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_extract(
    sysfs: &SysfsRoot,
    rules: &[ConfigurationRule],
    config: &TouchquirkConfig,
    dump: &Path,
    output: Option<&Path>,
    rule_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let descriptor = pick_descriptor(sysfs, rules, rule_name)?;

    let size = fs::metadata(dump)
        .with_context(|| format!("failed to stat {}", dump.display()))?
        .len();
    if size > config.firmware.max_scan_bytes {
        anyhow::bail!(
            "{} is {} bytes, over the {} byte scan limit",
            dump.display(),
            size,
            config.firmware.max_scan_bytes
        );
    }

    let haystack =
        fs::read(dump).with_context(|| format!("failed to read {}", dump.display()))?;
    let found = touchquirk::firmware::scan(descriptor, &haystack).with_context(|| {
        format!(
            "no copy of {} found in {}",
            descriptor.storage_name,
            dump.display()
        )
    })?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| touchquirk::firmware::default_output_path(descriptor));
    fs::write(&output, found.data)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if json {
        touchquirk::output::print_validation_json(&Ok(found.accepted));
    } else {
        println!(
            "  Found {} at offset {:#x}",
            descriptor.storage_name.bold(),
            found.offset
        );
        touchquirk::output::print_validation(&Ok(found.accepted));
        println!("  Written to {}", output.display().to_string().cyan());
    }

    Ok(())
}

fn cmd_inject(
    sysfs: &SysfsRoot,
    rules: &[ConfigurationRule],
    config: &TouchquirkConfig,
    dry_run: bool,
    output_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let report = if dry_run || config.inject.dry_run {
        touchquirk::inject::host::run(sysfs, rules, LogPropertyStore)?
    } else {
        let dir = output_dir.unwrap_or_else(|| config.inject.output_dir.clone());
        touchquirk::inject::host::run(sysfs, rules, JsonPropertyStore::new(dir))?
    };

    if json {
        touchquirk::output::print_inject_json(&report);
    } else {
        touchquirk::output::print_inject_report(&report);
    }

    Ok(())
}

fn cmd_snapshot(sysfs: &SysfsRoot, output: Option<&Path>) -> Result<()> {
    let snap = Snapshot::capture(sysfs);
    match output {
        Some(path) => {
            snap.save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Snapshot written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&snap)?),
    }
    Ok(())
}
