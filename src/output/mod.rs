use crate::detect::dmi::PlatformIdentity;
use crate::detect::i2c::I2cClient;
use crate::error::ValidationError;
use crate::firmware::Accepted;
use crate::inject::host::InjectReport;
use crate::quirks::ConfigurationRule;
use crate::quirks::record::ConfigurationRecord;
use colored::Colorize;

const LABEL_W: usize = 16;

fn print_box(title: &str, rows: &[(String, String)]) {
    let inner_w = rows
        .iter()
        .map(|(l, v)| l.len().max(LABEL_W) + 2 + v.len())
        .max()
        .unwrap_or(40)
        .max(title.len() + 2);

    let fill = inner_w.saturating_sub(1 + title.len());
    println!("╭─ {} {}╮", title.bold(), "─".repeat(fill));

    for (label, value) in rows {
        let padded = format!("{:<w$}", label, w = LABEL_W);
        let pad = inner_w.saturating_sub(padded.len() + 2 + value.len());
        println!("│ {}  {}{} │", padded.dimmed(), value, " ".repeat(pad));
    }

    println!("╰{}╯", "─".repeat(inner_w + 2));
}

pub fn print_identity(identity: &PlatformIdentity, i2c: &[I2cClient]) {
    let mut rows: Vec<(String, String)> = identity
        .iter()
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect();
    if rows.is_empty() {
        rows.push(("DMI".to_string(), "unavailable".to_string()));
    }
    for client in i2c {
        let acpi = if client.acpi_companion { " (ACPI)" } else { "" };
        rows.push((
            format!("i2c {}", client.node),
            format!("{}{}", client.name, acpi),
        ));
    }
    print_box("Platform", &rows);
}

pub fn print_record(rule_name: &str, record: &ConfigurationRecord) {
    println!(
        "  {} {} ({})",
        "Matched quirk:".bold(),
        record.model().green(),
        rule_name.dimmed()
    );
    println!("  {} {}", "Target device:".bold(), record.target_device());
    for p in record.properties() {
        println!("    {} = {}", p.key.cyan(), p.value);
    }
    if let Some(fw) = record.firmware() {
        println!(
            "  {} {} ({} bytes, sha256 {})",
            "Embedded firmware:".bold(),
            fw.storage_name,
            fw.length,
            hex::encode(fw.sha256).dimmed()
        );
    }
    println!();
}

pub fn print_no_match(identity: &PlatformIdentity) {
    use crate::detect::dmi::DmiField;
    println!(
        "  {} No touchscreen quirk for this machine.",
        "Note:".yellow()
    );
    println!(
        "  Detected: {} {}",
        identity.get(DmiField::SysVendor).unwrap_or("Unknown"),
        identity.get(DmiField::ProductName).unwrap_or("")
    );
    println!();
}

pub fn print_identity_json(
    identity: &PlatformIdentity,
    i2c: &[I2cClient],
    matched: Option<&ConfigurationRule>,
) {
    let output = serde_json::json!({
        "dmi": identity,
        "i2c": i2c,
        "rule": matched.map(|r| &r.name),
        "record": matched.map(|r| r.record.as_ref()),
    });
    print_json(&output);
}

pub fn print_rules(rules: &[ConfigurationRule]) {
    let divider_w: usize = 64;
    let title = format!("Quirk rules ({})", rules.len());
    let fill = divider_w.saturating_sub(2 + title.len());
    println!("── {} {}", title.bold(), "─".repeat(fill));

    for (i, rule) in rules.iter().enumerate() {
        let fw = if rule.record.firmware().is_some() {
            " [fw]".magenta().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:>3} {}{}  {}",
            i + 1,
            rule.name,
            fw,
            rule.record.target_device().dimmed()
        );
        let criteria: Vec<String> = rule
            .criteria
            .iter()
            .map(|c| {
                let op = match c.mode {
                    crate::quirks::MatchMode::Substring => "~",
                    crate::quirks::MatchMode::Exact => "=",
                };
                format!("{}{}\"{}\"", c.field, op, c.value)
            })
            .collect();
        println!("       {}", criteria.join("  ").dimmed());
    }

    println!("{}", "─".repeat(divider_w));
}

pub fn print_rules_json(rules: &[ConfigurationRule]) {
    let output: Vec<_> = rules
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "criteria": r.criteria.iter().map(|c| serde_json::json!({
                    "field": c.field,
                    "value": c.value,
                    "exact": c.mode == crate::quirks::MatchMode::Exact,
                })).collect::<Vec<_>>(),
                "record": r.record.as_ref(),
            })
        })
        .collect();
    print_json(&output);
}

pub fn print_validation(result: &Result<Accepted, ValidationError>) {
    match result {
        Ok(accepted) => {
            println!(
                "  {} {} ({} bytes)",
                "Accepted:".green().bold(),
                accepted.storage_name,
                accepted.length
            );
            println!("  sha256 {}", accepted.sha256.dimmed());
        }
        Err(e) => println!("  {} {}", "Rejected:".red().bold(), e),
    }
}

pub fn print_validation_json(result: &Result<Accepted, ValidationError>) {
    let output = match result {
        Ok(accepted) => serde_json::json!({ "accepted": true, "firmware": accepted }),
        Err(e) => serde_json::json!({ "accepted": false, "reason": e.to_string() }),
    };
    print_json(&output);
}

pub fn print_inject_report(report: &InjectReport) {
    match &report.model {
        Some(model) => {
            println!("  {} {}", "Quirk:".bold(), model.green());
            println!(
                "  {} {} I2C device(s) announced, state {:?}",
                "Bus:".bold(),
                report.announced,
                report.state
            );
            if report.state != crate::inject::InjectionState::Applied {
                println!(
                    "  {} target {} not configured",
                    "!".yellow(),
                    report.target_device.as_deref().unwrap_or("?")
                );
            }
        }
        None => println!("  {} No touchscreen quirk for this machine.", "Note:".yellow()),
    }
}

pub fn print_inject_json(report: &InjectReport) {
    let output = serde_json::json!({
        "model": report.model,
        "target_device": report.target_device,
        "announced": report.announced,
        "state": format!("{:?}", report.state),
    });
    print_json(&output);
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} failed to serialize output: {}", "!".red(), e),
    }
}
