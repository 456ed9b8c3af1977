//! Build script for ricochet-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pager.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mirrors the capacities compiled into ricochet-core
const MAX_RECIPIENTS: usize = 8;
const MAX_RINGTONES: usize = 8;
const MAX_LABEL_LEN: usize = 16;
const NOTE_COUNT: usize = 8;

const SECTIONS: &[&str] = &[
    "radio",
    "receive",
    "battery",
    "alert",
    "tones",
    "ringtone",
    "recipient",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pager.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=pager.toml");

    let config_path = Path::new("pager.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(
            "Failed to read pager.toml",
            &[format!("{}", e), "The firmware embeds pager.toml; create one next to Cargo.toml".into()],
        ),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in pager.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    let tones = tone_names(&config, &mut errors);
    let ringtones = validate_ringtones(&config, &tones, &mut errors);
    validate_alert(&config, ringtones, &mut errors);
    validate_recipients(&config, ringtones, &mut errors);

    if !errors.is_empty() {
        fail("Invalid pager configuration", &errors);
    }

    println!("cargo:warning=pager.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let line = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for key in table.keys() {
        if !SECTIONS.contains(&key.as_str()) {
            errors.push(format!("Unknown section [{}]", key));
        }
    }
}

/// Tone names usable in ringtone notes (A, B, C plus any from [tones])
fn tone_names(config: &toml::Value, errors: &mut Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = vec!["A".into(), "B".into(), "C".into()];
    if let Some(tones) = config.get("tones").and_then(|t| t.as_table()) {
        for (name, hz) in tones {
            match hz.as_integer() {
                Some(hz) if (0..=i64::from(u16::MAX)).contains(&hz) => {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
                _ => errors.push(format!("[tones] {} must be 0-65535 Hz", name)),
            }
        }
    }
    names
}

/// Returns the number of ringtones in effect (5 factory ringtones if none given)
fn validate_ringtones(config: &toml::Value, tones: &[String], errors: &mut Vec<String>) -> usize {
    let Some(ringtones) = config.get("ringtone").and_then(|r| r.as_table()) else {
        return 5;
    };

    if ringtones.len() > MAX_RINGTONES {
        errors.push(format!("At most {} ringtones are supported", MAX_RINGTONES));
    }

    let mut indices = Vec::new();
    for (name, ringtone) in ringtones {
        match name.parse::<usize>() {
            Ok(i) => indices.push(i),
            Err(_) => errors.push(format!("[ringtone.{}] index must be a number", name)),
        }

        let Some(notes) = ringtone.get("notes").and_then(|n| n.as_array()) else {
            errors.push(format!("[ringtone.{}] missing 'notes' array", name));
            continue;
        };
        if notes.len() != NOTE_COUNT {
            errors.push(format!("[ringtone.{}] needs exactly {} notes", name, NOTE_COUNT));
        }
        for note in notes {
            let ok = match note {
                toml::Value::Integer(hz) => (0..=i64::from(u16::MAX)).contains(hz),
                toml::Value::String(tone) => tones.contains(tone),
                _ => false,
            };
            if !ok {
                errors.push(format!("[ringtone.{}] bad note {}", name, note));
            }
        }
    }

    indices.sort_unstable();
    if indices.iter().enumerate().any(|(expected, &i)| i != expected) {
        errors.push("Ringtone indices must count up from 0 without gaps".into());
    }
    ringtones.len()
}

fn validate_alert(config: &toml::Value, ringtones: usize, errors: &mut Vec<String>) {
    let Some(startup) = config.get("alert").and_then(|a| a.get("startup_ringtone")) else {
        return;
    };
    match startup {
        toml::Value::Boolean(false) => {}
        toml::Value::Integer(i) if *i >= 0 && (*i as usize) < ringtones => {}
        other => errors.push(format!(
            "[alert] startup_ringtone {} is not a ringtone index or false",
            other
        )),
    }
}

fn validate_recipients(config: &toml::Value, ringtones: usize, errors: &mut Vec<String>) {
    let Some(recipients) = config.get("recipient").and_then(|r| r.as_table()) else {
        return;
    };

    if recipients.len() > MAX_RECIPIENTS {
        errors.push(format!("At most {} recipients are supported", MAX_RECIPIENTS));
    }

    for (label, recipient) in recipients {
        if label.len() > MAX_LABEL_LEN {
            errors.push(format!(
                "[recipient.{}] label longer than {} bytes",
                label, MAX_LABEL_LEN
            ));
        }
        match recipient.get("address").and_then(|a| a.as_integer()) {
            Some(address) if (0..=i64::from(u32::MAX)).contains(&address) => {}
            Some(_) => errors.push(format!("[recipient.{}] address out of range", label)),
            None => errors.push(format!("[recipient.{}] missing 'address'", label)),
        }
        if let Some(ringtone) = recipient.get("ringtone") {
            match ringtone.as_integer() {
                Some(i) if i >= 0 && (i as usize) < ringtones => {}
                _ => errors.push(format!(
                    "[recipient.{}] references unknown ringtone {}",
                    label, ringtone
                )),
            }
        }
    }
}
