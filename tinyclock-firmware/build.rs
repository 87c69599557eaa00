//! Build script for tinyclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds clock.toml for the start time, chime        ║\n\
            ║  window and pin assignments. Create one in tinyclock-firmware.   ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_start(&config, &mut errors);
    validate_animation(&config, &mut errors);
    validate_hands(&config, &mut errors);
    validate_leds(&config, &mut errors);
    report("Invalid clock configuration", &errors);

    println!("cargo:warning=clock.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with every collected error in one box
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Check an optional integer key against an inclusive range
fn check_range(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_start(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(start) = section(config, "start") else {
        return;
    };

    check_range(start, "start", "year", 2000, 2099, errors);
    check_range(start, "start", "month", 1, 12, errors);
    check_range(start, "start", "day", 1, 31, errors);
    check_range(start, "start", "hour", 0, 23, errors);
    check_range(start, "start", "minute", 0, 59, errors);
    check_range(start, "start", "second", 0, 59, errors);

    match start.get("time") {
        None => {}
        Some(toml::Value::String(time)) => {
            let valid = time
                .split_once(':')
                .and_then(|(h, m)| Some((h.parse::<u8>().ok()?, m.parse::<u8>().ok()?)))
                .is_some_and(|(h, m)| h <= 23 && m <= 59);
            if !valid {
                errors.push(format!("[start] time '{}' must be \"HH:MM\"", time));
            }
        }
        Some(_) => errors.push("[start] time must be a string".to_string()),
    }
}

fn validate_animation(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(animation) = section(config, "animation") else {
        return;
    };

    if let Some(enabled) = animation.get("enabled") {
        if !enabled.is_bool() {
            errors.push("[animation] enabled must be true or false".to_string());
        }
    }
    check_range(animation, "animation", "start_hour", 0, 23, errors);
    check_range(animation, "animation", "end_hour", 0, 23, errors);

    if let (Some(start), Some(end)) = (
        animation.get("start_hour").and_then(|v| v.as_integer()),
        animation.get("end_hour").and_then(|v| v.as_integer()),
    ) {
        if start > end {
            // Accepted, but the window does not wrap past midnight
            println!(
                "cargo:warning=[animation] start_hour {} is after end_hour {}, the chime will never play",
                start, end
            );
        }
    }
}

fn validate_hands(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(hands) = section(config, "hands") else {
        return;
    };

    let mut firsts = Vec::new();
    for key in ["hour_pin", "minute_pin"] {
        match hands.get(key) {
            None => {}
            Some(toml::Value::String(pin)) => {
                match pin.strip_prefix("gpio").and_then(|n| n.parse::<u8>().ok()) {
                    // Four consecutive pins, GPIO 29 is the last
                    Some(n) if n > 26 => errors.push(format!(
                        "[hands] {} '{}' must be gpio0-gpio26",
                        key, pin
                    )),
                    Some(n) if (n..n + 4).contains(&14) => errors.push(format!(
                        "[hands] {} block overlaps gpio14, reserved for the LED ring",
                        key
                    )),
                    Some(n) => firsts.push(n),
                    None => errors.push(format!(
                        "[hands] {} '{}' must be gpio0-gpio26",
                        key, pin
                    )),
                }
            }
            Some(_) => errors.push(format!("[hands] {} must be a string", key)),
        }
    }

    if let [a, b] = firsts[..] {
        if a.abs_diff(b) < 4 {
            errors.push("[hands] hour and minute pin blocks overlap".to_string());
        }
    }
}

fn validate_leds(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(leds) = section(config, "leds") else {
        return;
    };

    check_range(leds, "leds", "pixel_count", 1, 64, errors);
}
