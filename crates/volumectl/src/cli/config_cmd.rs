//! `config` subcommand — show current configuration and file path.

use std::path::Path;

use super::{Config, ConfigOutput, Result, VolumeError, kv, kv_width, print_json};

/// Write a default config file to `custom_path` (or the platform path).
/// An existing file is left untouched.
pub(super) fn cmd_config_init(custom_path: Option<&Path>) -> Result<()> {
    let path = custom_path
        .map(|p| p.to_path_buf())
        .or_else(Config::path)
        .ok_or_else(|| VolumeError::Config("no config directory on this platform".into()))?;
    if path.exists() {
        log::info!("config file already exists: {}", path.display());
        return Ok(());
    }
    Config::default()
        .save_to(&path)
        .map_err(|e| VolumeError::Config(format!("cannot write {}: {e}", path.display())))?;
    eprintln!("Wrote default config to {}", path.display());
    Ok(())
}

pub(super) fn cmd_config(config: &Config, custom_path: Option<&Path>, json: bool) -> Result<()> {
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());

    if json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config.clone(),
        });
    }

    // Human-readable output
    let w = kv_width(&["Config file:", "input_device:", "device:", "card:"]);

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    let device = if config.device.is_empty() {
        "(backend default)"
    } else {
        config.device.as_str()
    };
    kv("device:", device, w);
    kv("input_device:", &config.input_device, w);
    kv("card:", &config.card, w);
    if config.env.is_empty() {
        kv("env:", "(none)", w);
    } else {
        println!("env:");
        for (key, value) in &config.env {
            println!("  {key}={value}");
        }
    }
    Ok(())
}
