//! Application configuration — TOML-based, platform-aware paths.
//!
//! Holds device *references* and environment variables only. Volume levels
//! are never stored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str = "# volumectl configuration\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output device reference. Empty = the backend's default
    /// (`Master` for amixer, `@DEFAULT_SINK@` for pactl).
    #[serde(default)]
    pub device: String,

    /// Input control used for sidetone mute. Default: "Sidetone".
    #[serde(default = "default_input_device")]
    pub input_device: String,

    /// Sound card number for sidetone mute. Default: "0".
    #[serde(default = "default_card")]
    pub card: String,

    /// Extra environment variables for every mixer invocation, e.g.
    /// `XDG_RUNTIME_DIR` or `PULSE_SERVER` when running outside the user's
    /// session. Overrides the backend's own variables.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_input_device() -> String {
    "Sidetone".into()
}

fn default_card() -> String {
    "0".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device: String::new(),
            input_device: default_input_device(),
            card: default_card(),
            env: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("volumectl"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Output device to use: `explicit` if given, else the configured one,
    /// else `fallback` (the backend default).
    pub fn output_device<'a>(&'a self, explicit: Option<&'a str>, fallback: &'a str) -> &'a str {
        match explicit {
            Some(d) => d,
            None if !self.device.trim().is_empty() => self.device.trim(),
            None => fallback,
        }
    }

    /// Environment overlay as an ordered list.
    pub fn env_pairs(&self) -> Vec<(String, String)> {
        self.env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> crate::error::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Device and card references pass through untouched; only env keys
    /// are checked.
    pub fn validate(&self) -> crate::error::Result<()> {
        if let Some(key) = self.env.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(crate::VolumeError::Config(format!(
                "invalid environment variable name {key:?}"
            )));
        }
        Ok(())
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }
}
