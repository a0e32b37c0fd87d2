//! PulseAudio / PipeWire `pactl` backend.

use super::{Backend, find_percent, level_from_str};
use crate::error::{Result, VolumeError};
use crate::exec::Invocation;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pactl;

impl Backend for Pactl {
    const NAME: &'static str = "pactl";
    const DEFAULT_DEVICE: &'static str = "@DEFAULT_SINK@";
    const ENV: &'static [(&'static str, &'static str)] = &[("LANG", "C"), ("LC_ALL", "C")];

    fn get_volume_cmd(&self, device: &str) -> Invocation {
        Invocation::new("pactl", ["get-sink-volume", device])
    }

    fn set_volume_cmd(&self, level: u8, device: &str) -> Invocation {
        Invocation::new(
            "pactl",
            ["set-sink-volume".to_string(), device.to_string(), format!("{level}%")],
        )
    }

    fn increase_volume_cmd(&self, delta: i32, device: &str) -> Invocation {
        // `--` keeps a leading '-' from being read as an option
        let sign = if delta < 0 { '-' } else { '+' };
        Invocation::new(
            "pactl",
            [
                "--".to_string(),
                "set-sink-volume".to_string(),
                device.to_string(),
                format!("{sign}{}%", delta.unsigned_abs()),
            ],
        )
    }

    fn get_muted_cmd(&self, device: &str) -> Invocation {
        Invocation::new("pactl", ["get-sink-mute", device])
    }

    fn mute_cmd(&self, device: &str) -> Invocation {
        Invocation::new("pactl", ["set-sink-mute", device, "1"])
    }

    fn unmute_cmd(&self, device: &str) -> Invocation {
        Invocation::new("pactl", ["set-sink-mute", device, "0"])
    }

    fn parse_volume(&self, output: &str) -> Result<u8> {
        parse_volume(output)
    }

    fn parse_muted(&self, output: &str) -> Result<bool> {
        parse_muted(output)
    }
}

/// Reads the first `Volume:` line, e.g.
/// `Volume: front-left: 39321 /  60% / -13.31 dB,   front-right: ...`.
/// Also accepts the indented form printed by `pactl list sinks`.
pub fn parse_volume(output: &str) -> Result<u8> {
    let raw = output
        .lines()
        .map(|l| l.trim_start())
        .filter(|l| l.starts_with("Volume:"))
        .find_map(find_percent)
        .ok_or_else(|| VolumeError::Parse("no volume found in pactl output".into()))?;
    level_from_str(raw)
}

/// Reads the first `Mute: yes|no` line.
pub fn parse_muted(output: &str) -> Result<bool> {
    let value = output
        .lines()
        .map(|l| l.trim_start())
        .find_map(|l| l.strip_prefix("Mute:"))
        .map(str::trim)
        .ok_or_else(|| VolumeError::Parse("no mute state found in pactl output".into()))?;
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(VolumeError::Parse(format!(
            "unrecognized mute state in pactl output: {other:?}"
        ))),
    }
}
