//! ALSA `amixer` backend.
//!
//! Reads the first playback channel line, e.g.
//! `  Front Left: Playback 40000 [61%] [-12.00dB] [on]`.

use super::{Backend, find_percent, level_from_str};
use crate::error::{Result, VolumeError};
use crate::exec::Invocation;

#[derive(Debug, Clone, Copy, Default)]
pub struct Amixer;

impl Backend for Amixer {
    const NAME: &'static str = "amixer";
    const DEFAULT_DEVICE: &'static str = "Master";
    const ENV: &'static [(&'static str, &'static str)] = &[("LANG", "C"), ("LC_ALL", "C")];

    fn get_volume_cmd(&self, device: &str) -> Invocation {
        Invocation::new("amixer", ["get", device])
    }

    fn set_volume_cmd(&self, level: u8, device: &str) -> Invocation {
        Invocation::new("amixer", ["set".to_string(), device.to_string(), format!("{level}%")])
    }

    fn increase_volume_cmd(&self, delta: i32, device: &str) -> Invocation {
        let sign = if delta < 0 { '-' } else { '+' };
        let step = format!("{}%{sign}", delta.unsigned_abs());
        Invocation::new("amixer", ["set".to_string(), device.to_string(), step])
    }

    fn get_muted_cmd(&self, device: &str) -> Invocation {
        Invocation::new("amixer", ["get", device])
    }

    fn mute_cmd(&self, device: &str) -> Invocation {
        Invocation::new("amixer", ["set", device, "mute"])
    }

    fn unmute_cmd(&self, device: &str) -> Invocation {
        Invocation::new("amixer", ["set", device, "unmute"])
    }

    fn parse_volume(&self, output: &str) -> Result<u8> {
        parse_volume(output)
    }

    fn parse_muted(&self, output: &str) -> Result<bool> {
        parse_muted(output)
    }
}

fn playback_lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .lines()
        .map(|l| l.trim_start())
        .filter(|l| l.contains("Playback"))
}

pub fn parse_volume(output: &str) -> Result<u8> {
    // Only channel lines carry a percentage; "Limits: Playback 0 - 87" does not.
    let raw = playback_lines(output)
        .filter(|l| l.contains('%'))
        .find_map(find_percent)
        .ok_or_else(|| VolumeError::Parse("no volume found in amixer output".into()))?;
    level_from_str(raw)
}

/// Switch-only controls have no percentage, so any `Playback` line with a
/// switch token counts.
pub fn parse_muted(output: &str) -> Result<bool> {
    for line in playback_lines(output) {
        if line.contains("[off]") {
            return Ok(true);
        }
        if line.contains("[on]") {
            return Ok(false);
        }
    }
    Err(VolumeError::Parse(
        "no mute state found in amixer output".into(),
    ))
}
