//! macOS backend via AppleScript. Always addresses the default output, so
//! device references are accepted and ignored.

use super::{Backend, level_from_str};
use crate::error::{Result, VolumeError};
use crate::exec::Invocation;

#[derive(Debug, Clone, Copy, Default)]
pub struct Osascript;

fn script(source: &str) -> Invocation {
    Invocation::new("osascript", ["-e", source])
}

impl Backend for Osascript {
    const NAME: &'static str = "osascript";
    const DEFAULT_DEVICE: &'static str = "";
    const ENV: &'static [(&'static str, &'static str)] = &[];

    fn get_volume_cmd(&self, _device: &str) -> Invocation {
        script("output volume of (get volume settings)")
    }

    fn set_volume_cmd(&self, level: u8, _device: &str) -> Invocation {
        script(&format!("set volume output volume {level}"))
    }

    fn increase_volume_cmd(&self, delta: i32, _device: &str) -> Invocation {
        script(&format!(
            "set volume output volume ((output volume of (get volume settings)) + {delta})"
        ))
    }

    fn get_muted_cmd(&self, _device: &str) -> Invocation {
        script("output muted of (get volume settings)")
    }

    fn mute_cmd(&self, _device: &str) -> Invocation {
        script("set volume output muted true")
    }

    fn unmute_cmd(&self, _device: &str) -> Invocation {
        script("set volume output muted false")
    }

    fn parse_volume(&self, output: &str) -> Result<u8> {
        parse_volume(output)
    }

    fn parse_muted(&self, output: &str) -> Result<bool> {
        parse_muted(output)
    }
}

pub fn parse_volume(output: &str) -> Result<u8> {
    let raw = output.trim();
    if raw.is_empty() {
        return Err(VolumeError::Parse("empty osascript output".into()));
    }
    level_from_str(raw)
}

pub fn parse_muted(output: &str) -> Result<bool> {
    match output.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        // "missing value" is what AppleScript prints for devices without a mute switch
        other => Err(VolumeError::Parse(format!(
            "unrecognized mute state in osascript output: {other:?}"
        ))),
    }
}
