//! Platform command strategies — which tool to run, with which arguments,
//! and how to read what it prints.
//!
//! Each [`Backend`] covers the full operation set for one tool family.
//! Exactly one of them is the [`NativeBackend`] of a build; the others are
//! still compiled so their command templates and parsers can be tested on
//! any host.

pub mod amixer;
pub mod osascript;
pub mod pactl;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, VolumeError};
use crate::exec::Invocation;

pub use amixer::Amixer;
pub use osascript::Osascript;
pub use pactl::Pactl;

/// macOS: AppleScript via `osascript`.
#[cfg(target_os = "macos")]
pub type NativeBackend = Osascript;

/// Linux and other unix: `pactl` when built with the `pulse` feature.
#[cfg(all(unix, not(target_os = "macos"), feature = "pulse"))]
pub type NativeBackend = Pactl;

/// Linux and other unix: ALSA's `amixer`.
#[cfg(all(unix, not(target_os = "macos"), not(feature = "pulse")))]
pub type NativeBackend = Amixer;

/// Command construction and output parsing for one mixer tool family.
///
/// Every `*_cmd` method is a pure function of its arguments and returns a
/// freshly built [`Invocation`] without environment; the caller applies
/// [`Backend::ENV`] and any extra overlay.
pub trait Backend {
    /// Short name shown in status output.
    const NAME: &'static str;
    /// Device reference used when the caller does not name one.
    const DEFAULT_DEVICE: &'static str;
    /// Variables every invocation of this backend needs.
    const ENV: &'static [(&'static str, &'static str)];

    fn get_volume_cmd(&self, device: &str) -> Invocation;
    fn set_volume_cmd(&self, level: u8, device: &str) -> Invocation;
    /// `delta` may be negative. No clamping; the tool decides what happens
    /// past either end of the range.
    fn increase_volume_cmd(&self, delta: i32, device: &str) -> Invocation;
    fn get_muted_cmd(&self, device: &str) -> Invocation;
    fn mute_cmd(&self, device: &str) -> Invocation;
    fn unmute_cmd(&self, device: &str) -> Invocation;

    fn parse_volume(&self, output: &str) -> Result<u8>;
    fn parse_muted(&self, output: &str) -> Result<bool>;

    /// Mute or unmute the sidetone (mic monitoring) control of a sound card.
    fn sidetone_cmd(&self, input_device: &str, card: &str, mute: bool) -> Invocation {
        let state = if mute { "mute" } else { "unmute" };
        Invocation::new("amixer", ["-c", card, "set", input_device, state])
    }

    /// Mute or unmute a single PulseAudio sink input (one application's stream).
    fn pulse_mute_cmd(&self, sink_id: &str, mute: bool) -> Invocation {
        let state = if mute { "true" } else { "false" };
        Invocation::new("pacmd", ["set-sink-input-mute", sink_id, state])
    }
}

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("percent pattern is valid"));

/// First `N%` token in `line`, if any.
pub(crate) fn find_percent(line: &str) -> Option<&str> {
    PERCENT
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Convert an extracted number to a volume level, rejecting anything
/// outside 0-100.
pub(crate) fn level_from_str(raw: &str) -> Result<u8> {
    let value: u64 = raw
        .parse()
        .map_err(|_| VolumeError::Parse(format!("not a volume level: {raw:?}")))?;
    if value > 100 {
        return Err(VolumeError::Parse(format!(
            "volume {value} is outside 0-100"
        )));
    }
    Ok(value as u8)
}
