//! `status` subcommand — backend, device, volume and mute state.

use super::{Backend, CommandRunner, Mixer, Result, StatusOutput, kv, kv_width, print_json};

/// Query volume and mute state. Failures are logged and reported as
/// unavailable so that status always prints something.
fn collect_status<R: CommandRunner, B: Backend>(mixer: &Mixer<R, B>, device: &str) -> StatusOutput {
    let volume = mixer
        .get_volume(device)
        .map_err(|e| log::warn!("volume unavailable: {e}"))
        .ok();
    let muted = mixer
        .get_muted(device)
        .map_err(|e| log::warn!("mute state unavailable: {e}"))
        .ok();
    StatusOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: mixer.backend_name().to_string(),
        device: device.to_string(),
        volume,
        muted,
    }
}

fn print_status(status: &StatusOutput, json: bool) -> Result<()> {
    if json {
        return print_json(status);
    }

    let w = kv_width(&["Version:", "Backend:", "Device:", "Volume:", "Output:"]);
    kv("Version:", &status.version, w);
    kv("Backend:", &status.backend, w);
    let device = if status.device.is_empty() {
        "(default)"
    } else {
        status.device.as_str()
    };
    kv("Device:", device, w);
    match status.volume {
        Some(v) => kv("Volume:", format_args!("{v}%"), w),
        None => kv("Volume:", "not available", w),
    }
    match status.muted {
        Some(true) => kv("Output:", "MUTED", w),
        Some(false) => kv("Output:", "UNMUTED", w),
        None => kv("Output:", "not available", w),
    }
    Ok(())
}

pub(super) fn cmd_status<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    device: &str,
    json: bool,
) -> Result<()> {
    let status = collect_status(mixer, device);
    print_status(&status, json)
}
