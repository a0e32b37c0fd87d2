//! `get` / `set` / `up` / `down` subcommands — output volume.

use super::{Backend, CommandRunner, Mixer, Result, VolumeJson, print_json};

pub(super) fn cmd_get<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    device: &str,
    json: bool,
) -> Result<()> {
    let volume = mixer.get_volume(device)?;
    if json {
        return print_json(&VolumeJson {
            device: device.to_string(),
            volume,
        });
    }
    println!("{volume}");
    Ok(())
}

pub(super) fn cmd_set<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    level: i32,
    device: &str,
) -> Result<()> {
    mixer.set_volume(level, device)?;
    println!("Volume: {level}%");
    Ok(())
}

/// Relative change. The tool clamps at 0 and 100, so the printed delta is
/// what was asked for, not necessarily what happened.
pub(super) fn cmd_change<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    delta: i32,
    device: &str,
) -> Result<()> {
    mixer.increase_volume(delta, device)?;
    println!("Volume: {delta:+}%");
    Ok(())
}
