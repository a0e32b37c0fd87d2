//! Volume control façade — validate, build the command, run it, read the
//! result.
//!
//! [`Mixer`] holds no audio state: every call asks the tool again, so two
//! calls never share a cached value. Calls are blocking and unsynchronized;
//! callers that need ordering between calls must serialize them.

use crate::backend::Backend;
use crate::error::{Result, VolumeError};
use crate::exec::{CommandRunner, Invocation};

/// Lowest accepted volume level.
pub const MIN_VOLUME: i32 = 0;
/// Highest accepted volume level.
pub const MAX_VOLUME: i32 = 100;

/// Validate a caller-supplied volume level.
pub fn check_level(level: i32) -> Result<u8> {
    if !(MIN_VOLUME..=MAX_VOLUME).contains(&level) {
        return Err(VolumeError::OutOfRange(level));
    }
    Ok(level as u8)
}

pub struct Mixer<R, B> {
    runner: R,
    backend: B,
    /// Extra variables applied after the backend's own (e.g. from config).
    extra_env: Vec<(String, String)>,
}

#[cfg(unix)]
impl Mixer<crate::exec::SystemRunner, crate::backend::NativeBackend> {
    /// Mixer for the running platform, spawning real processes.
    pub fn native() -> Self {
        Mixer::with_backend(
            crate::exec::SystemRunner,
            crate::backend::NativeBackend::default(),
        )
    }
}

impl<R: CommandRunner, B: Backend> Mixer<R, B> {
    pub fn with_backend(runner: R, backend: B) -> Self {
        Mixer {
            runner,
            backend,
            extra_env: Vec::new(),
        }
    }

    /// Add environment variables to every invocation. They override the
    /// backend's own variables on key collision.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn backend_name(&self) -> &'static str {
        B::NAME
    }

    pub fn default_device(&self) -> &'static str {
        B::DEFAULT_DEVICE
    }

    fn run(&self, invocation: Invocation) -> Result<Vec<u8>> {
        let invocation = invocation
            .with_env(B::ENV.iter().copied())
            .with_env(self.extra_env.iter().cloned());
        self.runner.run(&invocation)
    }

    fn run_text(&self, invocation: Invocation) -> Result<String> {
        let out = self.run(invocation)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Current output volume, 0-100.
    pub fn get_volume(&self, device: &str) -> Result<u8> {
        let out = self.run_text(self.backend.get_volume_cmd(device))?;
        self.backend.parse_volume(&out)
    }

    /// Set the output volume. Levels outside 0-100 are rejected without
    /// running anything.
    pub fn set_volume(&self, level: i32, device: &str) -> Result<()> {
        let level = check_level(level)?;
        self.run(self.backend.set_volume_cmd(level, device))?;
        Ok(())
    }

    /// Raise (positive `delta`) or lower (negative `delta`) the volume.
    /// The tool clamps at either end.
    pub fn increase_volume(&self, delta: i32, device: &str) -> Result<()> {
        self.run(self.backend.increase_volume_cmd(delta, device))?;
        Ok(())
    }

    pub fn get_muted(&self, device: &str) -> Result<bool> {
        let out = self.run_text(self.backend.get_muted_cmd(device))?;
        self.backend.parse_muted(&out)
    }

    pub fn mute(&self, device: &str) -> Result<()> {
        self.run(self.backend.mute_cmd(device))?;
        Ok(())
    }

    pub fn unmute(&self, device: &str) -> Result<()> {
        self.run(self.backend.unmute_cmd(device))?;
        Ok(())
    }

    /// Mute the mic monitoring path of `card`. Independent of output mute.
    pub fn sidetone_mute(&self, input_device: &str, card: &str) -> Result<()> {
        self.run(self.backend.sidetone_cmd(input_device, card, true))?;
        Ok(())
    }

    pub fn sidetone_unmute(&self, input_device: &str, card: &str) -> Result<()> {
        self.run(self.backend.sidetone_cmd(input_device, card, false))?;
        Ok(())
    }

    /// Mute one application stream (a PulseAudio sink input) rather than
    /// the whole device.
    pub fn pulse_mute(&self, sink_id: &str) -> Result<()> {
        self.run(self.backend.pulse_mute_cmd(sink_id, true))?;
        Ok(())
    }

    pub fn pulse_unmute(&self, sink_id: &str) -> Result<()> {
        self.run(self.backend.pulse_mute_cmd(sink_id, false))?;
        Ok(())
    }
}
