//! CLI subcommands — volume, mute, sidetone and stream control.

mod config_cmd;
mod mute;
mod status;
mod volume;

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use serde::Serialize;

pub(super) use volumectl_lib::Mixer;
pub(super) use volumectl_lib::backend::Backend;
pub(super) use volumectl_lib::config::Config;
pub(super) use volumectl_lib::error::{Result, VolumeError};
pub(super) use volumectl_lib::exec::CommandRunner;

const PADDING: usize = 2;

/// Global flags shared by every subcommand.
pub struct Options {
    pub json: bool,
    pub device: Option<String>,
    pub config_path: Option<PathBuf>,
}

/// Compute alignment width for a command's key-value output.
pub(super) fn kv_width(keys: &[&str]) -> usize {
    keys.iter().map(|k| k.len()).max().map_or(0, |m| m + PADDING)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| VolumeError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{json_str}");
    Ok(())
}

pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    let (config, warnings) = match custom_path {
        Some(path) => Config::load_from(path),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    config
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct VolumeJson {
    pub device: String,
    pub volume: u8,
}

#[derive(Serialize)]
pub(super) struct MutedJson {
    pub device: String,
    pub muted: bool,
}

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub backend: String,
    pub device: String,
    pub volume: Option<u8>,
    pub muted: Option<bool>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    Mute,
    Unmute,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current output volume
    Get,

    /// Set the output volume (0-100)
    Set {
        #[arg(allow_negative_numbers = true)]
        level: i32,
    },

    /// Raise the output volume by DELTA percent (negative lowers it)
    Up {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Lower the output volume by DELTA percent
    Down {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Mute the output device
    Mute,

    /// Unmute the output device
    Unmute,

    /// Print whether the output device is muted
    Muted,

    /// Show backend, device, volume and mute state
    Status,

    /// Mute or unmute the sidetone (mic monitoring) of a sound card
    Sidetone {
        #[arg(value_enum)]
        action: Switch,
        /// Input control name (default: from config, "Sidetone")
        #[arg(long)]
        input: Option<String>,
        /// Sound card number (default: from config, "0")
        #[arg(long)]
        card: Option<String>,
    },

    /// Mute or unmute a single PulseAudio stream (sink input)
    Stream {
        #[arg(value_enum)]
        action: Switch,
        /// Sink input id, as listed by `pactl list sink-inputs`
        sink_id: String,
    },

    /// Show current configuration and file path
    Config {
        /// Write a default config file if none exists yet
        #[arg(long)]
        init: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Get => "get",
            Command::Set { .. } => "set",
            Command::Up { .. } => "up",
            Command::Down { .. } => "down",
            Command::Mute => "mute",
            Command::Unmute => "unmute",
            Command::Muted => "muted",
            Command::Status => "status",
            Command::Sidetone { .. } => "sidetone",
            Command::Stream { .. } => "stream",
            Command::Config { .. } => "config",
        }
    }

    fn supports_json(&self) -> bool {
        matches!(
            self,
            Command::Get | Command::Muted | Command::Status | Command::Config { .. }
        )
    }
}

pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    if opts.json && !cmd.supports_json() {
        log::warn!("--json is not supported for `{}` (ignored)", cmd.name());
    }

    let config = load_config(opts.config_path.as_deref());
    if let Command::Config { init } = cmd {
        if init {
            config_cmd::cmd_config_init(opts.config_path.as_deref())?;
        }
        return config_cmd::cmd_config(&config, opts.config_path.as_deref(), opts.json);
    }

    #[cfg(unix)]
    {
        let mixer = Mixer::native().with_env(config.env_pairs());
        dispatch(&mixer, cmd, &config, opts)
    }

    #[cfg(not(unix))]
    {
        Err(VolumeError::Unsupported(
            "no mixer tool is available for this operating system".into(),
        ))
    }
}

/// Run a mixer subcommand against any runner/backend pair.
pub(super) fn dispatch<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    cmd: Command,
    config: &Config,
    opts: &Options,
) -> Result<()> {
    let device = config.output_device(opts.device.as_deref(), mixer.default_device());
    match cmd {
        Command::Get => volume::cmd_get(mixer, device, opts.json),
        Command::Set { level } => volume::cmd_set(mixer, level, device),
        Command::Up { delta } => volume::cmd_change(mixer, delta, device),
        Command::Down { delta } => volume::cmd_change(mixer, delta.saturating_neg(), device),
        Command::Mute => mute::cmd_set_mute(mixer, Switch::Mute, device),
        Command::Unmute => mute::cmd_set_mute(mixer, Switch::Unmute, device),
        Command::Muted => mute::cmd_muted(mixer, device, opts.json),
        Command::Status => status::cmd_status(mixer, device, opts.json),
        Command::Sidetone {
            action,
            input,
            card,
        } => {
            let input = input.as_deref().unwrap_or(&config.input_device);
            let card = card.as_deref().unwrap_or(&config.card);
            mute::cmd_sidetone(mixer, action, input, card)
        }
        Command::Stream { action, sink_id } => mute::cmd_stream(mixer, action, &sink_id),
        Command::Config { .. } => unreachable!("`config` is handled before a mixer is built"),
    }
}



#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use volumectl_lib::backend::{Amixer, Pactl};
    use volumectl_lib::exec::mock::MockRunner;

    fn opts(device: Option<&str>) -> Options {
        Options {
            json: false,
            device: device.map(String::from),
            config_path: None,
        }
    }

    #[test]
    fn explicit_device_overrides_config() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Amixer);
        let config = Config {
            device: "PCM".into(),
            ..Config::default()
        };
        dispatch(&mixer, Command::Mute, &config, &opts(Some("Headphone"))).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["amixer", "set", "Headphone", "mute"]
        );
    }

    #[test]
    fn config_device_used_when_no_flag() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Amixer);
        let config = Config {
            device: "PCM".into(),
            ..Config::default()
        };
        dispatch(&mixer, Command::Set { level: 40 }, &config, &opts(None)).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["amixer", "set", "PCM", "40%"]
        );
    }

    #[test]
    fn backend_default_device_as_last_resort() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Pactl);
        dispatch(&mixer, Command::Unmute, &Config::default(), &opts(None)).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["pactl", "set-sink-mute", "@DEFAULT_SINK@", "0"]
        );
    }

    #[test]
    fn down_negates_delta() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Pactl);
        dispatch(&mixer, Command::Down { delta: 5 }, &Config::default(), &opts(None)).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["pactl", "--", "set-sink-volume", "@DEFAULT_SINK@", "-5%"]
        );
    }

    #[test]
    fn set_out_of_range_runs_nothing() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Amixer);
        let err = dispatch(&mixer, Command::Set { level: 150 }, &Config::default(), &opts(None))
            .unwrap_err();
        assert!(matches!(err, VolumeError::OutOfRange(150)));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn sidetone_uses_config_defaults() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Amixer);
        let config = Config {
            card: "2".into(),
            ..Config::default()
        };
        let cmd = Command::Sidetone {
            action: Switch::Mute,
            input: None,
            card: None,
        };
        dispatch(&mixer, cmd, &config, &opts(None)).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["amixer", "-c", "2", "set", "Sidetone", "mute"]
        );
    }

    #[test]
    fn sidetone_passes_named_card_through() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Amixer);
        let config = Config::parse("card = \"PCH\"").unwrap();
        let cmd = Command::Sidetone {
            action: Switch::Unmute,
            input: None,
            card: None,
        };
        dispatch(&mixer, cmd, &config, &opts(None)).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["amixer", "-c", "PCH", "set", "Sidetone", "unmute"]
        );
    }

    #[test]
    fn config_is_answered_without_a_mixer() {
        let dir = tempfile::tempdir().unwrap();
        let options = Options {
            json: true,
            device: None,
            config_path: Some(dir.path().join("config.toml")),
        };
        run(Command::Config { init: true }, &options).unwrap();
        assert!(dir.path().join("config.toml").exists());
    }

    #[test]
    fn stream_unmute() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Pactl);
        let cmd = Command::Stream {
            action: Switch::Unmute,
            sink_id: "12".into(),
        };
        dispatch(&mixer, cmd, &Config::default(), &opts(None)).unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["pacmd", "set-sink-input-mute", "12", "false"]
        );
    }
}
