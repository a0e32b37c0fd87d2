//! `mute` / `unmute` / `muted` / `sidetone` / `stream` subcommands.

use super::{Backend, CommandRunner, Mixer, MutedJson, Result, Switch, print_json};

fn label(muted: bool) -> &'static str {
    if muted { "MUTED" } else { "UNMUTED" }
}

pub(super) fn cmd_set_mute<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    action: Switch,
    device: &str,
) -> Result<()> {
    let target = action == Switch::Mute;
    if target {
        mixer.mute(device)?;
    } else {
        mixer.unmute(device)?;
    }
    println!("Output: {}", label(target));
    Ok(())
}

pub(super) fn cmd_muted<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    device: &str,
    json: bool,
) -> Result<()> {
    let muted = mixer.get_muted(device)?;
    if json {
        return print_json(&MutedJson {
            device: device.to_string(),
            muted,
        });
    }
    println!("Output: {}", label(muted));
    Ok(())
}

pub(super) fn cmd_sidetone<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    action: Switch,
    input: &str,
    card: &str,
) -> Result<()> {
    match action {
        Switch::Mute => mixer.sidetone_mute(input, card)?,
        Switch::Unmute => mixer.sidetone_unmute(input, card)?,
    }
    println!(
        "Sidetone ({input}, card {card}): {}",
        label(action == Switch::Mute)
    );
    Ok(())
}

pub(super) fn cmd_stream<R: CommandRunner, B: Backend>(
    mixer: &Mixer<R, B>,
    action: Switch,
    sink_id: &str,
) -> Result<()> {
    match action {
        Switch::Mute => mixer.pulse_mute(sink_id)?,
        Switch::Unmute => mixer.pulse_unmute(sink_id)?,
    }
    println!("Stream {sink_id}: {}", label(action == Switch::Mute));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use volumectl_lib::VolumeError;
    use volumectl_lib::backend::Pactl;
    use volumectl_lib::exec::mock::MockRunner;

    #[test]
    fn muted_reads_state() {
        let runner = MockRunner::with_output("Mute: yes\n");
        let mixer = Mixer::with_backend(&runner, Pactl);
        assert!(cmd_muted(&mixer, "@DEFAULT_SINK@", false).is_ok());
        assert!(cmd_muted(&mixer, "@DEFAULT_SINK@", true).is_ok());
    }

    #[test]
    fn set_mute_failure_is_reported() {
        let runner = MockRunner::failing(1, "Failure: No such entity");
        let mixer = Mixer::with_backend(&runner, Pactl);
        let err = cmd_set_mute(&mixer, Switch::Mute, "bogus").unwrap_err();
        assert!(matches!(err, VolumeError::Execution { .. }));
        assert!(err.to_string().contains("pactl set-sink-mute bogus 1"));
    }

    #[test]
    fn stream_mute_targets_sink_input() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Pactl);
        cmd_stream(&mixer, Switch::Mute, "7").unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["pacmd", "set-sink-input-mute", "7", "true"]
        );
    }

    #[test]
    fn sidetone_unmute() {
        let runner = MockRunner::new();
        let mixer = Mixer::with_backend(&runner, Pactl);
        cmd_sidetone(&mixer, Switch::Unmute, "Sidetone", "1").unwrap();
        assert_eq!(
            runner.last_tokens().unwrap(),
            vec!["amixer", "-c", "1", "set", "Sidetone", "unmute"]
        );
    }
}
