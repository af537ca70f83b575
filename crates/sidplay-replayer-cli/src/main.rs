//! Interactive console player for SID tunes.
//!
//! Drives a sample-producing engine backend into one of several audio sinks
//! (device, WAV file, null) with live keyboard control: subtune seeking,
//! pause, fast-forward, per-voice muting, timed playback windows.

mod args;
mod audio;
mod control;
mod display;
mod player;
mod player_factory;

use anyhow::bail;
use args::CliArgs;
use player::{PlaybackState, Player};
use sidplay_common::PlayerSettings;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.show_help {
        CliArgs::print_help();
        if args.parse_error {
            bail!("invalid arguments");
        }
        return Ok(());
    }

    // Seed defaults, then apply the command-line overrides a config layer
    // would normally hand us.
    let mut settings = PlayerSettings::default();
    if let Some(rate) = args.sample_rate {
        settings.sample_rate = rate;
    }
    if let Some(channels) = args.channels {
        settings.channels = channels;
    }

    let engine = player_factory::create_engine(&settings);
    let quiet = args.quiet;
    let mut player = Player::new(engine, settings, args.to_options())?;

    let result = run(&mut player, quiet);
    player.close();
    result
}

/// The outer driver loop: open, cycle until a boundary intent, then either
/// reopen (Restart) or fall through to teardown.
fn run(player: &mut Player, quiet: u8) -> anyhow::Result<()> {
    loop {
        player.open()?;

        // Direct key access while cycling; dropped (and restored) around
        // every reopen so the goto prompt and track gaps behave.
        let raw_mode = if quiet < 3 {
            control::RawModeGuard::enable().ok()
        } else {
            None
        };

        while player.run_cycle() {}

        drop(raw_mode);

        match player.state() {
            PlaybackState::Restart => continue,
            PlaybackState::Error => bail!("playback aborted"),
            _ => return Ok(()),
        }
    }
}
