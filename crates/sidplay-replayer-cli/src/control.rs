//! Live keyboard control.
//!
//! Decodes raw-mode key events into discrete commands that the player applies
//! strictly between render cycles. The goto-track prompt is the one place
//! that blocks: raw decoding is suspended for the line read and restored
//! afterwards.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{BufRead, Write};
use std::time::Duration;

/// A discrete control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Seek to the next subtune (fast restart).
    NextTrack,
    /// Seek to the previous subtune (fast restart).
    PrevTrack,
    /// Jump to the first subtune.
    FirstTrack,
    /// Jump to the last subtune.
    LastTrack,
    /// Replay the current subtune from the start.
    Replay,
    /// Double the fast-forward multiplier.
    Faster,
    /// Halve the fast-forward multiplier.
    Slower,
    /// Back to normal speed.
    RestoreSpeed,
    /// Toggle pause.
    TogglePause,
    /// Prompt for a subtune number.
    GotoTrack,
    /// Toggle one of the nine voices (0-8 across three chips).
    ToggleVoice(u8),
    /// Toggle one chip's digi sample channel (0-2).
    ToggleSampleChannel(u8),
    /// Toggle filter emulation.
    ToggleFilter,
    /// Quit, discarding any further queued input.
    Quit,
}

/// Raw-mode guard for the play loop; restores cooked mode on drop.
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Switch the terminal into raw mode for direct key access.
    pub fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Map one key event to a command.
pub fn decode_key(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // Raw mode swallows the usual SIGINT; honor it as quit.
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Right => Some(Command::NextTrack),
        KeyCode::Left => Some(Command::PrevTrack),
        KeyCode::Home => Some(Command::FirstTrack),
        KeyCode::End => Some(Command::LastTrack),
        KeyCode::Up => Some(Command::Faster),
        KeyCode::Down => Some(Command::Slower),
        KeyCode::Backspace => Some(Command::RestoreSpeed),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            '+' | '=' => Some(Command::Faster),
            '-' => Some(Command::Slower),
            ' ' | 'p' => Some(Command::TogglePause),
            'r' => Some(Command::Replay),
            'g' => Some(Command::GotoTrack),
            'f' => Some(Command::ToggleFilter),
            'q' => Some(Command::Quit),
            '1'..='9' => Some(Command::ToggleVoice(c as u8 - b'1')),
            'x' => Some(Command::ToggleSampleChannel(0)),
            'c' => Some(Command::ToggleSampleChannel(1)),
            'v' => Some(Command::ToggleSampleChannel(2)),
            _ => None,
        },
        _ => None,
    }
}

/// Drain pending key events into commands without blocking.
///
/// A quit command short-circuits: everything still queued behind it is
/// discarded.
pub fn poll_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    while event::poll(Duration::ZERO).unwrap_or(false) {
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                if let Some(command) = decode_key(&key) {
                    if command == Command::Quit {
                        return vec![Command::Quit];
                    }
                    commands.push(command);
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }
    commands
}

/// Prompt for a subtune number on the terminal.
///
/// Raw decoding is disabled for the duration of the line read. Returns None
/// when the input is empty or not a number.
pub fn read_track_number() -> Option<u16> {
    let _ = terminal::disable_raw_mode();
    eprint!("\rJumping to subtune: ");
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line);

    let _ = terminal::enable_raw_mode();

    match read {
        Ok(0) | Err(_) => None,
        Ok(_) => line.trim().parse().ok(),
    }
}
