//! Startup settings consumed once by the player.
//!
//! A configuration layer (ini file, CLI flags, whatever the application
//! chooses) fills [`PlayerSettings`] and hands it to the player at startup;
//! the playback core never re-reads configuration mid-session.

use serde::{Deserialize, Serialize};

/// SID chip revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SidModel {
    /// Original 6581 as found in early C64 boards.
    #[default]
    Mos6581,
    /// Later 8580 revision.
    Csg8580,
}

/// Video/CPU clock the tune was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockModel {
    /// 50 Hz European machine.
    #[default]
    Pal,
    /// 60 Hz North-American machine.
    Ntsc,
}

/// Filter emulation settings.
///
/// The optional curve/range tunables are forwarded to the engine only when
/// present; absent means "use the engine's built-in default".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Master filter enable.
    pub enabled: bool,
    /// 6581 filter curve adjustment, -2.0..=2.0.
    pub curve_6581: Option<f64>,
    /// 6581 filter range adjustment, 0.0..=1.0.
    pub range_6581: Option<f64>,
    /// 8580 filter curve adjustment, 0.0..=1.0.
    pub curve_8580: Option<f64>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            enabled: true,
            curve_6581: None,
            range_6581: None,
            curve_8580: None,
        }
    }
}

/// Player defaults seeded from configuration at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Default play time in milliseconds; 0 plays until stopped.
    pub default_play_length_ms: u32,
    /// Default length of a file recording in milliseconds.
    pub default_record_length_ms: u32,
    /// Requested output sample rate in Hz.
    pub sample_rate: u32,
    /// Requested output bit depth.
    pub bit_depth: u8,
    /// Requested channel count; 0 follows the tune (stereo for multi-chip
    /// tunes, mono otherwise).
    pub channels: u8,
    /// Upper bound for the fast-forward multiplier.
    pub max_speed: u8,
    /// Filter emulation settings.
    pub filter: FilterSettings,
    /// SID model used when the tune does not force one.
    pub default_model: SidModel,
    /// Ignore the tune's model hint.
    pub force_model: bool,
    /// Clock model used when the tune does not force one.
    pub default_clock: ClockModel,
    /// Ignore the tune's clock hint.
    pub force_clock: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            default_play_length_ms: 0,
            default_record_length_ms: 4 * 60 * 1000,
            sample_rate: 48_000,
            bit_depth: 16,
            channels: 0,
            max_speed: 32,
            filter: FilterSettings::default(),
            default_model: SidModel::default(),
            force_model: false,
            default_clock: ClockModel::default(),
            force_clock: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = PlayerSettings::default();
        assert_eq!(settings.sample_rate, 48_000);
        assert_eq!(settings.bit_depth, 16);
        assert_eq!(settings.channels, 0, "channel count should follow the tune by default");
        assert_eq!(settings.default_play_length_ms, 0, "play time should be unbounded by default");
        assert!(settings.default_record_length_ms > 0, "recordings must have a bounded default length");
        assert!(settings.filter.enabled);
    }
}
