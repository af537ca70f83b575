//! Shared contract between the SID playback front end and engine backends.
//!
//! This crate defines:
//! - [`SidEngine`] - the object-safe trait an emulation engine implements to
//!   feed the console player with rendered samples
//! - [`EngineConfig`] / [`EngineStatus`] / [`TuneInfo`] - the data exchanged
//!   across that boundary
//! - [`PlayerSettings`] - the plain settings struct a configuration layer
//!   hands to the player once at startup
//!
//! The player itself (scheduling, audio sinks, keyboard control) lives in the
//! `sidplay-replayer-cli` crate; the chip emulation lives behind the
//! [`SidEngine`] trait and is not part of this workspace.

// Error handling
mod error;
pub use error::{EngineError, Result};

mod engine;
pub use engine::{EngineConfig, EngineStatus, Playback, SidEngine, TuneInfo};

mod settings;
pub use settings::{ClockModel, FilterSettings, PlayerSettings, SidModel};
