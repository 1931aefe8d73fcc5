// src/lib.rs

//! # Launchsync
//!
//! Library for scripting and playing back haptic motion data ("funscripts")
//! in sync with video playback. Features include:
//!
//! - Funscript parsing, generation and timeline import/export
//! - Stroke extrapolation for scripting repeating motion patterns
//! - A client for the launchcontrol device HTTP protocol
//! - Player transport event synchronization with resync detection
//!
//! ## Architecture
//!
//! The crate is split into several modules:
//!
//! - `timecode`: frame number <-> millisecond conversion
//! - `track`: keyframe track abstraction over the host timeline
//! - `funscript`: the funscript data model and codec
//! - `stroke`: stroke extraction, repeat and fill
//! - `formats`: supported script format registry and sibling file lookup
//! - `device`: stateful HTTP client for the actuator-control device
//! - `sync`: playback state machine mapping player events to device commands

pub mod device;
pub mod error;
pub mod formats;
pub mod funscript;
pub mod stroke;
pub mod sync;
pub mod timecode;
pub mod track;

#[cfg(test)]
pub(crate) mod testutil;

pub use device::{DeviceClient, DeviceSettings};
pub use error::{DeviceError, ScriptError};
pub use funscript::{Action, Funscript};
pub use stroke::Stroke;
pub use sync::{MediaPlayer, PlaybackState, PlaybackSynchronizer};
pub use track::{Keyframe, KeyframeTrack, MemoryTrack};
