// src/funscript.rs

//! The funscript data model and codec.
//!
//! A funscript is a JSON document with timestamped position actions:
//!
//! ```json
//! {"version":"1.0","inverted":false,"range":100,
//!  "actions":[{"at":480,"pos":50},{"at":960,"pos":0}]}
//! ```
//!
//! Only `actions` is required on decode; the other fields default. Actions
//! are expected to be sorted by `at` but this is not enforced: decode
//! accepts unsorted input, and encode preserves the iteration order of the
//! source track.

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;
use crate::timecode;
use crate::track::KeyframeTrack;

pub const VERSION: &str = "1.0";
pub const RANGE: u8 = 100;

/// A single scripted movement: at time `at` (ms) move to position `pos`
/// (percent). Duplicate `at` values are not deduplicated by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub at: u64,
    pub pos: u8,
}

/// A complete haptic motion script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funscript {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default = "default_range")]
    pub range: u8,
    pub actions: Vec<Action>,
}

fn default_version() -> String {
    VERSION.to_string()
}

fn default_range() -> u8 {
    RANGE
}

impl Funscript {
    /// Parses funscript JSON.
    ///
    /// Fails with [`ScriptError::Format`] when the payload has no `actions`
    /// field or is not JSON at all. `version`, `range` and `inverted` are
    /// read if present but not validated.
    pub fn from_slice(bytes: &[u8]) -> Result<Funscript, ScriptError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes to funscript JSON.
    pub fn to_vec(&self) -> Result<Vec<u8>, ScriptError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Creates a funscript from every keyframe on `track`.
///
/// Positions are clamped into 0..=100. Keyframes whose converted time is
/// negative (authored before the timeline origin) are not exportable and
/// are dropped. `inverted` is stored verbatim as a playback hint for the
/// consuming device; positions themselves are not inverted here.
pub fn encode(track: &dyn KeyframeTrack, inverted: bool, fps: f64, fps_base: f64) -> Funscript {
    let mut actions = Vec::new();
    for kf in track.keyframes() {
        let at = timecode::frame_to_ms(kf.frame, fps, fps_base);
        if at < 0 {
            continue;
        }
        actions.push(Action {
            at: at as u64,
            pos: kf.value.min(100),
        });
    }
    Funscript {
        version: VERSION.to_string(),
        inverted,
        range: RANGE,
        actions,
    }
}

/// Upserts a keyframe on `track` for every action, shifted by
/// `frame_offset`.
///
/// Application follows the action sequence order, which is not necessarily
/// time-sorted; a later action landing on an identical frame overwrites an
/// earlier one.
pub fn apply_to_track(
    track: &mut dyn KeyframeTrack,
    actions: &[Action],
    frame_offset: f64,
    fps: f64,
    fps_base: f64,
) {
    for action in actions {
        let frame = timecode::ms_to_frame(action.at as i64, fps, fps_base) + frame_offset;
        track.upsert(frame, action.pos);
    }
}
