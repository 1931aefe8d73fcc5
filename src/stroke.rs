// src/stroke.rs

//! Stroke extrapolation.
//!
//! A stroke is one full motion cycle described by the last three keyframes
//! on a track (e.g. down-middle-up). It is derived on demand, normalized so
//! its earliest sample sits at relative frame 0, and can then be replayed
//! once or tiled across a time span to continue a repeating pattern.

use crate::track::{Keyframe, KeyframeTrack};

/// A normalized 3-point motion cycle. The first point is always at
/// relative frame 0; the remaining points carry their frame deltas from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Keyframe>,
}

impl Stroke {
    pub fn points(&self) -> &[Keyframe] {
        &self.points
    }

    /// Relative frame offset of the stroke's last point; the distance the
    /// cursor advances per repetition when filling.
    fn span(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.frame)
    }
}

/// Derives the stroke formed by the three most recent keyframes at or
/// before `since_frame`. Returns `None` when fewer than three exist.
pub fn last_stroke(track: &dyn KeyframeTrack, since_frame: f64) -> Option<Stroke> {
    let recent: Vec<Keyframe> = track
        .keyframes()
        .filter(|kf| kf.frame <= since_frame)
        .collect();
    if recent.len() < 3 {
        return None;
    }

    let window = &recent[recent.len() - 3..];
    let base = window[0].frame;
    let points = window
        .iter()
        .map(|kf| Keyframe {
            frame: kf.frame - base,
            value: kf.value,
        })
        .collect();
    Some(Stroke { points })
}

/// Replays `stroke` once starting at `at_frame`.
///
/// The stroke's first point is skipped when a keyframe already exists at
/// its exact frame, so the sample the stroke was derived from is never
/// overwritten; the remaining points are still applied. Returns the frame
/// of the stroke's last point (`at_frame` for an empty stroke).
pub fn repeat(track: &mut dyn KeyframeTrack, stroke: &Stroke, at_frame: f64) -> f64 {
    let mut last = at_frame;
    for (i, point) in stroke.points().iter().enumerate() {
        let frame = at_frame + point.frame;
        if i == 0 && track.at(frame).is_some() {
            last = frame;
            continue;
        }
        track.upsert(frame, point.value);
        last = frame;
    }
    last
}

/// Derives the last stroke before `current_frame` and replays it there.
/// Returns the frame of the last applied point, or `None` when no 3-point
/// stroke is available.
pub fn repeat_once(track: &mut dyn KeyframeTrack, current_frame: f64) -> Option<f64> {
    let stroke = last_stroke(track, current_frame)?;
    Some(repeat(track, &stroke, current_frame))
}

/// Tiles `stroke` from `start_frame` towards `end_frame`, advancing the
/// cursor by the stroke's own span per repetition.
///
/// Stops before a repetition whose projected end would reach or exceed
/// `end_frame`: partial strokes are never inserted, which can leave a gap
/// of up to one stroke span near the boundary. Returns the final cursor
/// frame (always <= `end_frame`), or `None` for a stroke that cannot
/// advance.
pub fn fill(
    track: &mut dyn KeyframeTrack,
    stroke: &Stroke,
    start_frame: f64,
    end_frame: f64,
) -> Option<f64> {
    let span = stroke.span();
    if stroke.points().len() < 3 || span <= 0.0 {
        return None;
    }

    let mut cursor = start_frame;
    while cursor + span < end_frame {
        cursor = repeat(track, stroke, cursor);
    }
    Some(cursor)
}

/// Continues the track's most recent repeating stroke up to
/// `current_frame`.
///
/// The fill starts from the newest existing keyframe at or before
/// `current_frame` and uses the stroke ending there as the template.
pub fn fill_to_frame(track: &mut dyn KeyframeTrack, current_frame: f64) -> Option<f64> {
    let start = track
        .keyframes()
        .filter(|kf| kf.frame <= current_frame)
        .last()?
        .frame;
    let stroke = last_stroke(track, start)?;
    fill(track, &stroke, start, current_frame)
}

/// Estimates how far (in percent of full travel) the actuator moves at
/// `speed_percent` within `duration_ms`.
///
/// Empirical curve fit calibrated against observed device behavior; the
/// constants are load-bearing and must not be re-derived.
pub fn estimated_travel_distance(speed_percent: i64, duration_ms: i64) -> i64 {
    if speed_percent <= 0 || duration_ms <= 0 {
        return 0;
    }
    let reference_time = (speed_percent as f64 / 25000.0).powf(-0.95);
    let distance = 90.0 - (90.0 * (reference_time - duration_ms as f64) / reference_time).floor();
    distance as i64
}
