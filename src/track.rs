// src/track.rs

//! Keyframe track abstraction.
//!
//! Position keyframes live in the host timeline/animation system, which
//! keeps its own undo history and UI. The core only needs a narrow
//! capability interface: chronological iteration, exact-frame lookup and
//! insert-or-update. It never assumes exclusive ownership of the track.

/// A single (time, position) sample on a track.
///
/// `frame` is a real-valued 1-based time index as used by animation
/// timelines; `value` is an actuator position in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: f64,
    pub value: u8,
}

/// Capability interface over the host timeline's keyframe storage.
pub trait KeyframeTrack {
    /// Iterates all keyframes in chronological order.
    fn keyframes(&self) -> Box<dyn Iterator<Item = Keyframe> + '_>;

    /// Inserts a keyframe, replacing any existing keyframe at exactly
    /// `frame`.
    fn upsert(&mut self, frame: f64, value: u8);

    /// Looks up the keyframe at exactly `frame`, if any.
    fn at(&self, frame: f64) -> Option<Keyframe> {
        self.keyframes().find(|kf| kf.frame == frame)
    }
}

/// In-memory `KeyframeTrack` kept sorted by frame.
#[derive(Debug, Clone, Default)]
pub struct MemoryTrack {
    keyframes: Vec<Keyframe>,
}

impl MemoryTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

impl KeyframeTrack for MemoryTrack {
    fn keyframes(&self) -> Box<dyn Iterator<Item = Keyframe> + '_> {
        Box::new(self.keyframes.iter().copied())
    }

    fn upsert(&mut self, frame: f64, value: u8) {
        match self
            .keyframes
            .binary_search_by(|kf| kf.frame.total_cmp(&frame))
        {
            Ok(i) => self.keyframes[i].value = value,
            Err(i) => self.keyframes.insert(i, Keyframe { frame, value }),
        }
    }

    fn at(&self, frame: f64) -> Option<Keyframe> {
        self.keyframes
            .binary_search_by(|kf| kf.frame.total_cmp(&frame))
            .ok()
            .map(|i| self.keyframes[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_chronological_order() {
        let mut track = MemoryTrack::new();
        track.upsert(25.0, 0);
        track.upsert(1.0, 0);
        track.upsert(13.0, 50);

        let frames: Vec<f64> = track.keyframes().map(|kf| kf.frame).collect();
        assert_eq!(frames, vec![1.0, 13.0, 25.0]);
    }

    #[test]
    fn upsert_replaces_existing_frame() {
        let mut track = MemoryTrack::new();
        track.upsert(10.0, 40);
        track.upsert(10.0, 90);

        assert_eq!(track.len(), 1);
        assert_eq!(track.at(10.0), Some(Keyframe { frame: 10.0, value: 90 }));
    }

    #[test]
    fn at_misses_between_frames() {
        let mut track = MemoryTrack::new();
        track.upsert(10.0, 40);
        assert_eq!(track.at(10.5), None);
    }
}
