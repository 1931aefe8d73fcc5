// src/timecode.rs

//! Frame number <-> millisecond conversion.
//!
//! Frame numbering is 1-based: frame 1 maps to time 0. Both directions
//! round half away from zero (`f64::round`), so a frame survives a
//! round trip through milliseconds within ±1 frame.

/// Returns the time position in milliseconds for the given frame number.
pub fn frame_to_ms(frame: f64, fps: f64, fps_base: f64) -> i64 {
    ((frame - 1.0) / fps * fps_base * 1000.0).round() as i64
}

/// Returns the frame number for the given time position in milliseconds.
pub fn ms_to_frame(ms: i64, fps: f64, fps_base: f64) -> f64 {
    (ms as f64 / 1000.0 / fps_base * fps + 1.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_one_is_time_zero() {
        assert_eq!(frame_to_ms(1.0, 25.0, 1.0), 0);
        assert_eq!(ms_to_frame(0, 25.0, 1.0), 1.0);
    }

    #[test]
    fn frame_conversion_25fps() {
        // One second of 25fps footage ends on frame 26.
        assert_eq!(frame_to_ms(26.0, 25.0, 1.0), 1000);
        assert_eq!(ms_to_frame(1000, 25.0, 1.0), 26.0);
        assert_eq!(frame_to_ms(13.0, 25.0, 1.0), 480);
    }

    #[test]
    fn ntsc_fps_base() {
        // 23.976 fps is expressed as fps=24, fps_base=1.001.
        let ms = frame_to_ms(24.0, 24.0, 1.001);
        assert_eq!(ms, 959);
        assert_eq!(ms_to_frame(ms, 24.0, 1.001), 24.0);
    }

    #[test]
    fn round_trip_within_one_frame() {
        for fps in [24.0, 25.0, 30.0, 60.0] {
            for frame in 1..2000 {
                let back = ms_to_frame(frame_to_ms(frame as f64, fps, 1.0), fps, 1.0);
                assert!(
                    (back - frame as f64).abs() <= 1.0,
                    "fps {} frame {} came back as {}",
                    fps,
                    frame,
                    back
                );
            }
        }
    }
}
