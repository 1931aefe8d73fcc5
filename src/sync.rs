// src/sync.rs

//! Playback synchronization state machine.
//!
//! The host media player delivers transport events on its own thread; each
//! handler completes its device call before returning, so no concurrent
//! requests are ever in flight. Device faults never escape a handler:
//! haptic sync is best-effort and must not interrupt video playback.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use log::{debug, error, warn};

use crate::device::{DeviceClient, DeviceSettings};
use crate::error::DeviceError;
use crate::formats;

/// Capability interface over the host media player.
pub trait MediaPlayer {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Path of the media file currently loaded, if any.
    fn playing_file(&self) -> Option<PathBuf>;
}

/// Transport state mirrored from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Number of times the resync probe samples the player after a start
/// event before giving up.
const RESYNC_PROBES: u32 = 3;

const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_secs(1);

/// Maps player transport events to device commands.
pub struct PlaybackSynchronizer<P: MediaPlayer> {
    player: P,
    client: DeviceClient,
    state: PlaybackState,
    wait_interval: Duration,
}

impl<P: MediaPlayer> PlaybackSynchronizer<P> {
    pub fn new(player: P, settings: DeviceSettings) -> Self {
        PlaybackSynchronizer {
            player,
            client: DeviceClient::new(settings),
            state: PlaybackState::Idle,
            wait_interval: DEFAULT_WAIT_INTERVAL,
        }
    }

    /// Overrides the wait interval used by the resync probe and by
    /// skip-to-current-time.
    pub fn with_wait_interval(mut self, interval: Duration) -> Self {
        self.wait_interval = interval;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Replaces the device session wholesale, as on a settings change.
    ///
    /// An operation racing the reload completes against the old or new
    /// session; both are harmless since the protocol operations are
    /// idempotent at the device.
    pub fn reload_settings(&mut self, settings: DeviceSettings) {
        self.client = DeviceClient::new(settings);
    }

    /// Playback started: locate the sibling script for the playing file,
    /// send it to the device, then watch for a mid-file resume.
    pub fn on_playback_started(&mut self) {
        self.state = PlaybackState::Playing;
        let Some(file) = self.player.playing_file() else {
            return;
        };
        match formats::read_script(&file) {
            Ok(Some((data, media_type))) => match self.client.play(&data, media_type) {
                Ok(()) => self.resync_probe(),
                Err(err) => self.swallow("play", err),
            },
            Ok(None) => debug!("no script next to {}", file.display()),
            Err(err) => warn!("cannot read script for {}: {}", file.display(), err),
        }
    }

    pub fn on_playback_paused(&mut self) {
        self.state = PlaybackState::Paused;
        self.report("pause", self.client.pause());
    }

    /// Playback resumed: always skip to the current player time first to
    /// correct drift accumulated while paused, then resume the device.
    pub fn on_playback_resumed(&mut self) {
        self.state = PlaybackState::Playing;
        self.skip_to_current_time();
        self.report("resume", self.client.resume());
    }

    pub fn on_playback_stopped(&mut self) {
        self.state = PlaybackState::Idle;
        self.report("stop", self.client.stop());
    }

    pub fn on_playback_ended(&mut self) {
        self.on_playback_stopped();
    }

    /// Player seeked to `time_ms`.
    pub fn on_playback_seek(&mut self, time_ms: u64) {
        self.report("skip", self.client.skip(time_ms));
    }

    pub fn on_playback_seek_chapter(&mut self) {
        self.skip_to_current_time();
    }

    /// Speed 1 is a resume; any other speed (fast-forward, rewind, slow
    /// motion) is not reproduced on the device and pauses it instead.
    pub fn on_playback_speed_changed(&mut self, speed: f64) {
        if speed == 1.0 {
            self.state = PlaybackState::Playing;
            self.skip_to_current_time();
            self.report("resume", self.client.resume());
        } else {
            self.state = PlaybackState::Paused;
            self.report("pause", self.client.pause());
        }
    }

    /// Detects playback that resumed mid-file rather than from time 0,
    /// which the play call alone cannot convey.
    ///
    /// There is no player event for "resumed at an offset" and the player
    /// takes a while to report the resumed position, so probe a bounded
    /// number of times: sample the time, wait, and skip the device as soon
    /// as the position moved further than the elapsed wait.
    fn resync_probe(&self) {
        let wait = self.wait_interval.as_secs_f64();
        for i in 0..RESYNC_PROBES {
            let event_time = self.player.current_time();
            thread::sleep(self.wait_interval);
            if self.player.current_time().round() > (event_time + wait * i as f64).round() {
                self.skip_to_current_time();
                break;
            }
        }
    }

    /// Skips the device to the current player time.
    fn skip_to_current_time(&self) {
        // Let the player state catch up with the last transport request.
        thread::sleep(self.wait_interval);
        let time_ms = (self.player.current_time() * 1000.0) as u64;
        self.report("skip", self.client.skip(time_ms));
    }

    /// Logging boundary for playback-path device calls: nothing propagates.
    fn report(&self, op: &str, result: Result<(), DeviceError>) {
        if let Err(err) = result {
            self.swallow(op, err);
        }
    }

    fn swallow(&self, op: &str, err: DeviceError) {
        match err {
            // The player and device states drift out of sync transiently;
            // a refused operation is expected, not an error.
            DeviceError::InvalidState(_) => {}
            DeviceError::UnsupportedFormat => {
                warn!("device does not support the script format, continuing without sync")
            }
            err => error!("device {} failed: {}", op, err),
        }
    }
}
