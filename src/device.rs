// src/device.rs

//! Client for the launchcontrol device HTTP protocol.
//!
//! The device exposes `/v1/play`, `/v1/stop`, `/v1/pause`, `/v1/resume`
//! and `/v1/skip` on a configured base URL. Status codes carry the
//! semantics: 2xx success, 409 when the device's playback state refuses
//! the operation, 415 when a script media type is not supported.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::DeviceError;

/// Per-request deadline so a hung device cannot stall a player event
/// handler indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Small kiiroo script used by the connection test diagnostic.
const TEST_SCRIPT: &[u8] = b"{0.50:4,1.00:0,2.50:4,3.00:0}";

/// Device session configuration.
///
/// Immutable for the lifetime of a [`DeviceClient`]; on a settings change
/// the whole client is replaced rather than mutated field by field.
///
/// * `url` - device base URL
/// * `latency` - time adjustment in milliseconds
/// * `position_min`/`position_max` - movement range in percent
/// * `speed_min`/`speed_max` - speed range in percent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    pub url: String,
    pub latency: i64,
    pub position_min: u8,
    pub position_max: u8,
    pub speed_min: u8,
    pub speed_max: u8,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        DeviceSettings {
            url: "http://127.0.0.1:6969".to_string(),
            latency: 0,
            position_min: 0,
            position_max: 100,
            speed_min: 20,
            speed_max: 100,
        }
    }
}

/// Blocking HTTP client for one device session.
pub struct DeviceClient {
    http: Client,
    settings: DeviceSettings,
}

impl DeviceClient {
    pub fn new(settings: DeviceSettings) -> Self {
        DeviceClient {
            http: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Loads `data` on the device and starts playback.
    ///
    /// The session's latency, position and speed configuration travels as
    /// query parameters; the script's media type as the `Content-Type`
    /// header. An empty `media_type` means no script was found for the
    /// current media and the call is a no-op.
    pub fn play(&self, data: &[u8], media_type: &str) -> Result<(), DeviceError> {
        if media_type.is_empty() {
            return Ok(());
        }
        debug!("play: {} bytes as {}", data.len(), media_type);
        let response = self
            .http
            .post(format!("{}/v1/play", self.settings.url))
            .query(&[
                ("latency", self.settings.latency.to_string()),
                ("positionmin", self.settings.position_min.to_string()),
                ("positionmax", self.settings.position_max.to_string()),
                ("speedmin", self.settings.speed_min.to_string()),
                ("speedmax", self.settings.speed_max.to_string()),
            ])
            .header(reqwest::header::CONTENT_TYPE, media_type)
            .body(data.to_vec())
            .timeout(REQUEST_TIMEOUT)
            .send()?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Err(DeviceError::UnsupportedFormat),
            status => Err(DeviceError::UnexpectedStatus(status.as_u16())),
        }
    }

    /// Stops playback.
    pub fn stop(&self) -> Result<(), DeviceError> {
        self.transport("stop")
    }

    /// Pauses playback.
    pub fn pause(&self) -> Result<(), DeviceError> {
        self.transport("pause")
    }

    /// Resumes paused playback.
    pub fn resume(&self) -> Result<(), DeviceError> {
        self.transport("resume")
    }

    /// Jumps to the timecode `time_ms` into the loaded script.
    pub fn skip(&self, time_ms: u64) -> Result<(), DeviceError> {
        debug!("skip to {}ms", time_ms);
        let response = self
            .http
            .get(format!("{}/v1/skip", self.settings.url))
            .query(&[("p", format!("{}ms", time_ms))])
            .timeout(REQUEST_TIMEOUT)
            .send()?;
        Self::expect_success(response, "skip")
    }

    /// Sends a small script to verify the device is reachable and able to
    /// play. Unlike playback-path calls, the caller is expected to surface
    /// the error to the user.
    pub fn test_connection(&self) -> Result<(), DeviceError> {
        self.play(TEST_SCRIPT, "x-text/kiiroo")
    }

    fn transport(&self, op: &'static str) -> Result<(), DeviceError> {
        debug!("{}", op);
        let response = self
            .http
            .get(format!("{}/v1/{}", self.settings.url, op))
            .timeout(REQUEST_TIMEOUT)
            .send()?;
        Self::expect_success(response, op)
    }

    fn expect_success(
        response: reqwest::blocking::Response,
        op: &'static str,
    ) -> Result<(), DeviceError> {
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(DeviceError::InvalidState(op)),
            status => Err(DeviceError::UnexpectedStatus(status.as_u16())),
        }
    }
}
