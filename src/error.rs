// src/error.rs

//! Error types shared across the crate.
//!
//! Codec failures (`ScriptError`) are surfaced to the caller, who is
//! expected to report them to a human. Device failures (`DeviceError`) are
//! typed so the playback synchronizer can decide per kind whether to log or
//! silently ignore them.

use thiserror::Error;

/// Errors raised while encoding or decoding funscript data.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The payload is not a valid funscript (e.g. missing `actions`).
    #[error("input is not valid funscript: {0}")]
    Format(String),
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        ScriptError::Format(err.to_string())
    }
}

/// Errors raised by the device client.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The device rejected the script media type (HTTP 415 on play).
    #[error("script media type is not supported by the device")]
    UnsupportedFormat,

    /// The device cannot perform the operation in its current playback
    /// state (HTTP 409), e.g. pausing when nothing is loaded.
    #[error("cannot {0} now")]
    InvalidState(&'static str),

    /// Any other non-success HTTP status.
    #[error("unexpected device response: HTTP {0}")]
    UnexpectedStatus(u16),

    /// Connection or protocol level failure.
    #[error("device transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_error_display() {
        let err = ScriptError::Format("missing field `actions`".to_string());
        assert!(err.to_string().contains("actions"));
    }

    #[test]
    fn device_error_display() {
        assert_eq!(
            DeviceError::InvalidState("pause").to_string(),
            "cannot pause now"
        );
        assert!(DeviceError::UnexpectedStatus(500).to_string().contains("500"));
    }
}
