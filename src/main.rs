//! Connection test diagnostic: sends a small kiiroo script to the
//! configured device and reports whether it played.
//!
//! Settings come from the environment (or a `.env` file):
//! `LAUNCHSYNC_ADDRESS`, `LAUNCHSYNC_LATENCY`, `LAUNCHSYNC_POSITION_MIN`,
//! `LAUNCHSYNC_POSITION_MAX`, `LAUNCHSYNC_SPEED_MIN`,
//! `LAUNCHSYNC_SPEED_MAX`.

use std::env;
use std::process::ExitCode;
use std::str::FromStr;

use dotenv::dotenv;
use env_logger::Env;
use launchsync::{DeviceClient, DeviceSettings};
use log::{error, info};

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = settings_from_env();
    info!("testing connection to {}", settings.url);
    let client = DeviceClient::new(settings);
    match client.test_connection() {
        Ok(()) => {
            info!("connection test succeeded");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("connection test failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn settings_from_env() -> DeviceSettings {
    let defaults = DeviceSettings::default();
    DeviceSettings {
        url: env::var("LAUNCHSYNC_ADDRESS").unwrap_or(defaults.url),
        latency: env_or("LAUNCHSYNC_LATENCY", defaults.latency),
        position_min: env_or("LAUNCHSYNC_POSITION_MIN", defaults.position_min),
        position_max: env_or("LAUNCHSYNC_POSITION_MAX", defaults.position_max),
        speed_min: env_or("LAUNCHSYNC_SPEED_MIN", defaults.speed_min),
        speed_max: env_or("LAUNCHSYNC_SPEED_MAX", defaults.speed_max),
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
