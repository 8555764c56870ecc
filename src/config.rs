use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub timing: TimingConfig,
}

/// Driver-side pacing between the begin and finish phases. The core never
/// sees these numbers; it only exposes the begin/finish pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Mechanical travel time of the closing stroke.
    pub close_travel_ms: u64,
    /// Operate time from trip initiation to contacts open.
    pub trip_operate_ms: u64,
    /// How long the K1 close command pulse is held up.
    pub k1_pulse_ms: u64,
}

impl TimingConfig {
    pub fn close_travel(&self) -> Duration {
        Duration::from_millis(self.close_travel_ms)
    }

    pub fn trip_operate(&self) -> Duration {
        Duration::from_millis(self.trip_operate_ms)
    }

    pub fn k1_pulse(&self) -> Duration {
        Duration::from_millis(self.k1_pulse_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("PANEL__").split("__"));
        Ok(figment.extract()?)
    }
}
