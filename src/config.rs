//! Game configuration parameters
//!
//! Deployment settings for one room installation.  Values can be overridden
//! via NVS (non-volatile storage); puzzle thresholds are fixed per design and
//! only the network-facing values are expected to change between venues.

use serde::{Deserialize, Serialize};

// --- Notification paths on the show-control server ---

/// Sent when the start gate opens.
pub const PATH_START: &str = "start";
/// Sent a settle delay after [`PATH_START`]; arms the final mechanism.
pub const PATH_MACHINE: &str = "machine";
/// Workshop puzzle solved.
pub const PATH_ATELIER: &str = "atelier";
/// Cellar puzzle solved.
pub const PATH_CAVEAU: &str = "caveau";
/// Greenhouse puzzle solved.
pub const PATH_SERRE: &str = "serre";
/// Temperature threshold crossed.
pub const PATH_TEMPERATURE: &str = "temperature";

/// The only token the network start listener acts on; anything else is
/// ignored and the gate keeps waiting.
pub const START_TOKEN: &str = "start";

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // --- Network ---
    /// Base URL of the show-control server, without trailing slash.
    pub server_base_url: heapless::String<64>,
    /// TCP port the network start listener binds on.
    pub start_listen_port: u16,
    /// Room WiFi credentials (station mode).
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,

    // --- Temperature puzzle ---
    /// Rise above the game-start baseline that fires the trigger (°C).
    pub temp_delta_c: f32,
    /// Backoff between probe retries after a reset-value read (ms).
    pub probe_retry_backoff_ms: u32,

    // --- Actuation ---
    /// Stage A hold: relay on while the room audio cue plays out (seconds).
    pub relay_hold_secs: u16,
    /// Stage B hold: hatch kept open (seconds, shorter than stage A).
    pub hatch_hold_secs: u16,

    // --- Timing ---
    /// Delay between the "start" and "machine" notifications (seconds).
    pub start_settle_secs: u16,
    /// Idle sleep per poll iteration (ms).
    pub poll_idle_ms: u32,
}

fn fixed<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    // Defaults are compile-time literals that always fit.
    let _ = out.push_str(s);
    out
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Network
            server_base_url: fixed("http://192.168.42.42:14999"),
            start_listen_port: 8080,
            wifi_ssid: fixed("room-ops"),
            wifi_password: fixed("change-moi-svp"),

            // Temperature puzzle
            temp_delta_c: 2.0,
            probe_retry_backoff_ms: 250,

            // Actuation
            relay_hold_secs: 60,
            hatch_hold_secs: 15,

            // Timing
            start_settle_secs: 5,
            poll_idle_ms: 20,
        }
    }
}

impl GameConfig {
    /// Range-check every field.  Called before persisting to NVS and after
    /// loading, so a corrupted or hand-edited blob can never put the room
    /// into a nonsensical state.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.server_base_url.starts_with("http://") {
            return Err("server_base_url must start with http://");
        }
        if self.start_listen_port < 1024 {
            return Err("start_listen_port must be >= 1024");
        }
        if self.wifi_ssid.is_empty() {
            return Err("wifi_ssid must not be empty");
        }
        if !self.wifi_password.is_empty() && self.wifi_password.len() < 8 {
            return Err("wifi_password must be empty (open AP) or >= 8 bytes");
        }
        if !(0.5..=20.0).contains(&self.temp_delta_c) {
            return Err("temp_delta_c must be 0.5–20.0");
        }
        if !(10..=2_000).contains(&self.probe_retry_backoff_ms) {
            return Err("probe_retry_backoff_ms must be 10–2000");
        }
        if self.relay_hold_secs == 0 || self.hatch_hold_secs == 0 {
            return Err("actuation holds must be non-zero");
        }
        if self.hatch_hold_secs >= self.relay_hold_secs {
            return Err("hatch_hold_secs must be < relay_hold_secs");
        }
        if self.start_settle_secs == 0 {
            return Err("start_settle_secs must be non-zero");
        }
        if self.poll_idle_ms > 1_000 {
            return Err("poll_idle_ms must be <= 1000");
        }
        Ok(())
    }
}
