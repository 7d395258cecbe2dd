//! RoomCtl Firmware — Main Entry Point
//!
//! Hexagonal architecture, one blocking flow per game lifecycle.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   HttpNotifier   TcpStartListener             │
//! │  (Sensor+Actuator) (Notifier)     (StartSignal)                │
//! │  NvsAdapter        MonotonicClock LogEventSink                 │
//! │  (Config)          (Clock)        (EventSink)                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              GameService (pure logic)                  │    │
//! │  │  StartGate · Triggers · Thermometer · Actuation        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The process runs exactly one game lifecycle and then exits; the service
//! supervisor on the box restarts it for the next group.

#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod app;
mod adapters;
mod drivers;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::net_start::{NullStartSignal, TcpStartListener};
use adapters::notify::HttpNotifier;
use adapters::nvs::NvsAdapter;
use adapters::time::MonotonicClock;
use app::ports::ConfigPort;
use app::service::GameService;
use config::GameConfig;
use drivers::probe::Ds18b20;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RoomCtl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // GPIO init failure is critical — log and halt; the watchdog-less
        // box is power-cycled by the operator.
        error!("GPIO init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Deployment config from NVS (or defaults) ───────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            None
        }
    };
    let config = match nvs.as_ref().map(ConfigPort::load) {
        Some(Ok(cfg)) => {
            info!("config loaded from NVS");
            cfg
        }
        Some(Err(e)) => {
            warn!("NVS config load failed ({}), using defaults", e);
            GameConfig::default()
        }
        None => GameConfig::default(),
    };

    // ── 4. Network ────────────────────────────────────────────
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
    let _wifi = adapters::wifi::connect_sta(
        peripherals.modem,
        config.wifi_ssid.as_str(),
        config.wifi_password.as_str(),
    )?;

    // ── 5. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(Ds18b20::new(pins::PROBE_GPIO));
    let mut notifier = HttpNotifier::new(config.server_base_url.clone());
    let mut clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();

    // ── 6. Run one game lifecycle ─────────────────────────────
    let mut game = GameService::new(&config);

    info!("system ready, waiting for game start");
    let run_result = match TcpStartListener::bind(config.start_listen_port) {
        Ok(mut listener) => game.run(&mut hw, &mut notifier, &mut listener, &mut clock, &mut sink),
        Err(e) => {
            warn!("start listener unavailable ({}), button start only", e);
            let mut fallback = NullStartSignal;
            game.run(&mut hw, &mut notifier, &mut fallback, &mut clock, &mut sink)
        }
    };

    match run_result {
        Ok(()) => {
            info!("game complete — restart the controller to re-arm the room");
            Ok(())
        }
        Err(e) => {
            // Output pins were already released inside GameService::run.
            error!("FATAL: game run aborted: {}", e);
            Err(anyhow::anyhow!("game run aborted: {e}"))
        }
    }
}
