//! Port traits — the hexagonal boundary between game logic and the room.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GameService (domain)
//! ```
//!
//! Driven adapters (GPIO, the temperature probe, the HTTP notifier, the
//! network start listener) implement these traits.  The
//! [`GameService`](super::service::GameService) consumes them via generics,
//! so the domain core never touches hardware directly.

use core::fmt;
use core::time::Duration;

use crate::config::GameConfig;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: input pin levels and the temperature probe.
pub trait SensorPort {
    /// Raw logic level of an input pin (`true` = high).
    fn read_pin(&mut self, gpio: i32) -> bool;

    /// One temperature conversion, in °C.
    fn read_temperature(&mut self) -> Result<f32, ProbeFault>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the two actuation outputs.
pub trait ActuatorPort {
    /// Drive an output pin.
    fn write_pin(&mut self, gpio: i32, high: bool);

    /// Drive every claimed output inactive and give the pins back.  Called
    /// unconditionally when a game run ends, on the error path too.
    fn release_outputs(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Notifier port (domain → show-control server)
// ───────────────────────────────────────────────────────────────

/// Outbound show-control notification.
///
/// Fire-and-forget: implementations bound the request with a short timeout
/// and swallow the outcome.  By the time `notify` is called the caller's
/// latch is already set, so delivery failures must not surface.
pub trait NotifierPort {
    fn notify(&mut self, path: &str);
}

// ───────────────────────────────────────────────────────────────
// Start signal port (show-control server → domain)
// ───────────────────────────────────────────────────────────────

/// Alternate start source.
///
/// Non-blocking: returns a token when a remote party has signalled since the
/// last poll, `None` otherwise.  The start gate interleaves these polls with
/// button reads, so a blocking receive would deadlock the button path.
pub trait StartSignalPort {
    fn poll_token(&mut self) -> Option<heapless::String<32>>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time and blocking sleeps.
///
/// Every suspension point in the game (retry backoff, actuation holds, the
/// start-gate idle wait) goes through this port so tests can observe waits
/// without actually sleeping.
pub trait ClockPort {
    fn sleep(&mut self, duration: Duration);

    /// Milliseconds since boot (monotonic).
    fn uptime_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`GameEvent`](super::events::GameEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GameEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists deployment configuration.
///
/// Implementations MUST validate before persisting — a bad blob written once
/// would otherwise brick the room until reflashing.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    fn load(&self) -> Result<GameConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &GameConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Faults a temperature read can produce at the port boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFault {
    /// The probe answered with its power-on reset value.  Transient: the
    /// DS18B20 does this after a supply glitch and recovers on its own.
    ResetValue,
    /// Bus-level failure (no presence pulse, bad CRC).
    Bus,
}

impl fmt::Display for ProbeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetValue => write!(f, "reset value read"),
            Self::Bus => write!(f, "bus failure"),
        }
    }
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
