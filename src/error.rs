//! Unified error types for the RoomCtl firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level game loop's error handling uniform.  All variants are `Copy` so
//! they can be cheaply passed through the orchestrator without allocation.

use core::fmt;

/// Every fallible operation in the game core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature probe answered with its reset value on every attempt
    /// of a bounded retry loop; the sensor is presumed disconnected.
    ProbeUnresponsive { attempts: u8 },
    /// Non-transient probe failure (no presence pulse, bad CRC).
    ProbeBus,
    /// A component was driven outside its lifecycle contract.
    State(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProbeUnresponsive { attempts } => {
                write!(f, "probe unresponsive after {attempts} reset-value reads")
            }
            Self::ProbeBus => write!(f, "probe bus failure"),
            Self::State(msg) => write!(f, "state: {msg}"),
        }
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
