//! Application core — the hexagonal game logic.
//!
//! ```text
//!   SensorPort ──▶ ┌────────────────────────┐ ──▶ NotifierPort
//!                  │      GameService        │
//!  StartSignal ──▶ │  gate · triggers ·      │ ──▶ EventSink
//!                  │  thermometer · actuation│
//!  ActuatorPort ◀──└────────────────────────┘
//! ```
//!
//! Everything in this module is hardware-agnostic: all I/O flows through the
//! port traits in [`ports`], so the whole game runs against mock adapters on
//! the host.

pub mod actuation;
pub mod events;
pub mod ports;
pub mod service;
pub mod start_gate;
pub mod thermometer;
pub mod triggers;

#[cfg(test)]
pub(crate) mod test_support;
