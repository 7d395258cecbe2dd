//! Room trigger sensors and the one-shot notification latch.

use log::info;

use crate::error::Result;

use super::ports::{ClockPort, NotifierPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// Triggerable capability
// ───────────────────────────────────────────────────────────────

/// Capability shared by every one-shot event source in the room.
///
/// Implementors latch on their first active observation and notify the
/// show-control server exactly once per game instance.
pub trait Triggerable {
    /// Poll the underlying condition.  On the first active observation,
    /// latch and send this trigger's notification.
    ///
    /// Returns `Ok(true)` only for the call that caused the activation;
    /// every later call is a no-op returning `Ok(false)` without touching
    /// the sensor.
    fn check_and_fire(
        &mut self,
        hw: &mut impl SensorPort,
        notifier: &mut impl NotifierPort,
        clock: &mut impl ClockPort,
    ) -> Result<bool>;

    /// Whether the latch is set.
    fn is_fired(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// DigitalSensor
// ───────────────────────────────────────────────────────────────

/// One digital input line with optional signal inversion.
///
/// Stateless: every read is a pure query of the current physical level.
#[derive(Debug, Clone, Copy)]
pub struct DigitalSensor {
    gpio: i32,
    inverted: bool,
}

impl DigitalSensor {
    /// Active when the line reads high — a normally-closed contact to ground
    /// that opens when the puzzle is solved.
    pub fn active_high(gpio: i32) -> Self {
        Self {
            gpio,
            inverted: false,
        }
    }

    /// Active when the line reads low — a push button to ground behind a
    /// pull-up.
    pub fn active_low(gpio: i32) -> Self {
        Self {
            gpio,
            inverted: true,
        }
    }

    /// GPIO this sensor is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn is_active(&self, hw: &mut impl SensorPort) -> bool {
        hw.read_pin(self.gpio) != self.inverted
    }
}

// ───────────────────────────────────────────────────────────────
// OneShotTrigger
// ───────────────────────────────────────────────────────────────

/// A sensor-backed one-shot event source.
///
/// `fired` transitions `false → true` exactly once and never resets within
/// a game instance.
pub struct OneShotTrigger {
    sensor: DigitalSensor,
    path: &'static str,
    fired: bool,
}

impl OneShotTrigger {
    pub fn new(sensor: DigitalSensor, path: &'static str) -> Self {
        Self {
            sensor,
            path,
            fired: false,
        }
    }

    /// Notification path on the show-control server, doubling as the
    /// trigger's name.
    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl Triggerable for OneShotTrigger {
    fn check_and_fire(
        &mut self,
        hw: &mut impl SensorPort,
        notifier: &mut impl NotifierPort,
        _clock: &mut impl ClockPort,
    ) -> Result<bool> {
        if self.fired {
            return Ok(false);
        }
        if !self.sensor.is_active(hw) {
            return Ok(false);
        }

        // Latch before notifying: a slow or failed request must not cause a
        // duplicate send on the next poll.
        self.fired = true;
        info!("trigger '{}' fired", self.path);
        notifier.notify(self.path);
        Ok(true)
    }

    fn is_fired(&self) -> bool {
        self.fired
    }
}
