//! Rising-temperature threshold trigger with fault-tolerant reads.
//!
//! The greenhouse puzzle ends with the players heating the probe fixture.
//! A reference temperature is captured when the game starts; the trigger
//! fires once the probe reads `baseline + delta` or more.
//!
//! ## Reliable reads
//!
//! The DS18B20 intermittently answers with its power-on reset value under
//! normal operation (supply dips when the heat lamp switches).  Each read is
//! therefore retried across a bounded window; only a full window of
//! consecutive reset values is escalated as a dead probe.  Retrying forever
//! would mask a genuinely disconnected sensor.

use core::time::Duration;

use log::{debug, info};

use crate::error::{Error, Result};

use super::ports::{ClockPort, NotifierPort, ProbeFault, SensorPort};
use super::triggers::Triggerable;

/// Consecutive reset-value reads tolerated before the probe is declared dead.
pub const MAX_READ_ATTEMPTS: u8 = 10;

/// One-shot trigger over the temperature probe.
///
/// Not a [`DigitalSensor`](super::triggers::DigitalSensor) wrapper — the
/// activation condition is a threshold over an analog reading, so only the
/// [`Triggerable`] capability is shared with the pin-backed triggers.
pub struct ThresholdThermometer {
    path: &'static str,
    delta_c: f32,
    backoff: Duration,
    baseline_c: Option<f32>,
    last_c: Option<f32>,
    fired: bool,
}

impl ThresholdThermometer {
    pub fn new(path: &'static str, delta_c: f32, backoff: Duration) -> Self {
        Self {
            path,
            delta_c,
            backoff,
            baseline_c: None,
            last_c: None,
            fired: false,
        }
    }

    /// Notification path on the show-control server.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Reference temperature, once captured.
    pub fn baseline_c(&self) -> Option<f32> {
        self.baseline_c
    }

    /// Most recent successful reading.
    pub fn last_celsius(&self) -> Option<f32> {
        self.last_c
    }

    /// Capture the reference temperature.
    ///
    /// Called exactly once, after the start gate opens (the probe fixture is
    /// only powered with the room) and before the first poll.
    pub fn capture_baseline(
        &mut self,
        hw: &mut impl SensorPort,
        clock: &mut impl ClockPort,
    ) -> Result<f32> {
        if self.baseline_c.is_some() {
            return Err(Error::State("baseline already captured"));
        }
        let celsius = self.reliable_read(hw, clock)?;
        self.baseline_c = Some(celsius);
        info!("baseline captured: {:.2} °C", celsius);
        Ok(celsius)
    }

    /// One temperature conversion, retrying transient reset-value faults.
    ///
    /// Escalates to [`Error::ProbeUnresponsive`] on the
    /// [`MAX_READ_ATTEMPTS`]th consecutive reset value; any success resets
    /// the window for the next call.  Bus faults are not retried.
    fn reliable_read(
        &mut self,
        hw: &mut impl SensorPort,
        clock: &mut impl ClockPort,
    ) -> Result<f32> {
        for attempt in 1..=MAX_READ_ATTEMPTS {
            match hw.read_temperature() {
                Ok(celsius) => {
                    self.last_c = Some(celsius);
                    return Ok(celsius);
                }
                Err(ProbeFault::ResetValue) => {
                    debug!("probe sent reset value (attempt {attempt}/{MAX_READ_ATTEMPTS})");
                    if attempt < MAX_READ_ATTEMPTS {
                        clock.sleep(self.backoff);
                    }
                }
                Err(ProbeFault::Bus) => return Err(Error::ProbeBus),
            }
        }
        Err(Error::ProbeUnresponsive {
            attempts: MAX_READ_ATTEMPTS,
        })
    }
}

impl Triggerable for ThresholdThermometer {
    fn check_and_fire(
        &mut self,
        hw: &mut impl SensorPort,
        notifier: &mut impl NotifierPort,
        clock: &mut impl ClockPort,
    ) -> Result<bool> {
        if self.fired {
            return Ok(false);
        }
        let Some(baseline) = self.baseline_c else {
            return Err(Error::State("baseline not captured"));
        };

        let current = self.reliable_read(hw, clock)?;
        if current < baseline + self.delta_c {
            return Ok(false);
        }

        // Same rule as the pin triggers: latch before notifying.
        self.fired = true;
        info!(
            "temperature threshold crossed: {:.2} °C (baseline {:.2} + {:.1})",
            current, baseline, self.delta_c
        );
        notifier.notify(self.path);
        Ok(true)
    }

    fn is_fired(&self) -> bool {
        self.fired
    }
}
