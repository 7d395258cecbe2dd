//! Hardware adapter — bridges GPIO and the temperature probe to the domain
//! port traits.  This (plus the drivers it owns) is the only part of the
//! system that touches actual hardware.

use crate::app::ports::{ActuatorPort, ProbeFault, SensorPort};
use crate::drivers::hw_init;
use crate::drivers::probe::Ds18b20;

/// Concrete adapter combining pin I/O and the probe behind port traits.
pub struct HardwareAdapter {
    probe: Ds18b20,
}

impl HardwareAdapter {
    pub fn new(probe: Ds18b20) -> Self {
        Self { probe }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_pin(&mut self, gpio: i32) -> bool {
        hw_init::gpio_read(gpio)
    }

    fn read_temperature(&mut self) -> Result<f32, ProbeFault> {
        self.probe.read_celsius()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn write_pin(&mut self, gpio: i32, high: bool) {
        hw_init::gpio_write(gpio, high);
    }

    fn release_outputs(&mut self) {
        hw_init::release_outputs();
    }
}
