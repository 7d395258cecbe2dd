//! DS18B20 one-wire temperature probe driver.
//!
//! Bit-banged over a single GPIO (no RMT channel needed at this poll rate).
//! After a supply glitch the DS18B20 answers with its power-on value of
//! +85 °C; that reading is reported as [`ProbeFault::ResetValue`] so the
//! caller can retry, distinct from [`ProbeFault::Bus`] which means the bus
//! itself is broken (no presence pulse, bad CRC).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real bus timing via `ets_delay_us`.
//! On host/test: readings come from static atomics for injection.

use crate::app::ports::ProbeFault;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, AtomicU8, Ordering};

/// Raw scratchpad value of the power-on reset reading (+85.0 °C).
#[cfg(target_os = "espidf")]
const RESET_RAW: i16 = 0x0550;

// ── Host-side injection ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_MILLI_C: AtomicI32 = AtomicI32::new(20_000);
#[cfg(not(target_os = "espidf"))]
static SIM_FAULT: AtomicU8 = AtomicU8::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temperature(celsius: f32) {
    SIM_TEMP_MILLI_C.store((celsius * 1000.0) as i32, Ordering::Relaxed);
}

/// Make the next reads fail; `None` clears the injected fault.
#[cfg(not(target_os = "espidf"))]
pub fn sim_inject_fault(fault: Option<ProbeFault>) {
    let code = match fault {
        None => 0,
        Some(ProbeFault::ResetValue) => 1,
        Some(ProbeFault::Bus) => 2,
    };
    SIM_FAULT.store(code, Ordering::Relaxed);
}

// ── Driver ────────────────────────────────────────────────────

pub struct Ds18b20 {
    gpio: i32,
}

impl Ds18b20 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// One-wire bus GPIO.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Run one conversion and read the result.
    ///
    /// Blocks for the conversion time (~750 ms at 12-bit resolution).
    #[cfg(target_os = "espidf")]
    pub fn read_celsius(&mut self) -> Result<f32, ProbeFault> {
        self.start_conversion()?;
        // Max conversion time at 12-bit resolution per datasheet.
        std::thread::sleep(std::time::Duration::from_millis(750));

        let scratchpad = self.read_scratchpad()?;
        if crc8(&scratchpad[..8]) != scratchpad[8] {
            return Err(ProbeFault::Bus);
        }

        let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
        if raw == RESET_RAW {
            return Err(ProbeFault::ResetValue);
        }
        Ok(f32::from(raw) / 16.0)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_celsius(&mut self) -> Result<f32, ProbeFault> {
        match SIM_FAULT.load(Ordering::Relaxed) {
            1 => Err(ProbeFault::ResetValue),
            2 => Err(ProbeFault::Bus),
            _ => Ok(SIM_TEMP_MILLI_C.load(Ordering::Relaxed) as f32 / 1000.0),
        }
    }

    // ── One-wire bus primitives (bit-banged) ──────────────────
    //
    // Open-drain with the external 4.7 kΩ pull-up: drive low by switching
    // to output-low, release by switching back to input.  Timings from the
    // DS18B20 datasheet, generous side of each window.

    #[cfg(target_os = "espidf")]
    fn start_conversion(&mut self) -> Result<(), ProbeFault> {
        self.bus_reset()?;
        self.write_byte(0xCC); // SKIP ROM — single drop on the bus
        self.write_byte(0x44); // CONVERT T
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn read_scratchpad(&mut self) -> Result<[u8; 9], ProbeFault> {
        self.bus_reset()?;
        self.write_byte(0xCC); // SKIP ROM
        self.write_byte(0xBE); // READ SCRATCHPAD
        let mut scratchpad = [0u8; 9];
        for byte in &mut scratchpad {
            *byte = self.read_byte();
        }
        Ok(scratchpad)
    }

    #[cfg(target_os = "espidf")]
    fn bus_reset(&mut self) -> Result<(), ProbeFault> {
        use esp_idf_svc::sys::*;

        // SAFETY: raw GPIO toggling on the claimed one-wire pin; the game
        // loop is single-threaded so nothing else drives the bus.
        unsafe {
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            gpio_set_level(self.gpio, 0);
            ets_delay_us(480);
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_INPUT);
            ets_delay_us(70);
            let present = gpio_get_level(self.gpio) == 0;
            ets_delay_us(410);
            if present { Ok(()) } else { Err(ProbeFault::Bus) }
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_byte(&mut self, mut byte: u8) {
        for _ in 0..8 {
            self.write_bit(byte & 1 != 0);
            byte >>= 1;
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit() {
                byte |= 1 << i;
            }
        }
        byte
    }

    #[cfg(target_os = "espidf")]
    fn write_bit(&mut self, bit: bool) {
        use esp_idf_svc::sys::*;

        // SAFETY: see bus_reset.
        unsafe {
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            gpio_set_level(self.gpio, 0);
            if bit {
                ets_delay_us(6);
                gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_INPUT);
                ets_delay_us(64);
            } else {
                ets_delay_us(60);
                gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_INPUT);
                ets_delay_us(10);
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_bit(&mut self) -> bool {
        use esp_idf_svc::sys::*;

        // SAFETY: see bus_reset.
        unsafe {
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            gpio_set_level(self.gpio, 0);
            ets_delay_us(6);
            gpio_set_direction(self.gpio, gpio_mode_t_GPIO_MODE_INPUT);
            ets_delay_us(9);
            let bit = gpio_get_level(self.gpio) != 0;
            ets_delay_us(55);
            bit
        }
    }
}

// ── CRC ───────────────────────────────────────────────────────

/// Dallas/Maxim CRC-8 over the scratchpad (poly 0x31, reflected 0x8C).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0x8C } else { crc >> 1 };
        }
    }
    crc
}
