//! Mock port implementations for integration tests.
//!
//! Record every hardware interaction so tests can assert on the full call
//! history without touching real GPIO or the network.

use core::time::Duration;
use std::collections::{HashMap, VecDeque};

use roomctl::app::events::GameEvent;
use roomctl::app::ports::{
    ActuatorPort, ClockPort, EventSink, NotifierPort, ProbeFault, SensorPort, StartSignalPort,
};
use roomctl::pins;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwCall {
    WritePin { gpio: i32, high: bool },
    ReleaseOutputs,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    levels: HashMap<i32, bool>,
    pub temps: VecDeque<Result<f32, ProbeFault>>,
    pub pin_reads: u32,
    pub temp_reads: u32,
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Board in its idle state: start button up (pulled high), room
    /// contacts closed (low), probe script empty.
    pub fn idle() -> Self {
        let mut levels = HashMap::new();
        levels.insert(pins::START_BUTTON_GPIO, true);
        levels.insert(pins::ATELIER_GPIO, false);
        levels.insert(pins::CAVEAU_GPIO, false);
        levels.insert(pins::SERRE_GPIO, false);
        Self {
            levels,
            temps: VecDeque::new(),
            pin_reads: 0,
            temp_reads: 0,
            calls: Vec::new(),
        }
    }

    /// Press the start button (active-low).
    pub fn press_start(&mut self) {
        self.levels.insert(pins::START_BUTTON_GPIO, false);
    }

    /// Open a room contact (puzzle solved; line pulled high).
    pub fn trip(&mut self, gpio: i32) {
        self.levels.insert(gpio, true);
    }

    /// Queue successful probe readings.
    pub fn script_temps(&mut self, temps: &[f32]) {
        self.temps.extend(temps.iter().map(|&c| Ok(c)));
    }

    /// Queue `n` consecutive reset-value faults.
    pub fn script_resets(&mut self, n: usize) {
        self.temps
            .extend(std::iter::repeat_n(Err(ProbeFault::ResetValue), n));
    }

    pub fn released(&self) -> bool {
        self.calls.contains(&HwCall::ReleaseOutputs)
    }
}

impl SensorPort for MockHardware {
    fn read_pin(&mut self, gpio: i32) -> bool {
        self.pin_reads += 1;
        *self.levels.get(&gpio).unwrap_or(&false)
    }

    fn read_temperature(&mut self) -> Result<f32, ProbeFault> {
        self.temp_reads += 1;
        // An empty script means "probe stuck at the last known room temp";
        // scenarios that must fire script an explicit rise.
        self.temps.pop_front().unwrap_or(Ok(20.0))
    }
}

impl ActuatorPort for MockHardware {
    fn write_pin(&mut self, gpio: i32, high: bool) {
        self.calls.push(HwCall::WritePin { gpio, high });
    }

    fn release_outputs(&mut self) {
        self.calls.push(HwCall::ReleaseOutputs);
    }
}

// ── MockNotifier ──────────────────────────────────────────────

pub struct MockNotifier {
    pub sent: Vec<String>,
}

#[allow(dead_code)]
impl MockNotifier {
    pub fn new() -> Self {
        Self { sent: Vec::new() }
    }

    pub fn count_of(&self, path: &str) -> usize {
        self.sent.iter().filter(|p| p == &path).count()
    }
}

impl NotifierPort for MockNotifier {
    fn notify(&mut self, path: &str) {
        self.sent.push(path.to_string());
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Records sleeps instead of performing them, so hour-long actuation holds
/// cost nothing in the suite.
pub struct MockClock {
    pub sleeps: Vec<Duration>,
}

impl MockClock {
    pub fn new() -> Self {
        Self { sleeps: Vec::new() }
    }
}

impl ClockPort for MockClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }

    fn uptime_ms(&self) -> u64 {
        self.sleeps.iter().sum::<Duration>().as_millis() as u64
    }
}

// ── MockStartSignal ───────────────────────────────────────────

pub struct MockStartSignal {
    tokens: VecDeque<Option<heapless::String<32>>>,
}

#[allow(dead_code)]
impl MockStartSignal {
    /// Never signals.
    pub fn new() -> Self {
        Self {
            tokens: VecDeque::new(),
        }
    }

    /// Scripted poll results, in order; `None` entries are silent polls.
    pub fn with_tokens(tokens: &[Option<&str>]) -> Self {
        let tokens = tokens
            .iter()
            .map(|t| {
                t.map(|s| {
                    let mut out = heapless::String::new();
                    let _ = out.push_str(s);
                    out
                })
            })
            .collect();
        Self { tokens }
    }
}

impl StartSignalPort for MockStartSignal {
    fn poll_token(&mut self) -> Option<heapless::String<32>> {
        self.tokens.pop_front().flatten()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
