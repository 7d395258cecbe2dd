//! Scripted port implementations shared by the in-module unit tests.
//!
//! The integration suite under `tests/` carries its own, richer mocks; these
//! stay deliberately small.

use core::time::Duration;
use std::collections::{HashMap, VecDeque};

use super::events::GameEvent;
use super::ports::{
    ActuatorPort, ClockPort, EventSink, NotifierPort, ProbeFault, SensorPort, StartSignalPort,
};

/// Fixed pin levels plus a scripted probe.
pub(crate) struct ScriptedHw {
    levels: HashMap<i32, bool>,
    temps: VecDeque<Result<f32, ProbeFault>>,
    pub pin_reads: u32,
    pub temp_reads: u32,
    pub writes: Vec<(i32, bool)>,
}

impl ScriptedHw {
    pub fn new() -> Self {
        Self {
            levels: HashMap::new(),
            temps: VecDeque::new(),
            pin_reads: 0,
            temp_reads: 0,
            writes: Vec::new(),
        }
    }

    pub fn set_level(&mut self, gpio: i32, high: bool) {
        self.levels.insert(gpio, high);
    }

    pub fn script_temps(&mut self, temps: &[f32]) {
        self.temps.extend(temps.iter().map(|&c| Ok(c)));
    }
}

impl SensorPort for ScriptedHw {
    fn read_pin(&mut self, gpio: i32) -> bool {
        self.pin_reads += 1;
        *self.levels.get(&gpio).unwrap_or(&false)
    }

    fn read_temperature(&mut self) -> Result<f32, ProbeFault> {
        self.temp_reads += 1;
        self.temps.pop_front().unwrap_or(Ok(20.0))
    }
}

impl ActuatorPort for ScriptedHw {
    fn write_pin(&mut self, gpio: i32, high: bool) {
        self.writes.push((gpio, high));
    }

    fn release_outputs(&mut self) {
        // Release tracking lives in the integration mocks; nothing to do here.
    }
}

pub(crate) struct RecordingNotifier {
    pub sent: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self { sent: Vec::new() }
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&mut self, path: &str) {
        self.sent.push(path.to_string());
    }
}

/// Records sleeps instead of performing them.
pub(crate) struct TestClock {
    pub sleeps: Vec<Duration>,
}

impl TestClock {
    pub fn new() -> Self {
        Self { sleeps: Vec::new() }
    }
}

impl ClockPort for TestClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }

    fn uptime_ms(&self) -> u64 {
        self.sleeps.iter().sum::<Duration>().as_millis() as u64
    }
}

pub(crate) struct ScriptedSignal {
    tokens: VecDeque<Option<heapless::String<32>>>,
}

impl ScriptedSignal {
    pub fn new() -> Self {
        Self {
            tokens: VecDeque::new(),
        }
    }

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

impl StartSignalPort for ScriptedSignal {
    fn poll_token(&mut self) -> Option<heapless::String<32>> {
        self.tokens.pop_front().flatten()
    }
}

pub(crate) struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent) {}
}
