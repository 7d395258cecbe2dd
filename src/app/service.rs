//! Game orchestrator — owns the whole sensor set and drives one run.
//!
//! One [`GameService`] value is constructed per game instance and owns every
//! trigger, the thermometer, the start gate and the actuation sequence; there
//! is no process-wide mutable state.  Execution is strictly sequential: one
//! flow polls the sensors in a fixed order, and a slow notification for one
//! trigger simply delays observation of the next.

use core::time::Duration;

use log::info;

use crate::config::{self, GameConfig};
use crate::error::Result;
use crate::pins;

use super::actuation::ActuationSequence;
use super::events::GameEvent;
use super::ports::{
    ActuatorPort, ClockPort, EventSink, NotifierPort, SensorPort, StartSignalPort,
};
use super::start_gate::StartGate;
use super::thermometer::ThresholdThermometer;
use super::triggers::{DigitalSensor, OneShotTrigger, Triggerable};

/// Lifecycle of one game run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    WaitingForStart,
    Running,
    Complete,
}

/// The game orchestrator.
pub struct GameService {
    phase: GamePhase,
    gate: StartGate,
    /// Room triggers in their fixed poll order.
    triggers: [OneShotTrigger; 3],
    thermometer: ThresholdThermometer,
    actuation: ActuationSequence,
    poll_idle: Duration,
}

impl GameService {
    /// Build the full sensor set for one game instance.
    pub fn new(config: &GameConfig) -> Self {
        let gate = StartGate::new(
            DigitalSensor::active_low(pins::START_BUTTON_GPIO),
            config,
        );
        let triggers = [
            OneShotTrigger::new(
                DigitalSensor::active_high(pins::ATELIER_GPIO),
                config::PATH_ATELIER,
            ),
            OneShotTrigger::new(
                DigitalSensor::active_high(pins::CAVEAU_GPIO),
                config::PATH_CAVEAU,
            ),
            OneShotTrigger::new(
                DigitalSensor::active_high(pins::SERRE_GPIO),
                config::PATH_SERRE,
            ),
        ];
        let thermometer = ThresholdThermometer::new(
            config::PATH_TEMPERATURE,
            config.temp_delta_c,
            Duration::from_millis(u64::from(config.probe_retry_backoff_ms)),
        );
        let actuation = ActuationSequence::new(
            pins::RELAY_GPIO,
            pins::HATCH_GPIO,
            Duration::from_secs(u64::from(config.relay_hold_secs)),
            Duration::from_secs(u64::from(config.hatch_hold_secs)),
        );

        Self {
            phase: GamePhase::WaitingForStart,
            gate,
            triggers,
            thermometer,
            actuation,
            poll_idle: Duration::from_millis(u64::from(config.poll_idle_ms)),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Run one complete game lifecycle.
    ///
    /// Blocks through the start gate, then polls every trigger until the
    /// thermometer fires and the actuation sequence has completed.  The
    /// actuation outputs are released before this returns on **every** path,
    /// including a propagated probe failure.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        notifier: &mut impl NotifierPort,
        signal: &mut impl StartSignalPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let started_ms = clock.uptime_ms();
        let result = self.run_game(hw, notifier, signal, clock, sink);
        hw.release_outputs();

        if result.is_ok() {
            info!(
                "game complete in {} s",
                (clock.uptime_ms().saturating_sub(started_ms)) / 1000
            );
        }
        result
    }

    fn run_game(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        notifier: &mut impl NotifierPort,
        signal: &mut impl StartSignalPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.gate.wait_for_start(hw, signal, notifier, clock);
        self.set_phase(GamePhase::Running, sink);

        // The probe fixture powers up with the room, so the reference is
        // taken here and not at construction.
        let baseline = self.thermometer.capture_baseline(hw, clock)?;
        sink.emit(&GameEvent::BaselineCaptured { celsius: baseline });

        loop {
            for trigger in &mut self.triggers {
                if trigger.check_and_fire(hw, notifier, clock)? {
                    sink.emit(&GameEvent::TriggerFired {
                        path: trigger.path(),
                    });
                }
            }

            if self.thermometer.check_and_fire(hw, notifier, clock)? {
                sink.emit(&GameEvent::ThresholdCrossed {
                    baseline_c: baseline,
                    celsius: self.thermometer.last_celsius().unwrap_or(baseline),
                });
                self.actuation.run(hw, clock, sink);
                self.set_phase(GamePhase::Complete, sink);
                return Ok(());
            }

            // Deliberate tight poll; the short idle keeps a core from
            // pegging without changing observable behaviour.
            clock.sleep(self.poll_idle);
        }
    }

    fn set_phase(&mut self, to: GamePhase, sink: &mut impl EventSink) {
        let from = self.phase;
        if from == to {
            return;
        }
        info!("phase: {:?} -> {:?}", from, to);
        self.phase = to;
        sink.emit(&GameEvent::PhaseChanged { from, to });
    }
}
