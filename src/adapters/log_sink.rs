//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured game events to the serial
//! logger.  A future telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::GameEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`GameEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            GameEvent::TriggerFired { path } => {
                info!("TRIGGER | '{}' notified", path);
            }
            GameEvent::BaselineCaptured { celsius } => {
                info!("BASELINE | {:.2} \u{00b0}C", celsius);
            }
            GameEvent::ThresholdCrossed {
                baseline_c,
                celsius,
            } => {
                info!(
                    "THRESHOLD | {:.2} \u{00b0}C (baseline {:.2} \u{00b0}C)",
                    celsius, baseline_c
                );
            }
            GameEvent::StageEngaged(stage) => {
                info!("STAGE | {:?} engaged", stage);
            }
            GameEvent::StageReleased(stage) => {
                info!("STAGE | {:?} released", stage);
            }
        }
    }
}
