//! Outbound application events.
//!
//! The [`GameService`](super::service::GameService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — today they go to the serial log.

use super::actuation::Stage;
use super::service::GamePhase;

/// Structured events emitted by the game core.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// The game moved between lifecycle phases.
    PhaseChanged { from: GamePhase, to: GamePhase },

    /// A room trigger latched and its notification was dispatched.
    TriggerFired { path: &'static str },

    /// The temperature reference was captured at game start.
    BaselineCaptured { celsius: f32 },

    /// The thermometer crossed baseline + delta and latched.
    ThresholdCrossed { baseline_c: f32, celsius: f32 },

    /// An actuation output was driven active.
    StageEngaged(Stage),

    /// An actuation output was driven back inactive.
    StageReleased(Stage),
}
