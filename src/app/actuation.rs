//! Terminal two-stage actuation: power relay, then the timed hatch.
//!
//! Runs exactly once, when the thermometer trigger fires, and cannot be
//! cancelled — it is the last thing a game run does.

use core::time::Duration;

use log::info;

use super::events::GameEvent;
use super::ports::{ActuatorPort, ClockPort, EventSink};

/// The two physical outputs driven by the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Relay,
    Hatch,
}

/// Fixed, ordered, timed output sequence.
pub struct ActuationSequence {
    relay_gpio: i32,
    hatch_gpio: i32,
    relay_hold: Duration,
    hatch_hold: Duration,
}

impl ActuationSequence {
    pub fn new(
        relay_gpio: i32,
        hatch_gpio: i32,
        relay_hold: Duration,
        hatch_hold: Duration,
    ) -> Self {
        Self {
            relay_gpio,
            hatch_gpio,
            relay_hold,
            hatch_hold,
        }
    }

    /// Run the sequence to completion.
    ///
    /// The relay stays energised on return; only the hatch output is
    /// released.  Both holds are plain blocking sleeps — there is nothing to
    /// interleave with once the game is won.
    pub fn run(
        &self,
        hw: &mut impl ActuatorPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        info!("actuation: relay on ({:?} hold)", self.relay_hold);
        hw.write_pin(self.relay_gpio, true);
        sink.emit(&GameEvent::StageEngaged(Stage::Relay));
        // The relay hold covers the audio cue playing elsewhere in the room.
        clock.sleep(self.relay_hold);

        info!("actuation: hatch open ({:?} hold)", self.hatch_hold);
        hw.write_pin(self.hatch_gpio, true);
        sink.emit(&GameEvent::StageEngaged(Stage::Hatch));
        clock.sleep(self.hatch_hold);

        hw.write_pin(self.hatch_gpio, false);
        sink.emit(&GameEvent::StageReleased(Stage::Hatch));
        info!("actuation: complete, relay left on");
    }
}
