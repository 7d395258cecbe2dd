//! Start synchronisation: blocks the run until the game master presses the
//! button or the show-control console sends the start token.

use core::time::Duration;

use log::{debug, info};

use crate::config::{GameConfig, PATH_MACHINE, PATH_START, START_TOKEN};

use super::ports::{ClockPort, NotifierPort, SensorPort, StartSignalPort};
use super::triggers::DigitalSensor;

/// Single-shot blocking gate between "armed but idle" and "actively polling".
pub struct StartGate {
    button: DigitalSensor,
    settle: Duration,
    idle: Duration,
    started: bool,
}

impl StartGate {
    pub fn new(button: DigitalSensor, config: &GameConfig) -> Self {
        Self {
            button,
            settle: Duration::from_secs(u64::from(config.start_settle_secs)),
            idle: Duration::from_millis(u64::from(config.poll_idle_ms)),
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Block until the start button reads active or the network start signal
    /// delivers the start token, then send the "start"/"machine" pair.
    ///
    /// The remote side needs a settling delay between "game has started" and
    /// "machine may be armed", hence the sleep between the two sends.
    ///
    /// Single-shot: the latch is set on the first return and later calls
    /// come back immediately without touching any port.
    pub fn wait_for_start(
        &mut self,
        hw: &mut impl SensorPort,
        signal: &mut impl StartSignalPort,
        notifier: &mut impl NotifierPort,
        clock: &mut impl ClockPort,
    ) {
        if self.started {
            return;
        }

        info!("waiting for start (button or '{}' token)", START_TOKEN);
        loop {
            if self.button.is_active(hw) {
                info!("start: button");
                break;
            }
            if let Some(token) = signal.poll_token() {
                if token.as_str() == START_TOKEN {
                    info!("start: network token");
                    break;
                }
                debug!("ignoring token '{}'", token);
            }
            clock.sleep(self.idle);
        }

        self.started = true;
        notifier.notify(PATH_START);
        clock.sleep(self.settle);
        notifier.notify(PATH_MACHINE);
    }
}
