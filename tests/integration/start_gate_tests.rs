//! Start-gate scenarios through the full orchestrator: network-token start
//! and the button-only fallback.

use crate::mock_hw::{MockClock, MockHardware, MockNotifier, MockStartSignal, RecordingSink};

use roomctl::adapters::net_start::NullStartSignal;
use roomctl::app::service::{GamePhase, GameService};
use roomctl::config::GameConfig;

#[test]
fn network_token_starts_the_game() {
    let mut hw = MockHardware::idle(); // button stays up
    hw.script_temps(&[20.0, 23.0]);
    // A silent poll, a stray token to ignore, then the real signal.
    let mut signal = MockStartSignal::with_tokens(&[None, Some("tirez"), Some("start")]);

    let mut notifier = MockNotifier::new();
    let mut clock = MockClock::new();
    let mut sink = RecordingSink::new();
    let mut game = GameService::new(&GameConfig::default());

    game.run(&mut hw, &mut notifier, &mut signal, &mut clock, &mut sink)
        .unwrap();

    assert_eq!(game.phase(), GamePhase::Complete);
    assert_eq!(notifier.sent[..2], ["start", "machine"]);
    // Three gate polls, two of them rejected → the button was read three
    // times before the loop broke.
    assert!(hw.pin_reads >= 3);
}

#[test]
fn button_fallback_works_without_a_listener() {
    let mut hw = MockHardware::idle();
    hw.press_start();
    hw.script_temps(&[20.0, 23.0]);

    let mut notifier = MockNotifier::new();
    let mut clock = MockClock::new();
    let mut sink = RecordingSink::new();
    let mut game = GameService::new(&GameConfig::default());

    // The production fallback when the TCP bind fails.
    let mut signal = NullStartSignal;
    game.run(&mut hw, &mut notifier, &mut signal, &mut clock, &mut sink)
        .unwrap();

    assert_eq!(game.phase(), GamePhase::Complete);
    assert_eq!(notifier.sent, ["start", "machine", "temperature"]);
}
