//! GPIO pin assignments for the RoomCtl controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Room trigger inputs
// ---------------------------------------------------------------------------
//
// Reed contacts hidden in the three puzzle props, wired normally-closed to
// ground.  Solving a puzzle opens the contact and the pull-up drags the line
// HIGH.

/// Workshop ("atelier") puzzle contact.
pub const ATELIER_GPIO: i32 = 11;
/// Cellar ("caveau") puzzle contact.
pub const CAVEAU_GPIO: i32 = 5;
/// Greenhouse ("serre") puzzle contact.
pub const SERRE_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Start button
// ---------------------------------------------------------------------------

/// Game-master start button — momentary, active-low with pull-up.
pub const START_BUTTON_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Temperature probe
// ---------------------------------------------------------------------------

/// One-wire bus for the DS18B20 probe in the greenhouse heat lamp fixture.
pub const PROBE_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Actuation outputs
// ---------------------------------------------------------------------------

/// Stage A: power relay for the final mechanism (stays on once engaged).
pub const RELAY_GPIO: i32 = 21;
/// Stage B: hatch solenoid, held open for a fixed window then released.
pub const HATCH_GPIO: i32 = 20;

/// Every input claimed at init time (all configured with pull-ups).
pub const INPUT_GPIOS: [i32; 4] = [START_BUTTON_GPIO, ATELIER_GPIO, CAVEAU_GPIO, SERRE_GPIO];

/// Every output claimed at init time, released when a game run ends.
pub const OUTPUT_GPIOS: [i32; 2] = [RELAY_GPIO, HATCH_GPIO];
