#![doc = r#"
Reflex duel library crate.

A two-player reaction game for a board with a PS/2 keyboard, sixteen slide
switches, sixteen LEDs and an eight-digit seven-segment display. Player one
presses a key; player two must flip the matching switch before the race
window closes.

Modules:
- clock: millisecond time source used for race deadlines and delays
- config: game constants (race window, win threshold, delays) and validation
- cores: in-memory models of the keyboard, switch, LED and seven-segment cores
- error: initialization errors (bad key bindings, bad configuration)
- game: the reaction game engine (key bindings, race resolver, scoring, digits)
- host: process-level hosts (self-playing demo, terminal with `terminal`)
- peripherals: traits the engine drives (input, digit display, indicators)

In tests, shared clock/input/output doubles are available under `crate::test_utils`.
"#]

pub mod clock;
pub mod config;
pub mod cores;
pub mod error;
pub mod game;
pub mod host;
pub mod peripherals;

// Re-export commonly used types at the crate root for convenience.
pub use clock::{Clock, SystemClock};
pub use config::GameConfig;
pub use error::Error;
pub use game::race::RaceOutcome;
pub use game::{KeyEventResult, MatchPhase, MatchReport, ReactionGame};
pub use peripherals::{DisplayOutput, IndicatorOutput, InputSource};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
