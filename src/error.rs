/*!
Error types.

Only initialization can fail: a key-binding table that would make the game
ambiguous or unwinnable, or configuration values outside their valid range.
Once a `ReactionGame` has been constructed every operation is total.
*/

use thiserror::Error;

/// A malformed key-binding table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("key binding table is empty")]
    Empty,

    #[error("key {0:?} is bound more than once")]
    DuplicateKey(char),

    #[error("keys {first:?} and {second:?} share indicator {index}")]
    DuplicateIndicator { index: usize, first: char, second: char },

    #[error("keys {first:?} and {second:?} share response pattern 0x{mask:04X}")]
    DuplicateResponse { mask: u16, first: char, second: char },

    #[error("key {key:?} response pattern 0x{mask:04X} must have exactly one bit set")]
    ResponseNotSingleBit { key: char, mask: u16 },

    #[error("key {key:?} indicator {index} is out of range (limit {limit})")]
    IndicatorOutOfRange { key: char, index: usize, limit: usize },

    /// The switch bit can never be seen through the configured response mask.
    #[error("key {key:?} response pattern 0x{response:04X} lies outside response mask 0x{mask:04X}")]
    ResponseOutsideMask { key: char, response: u16, mask: u16 },
}

/// A `GameConfig` value outside its valid range.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("race window must be at least 1 ms")]
    ZeroRaceWindow,

    #[error("points per hit must be non-zero")]
    ZeroPointsPerHit,

    #[error("indicator count {0} is outside 1..=16")]
    IndicatorCount(usize),

    #[error("response mask must not be zero")]
    EmptyResponseMask,

    #[error("win threshold {threshold} plus {points} points per hit overflows the score")]
    ScoreOverflow { threshold: u32, points: u32 },
}

/// Initialization failure of the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid key bindings: {0}")]
    Keymap(#[from] KeymapError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
