/*!
Game configuration.

Every constant the match depends on lives here with the value observed on the
board the game was tuned for. `validate()` runs once when the engine is built.
*/

use crate::error::ConfigError;
use crate::peripherals::INDICATOR_COUNT;

/// Time player two has to answer a key press.
pub const RACE_WINDOW_MS: u64 = 850;
/// A score strictly above this ends the match.
pub const WIN_THRESHOLD: u32 = 900;
/// Points awarded to the winner of a single race.
pub const POINTS_PER_HIT: u32 = 100;
/// Pause after the final score is shown.
pub const SETTLE_MS: u64 = 2000;
/// On and off time of each lamp during the indicator sweep.
pub const SWEEP_STEP_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub race_window_ms: u64,
    pub win_threshold: u32,
    pub points_per_hit: u32,
    pub settle_ms: u64,
    pub sweep_step_ms: u64,
    /// Lamps walked by the start/end sweep (0..indicator_count).
    pub indicator_count: usize,
    /// Switch bits taken into account when comparing against a response.
    /// With the full mask the whole vector must equal the expected bit.
    pub response_mask: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            race_window_ms: RACE_WINDOW_MS,
            win_threshold: WIN_THRESHOLD,
            points_per_hit: POINTS_PER_HIT,
            settle_ms: SETTLE_MS,
            sweep_step_ms: SWEEP_STEP_MS,
            indicator_count: INDICATOR_COUNT,
            response_mask: 0xFFFF,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.race_window_ms == 0 {
            return Err(ConfigError::ZeroRaceWindow);
        }
        if self.points_per_hit == 0 {
            return Err(ConfigError::ZeroPointsPerHit);
        }
        if self.indicator_count == 0 || self.indicator_count > INDICATOR_COUNT {
            return Err(ConfigError::IndicatorCount(self.indicator_count));
        }
        if self.response_mask == 0 {
            return Err(ConfigError::EmptyResponseMask);
        }
        // Scores never exceed threshold + one hit, so this bounds every score.
        if self.win_threshold.checked_add(self.points_per_hit).is_none() {
            return Err(ConfigError::ScoreOverflow {
                threshold: self.win_threshold,
                points: self.points_per_hit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_board_timing() {
        let c = GameConfig::default();
        assert_eq!(c.race_window_ms, 850);
        assert_eq!(c.win_threshold, 900);
        assert_eq!(c.points_per_hit, 100);
        assert_eq!(c.settle_ms, 2000);
        assert_eq!(c.indicator_count, 16);
        assert_eq!(c.response_mask, 0xFFFF);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut c = GameConfig::default();
        c.race_window_ms = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroRaceWindow));

        let mut c = GameConfig::default();
        c.points_per_hit = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroPointsPerHit));

        let mut c = GameConfig::default();
        c.indicator_count = 17;
        assert_eq!(c.validate(), Err(ConfigError::IndicatorCount(17)));

        let mut c = GameConfig::default();
        c.response_mask = 0;
        assert_eq!(c.validate(), Err(ConfigError::EmptyResponseMask));
    }

    #[test]
    fn rejects_threshold_that_would_overflow_scores() {
        let mut c = GameConfig::default();
        c.win_threshold = u32::MAX - 50;
        assert_eq!(
            c.validate(),
            Err(ConfigError::ScoreOverflow {
                threshold: u32::MAX - 50,
                points: 100
            })
        );

        c.win_threshold = u32::MAX - 100;
        assert!(c.validate().is_ok());
    }
}
