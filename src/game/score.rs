/*!
Match state: two running scores and the sticky "resolved" flag.

Rules:
- Each resolved race adds `points_per_hit` to exactly one player.
- After a score update, the match resolves once either score is strictly
  above `win_threshold`. Reaching the threshold exactly does not end it.
- Once resolved, outcomes are discarded: scores never change again.
- The display buffer is derived from the state, never stored separately.
*/

use crate::game::digits::{compose, compose_final};
use crate::game::race::RaceOutcome;
use crate::peripherals::DIGIT_COUNT;

/// Which side the match ended in favour of, by final score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchState {
    player_one_score: u32,
    player_two_score: u32,
    resolved: bool,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_one_score(&self) -> u32 {
        self.player_one_score
    }

    pub fn player_two_score(&self) -> u32 {
        self.player_two_score
    }

    pub fn resolved(&self) -> bool {
        self.resolved
    }

    /// Apply one race outcome. Returns `false` (and changes nothing) when the
    /// match is already resolved.
    pub fn record(&mut self, outcome: RaceOutcome, points_per_hit: u32, win_threshold: u32) -> bool {
        if self.resolved {
            return false;
        }
        match outcome {
            RaceOutcome::PlayerOneWins => {
                self.player_one_score = self.player_one_score.saturating_add(points_per_hit)
            }
            RaceOutcome::PlayerTwoWins => {
                self.player_two_score = self.player_two_score.saturating_add(points_per_hit)
            }
        }
        let one_over = self.player_one_score > win_threshold;
        let two_over = self.player_two_score > win_threshold;
        // Only one side scores per event, so both can't cross on the same one.
        debug_assert!(
            !(one_over && two_over),
            "both scores above threshold: {} / {}",
            self.player_one_score,
            self.player_two_score
        );
        if one_over || two_over {
            self.resolved = true;
        }
        true
    }

    /// Side with the strictly greater score; ties go to player two.
    pub fn leader(&self) -> Side {
        if self.player_one_score > self.player_two_score {
            Side::PlayerOne
        } else {
            Side::PlayerTwo
        }
    }

    /// Display buffer for the current state.
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        if self.resolved {
            compose_final(self.player_one_score, self.player_two_score)
        } else {
            compose(self.player_one_score, self.player_two_score)
        }
    }
}
