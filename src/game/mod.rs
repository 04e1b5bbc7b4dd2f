/*!
Two-player reaction game.

Player one presses a key (`a`..`p`); its indicator lights and a race window
opens. Player two answers by presenting exactly that key's switch bit before
the window closes. Whoever wins the race gets 100 points, and the first score
strictly above 900 ends the match.

Match loop states:

```text
AwaitingInput --key--> Racing --> ScoredContinue --> AwaitingInput
                              \-> ScoredTerminal --> MatchOver
```

- `AwaitingInput`: polling the input source for the next key event.
  Unbound characters are dropped here without touching the display.
- `Racing`: inside `race::resolve_race` (busy-poll with deadline).
- `ScoredContinue` / `ScoredTerminal`: the outcome was applied and the
  digits pushed; terminal when the match just resolved.
- `MatchOver`: final digits (with the win marker) pushed, settle delay and
  closing indicator sweep done. The caller starts a new match.

The engine owns its collaborators; pass `&mut` handles to keep ownership on
the caller's side. Everything runs on the caller's thread.
*/

pub mod digits;
pub mod keymap;
pub mod race;
pub mod score;


use log::{debug, info, trace};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::error::Error;
use crate::peripherals::{DisplayOutput, IndicatorOutput, InputSource};

use self::keymap::{Keymap, validate as validate_keymap, validate_response_mask};
use self::race::{RaceOutcome, RaceWindow, resolve_race};
use self::score::{MatchState, Side};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingInput,
    Racing,
    ScoredContinue,
    ScoredTerminal,
    MatchOver,
}

/// What a single key event did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyEventResult {
    /// No binding for the character; nothing happened.
    Ignored,
    /// A race ran and its outcome was applied to the scores.
    Scored(RaceOutcome),
    /// A race ran after the match was resolved; the outcome was dropped.
    Discarded(RaceOutcome),
}

/// Summary of a finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub player_one_score: u32,
    pub player_two_score: u32,
    pub winner: Side,
    /// Key events that ran a race (ignored characters excluded).
    pub races: u32,
}

pub struct ReactionGame<I, O, C> {
    input: I,
    output: O,
    clock: C,
    config: GameConfig,
    keymap: Keymap,
    state: MatchState,
    phase: MatchPhase,
    races: u32,
}

impl<I, O, C> ReactionGame<I, O, C>
where
    I: InputSource,
    O: DisplayOutput + IndicatorOutput,
    C: Clock,
{
    /// Engine with the standard `a`..`p` bindings.
    pub fn new(input: I, output: O, clock: C, config: GameConfig) -> Result<Self, Error> {
        Self::with_keymap(input, output, clock, config, Keymap::standard())
    }

    /// Engine with a custom binding table. The table is re-validated here.
    pub fn with_keymap(
        input: I,
        output: O,
        clock: C,
        config: GameConfig,
        keymap: Keymap,
    ) -> Result<Self, Error> {
        config.validate()?;
        validate_keymap(keymap.bindings())?;
        validate_response_mask(keymap.bindings(), config.response_mask)?;
        Ok(Self {
            input,
            output,
            clock,
            config,
            keymap,
            state: MatchState::new(),
            phase: MatchPhase::AwaitingInput,
            races: 0,
        })
    }

    // -------------- Accessors --------------

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    // -------------- Match loop --------------

    /// Reset to a fresh match and bring the display up: announce, walk the
    /// indicators, clear the decimal points and show all zeros.
    pub fn begin_match(&mut self) {
        self.state = MatchState::new();
        self.phase = MatchPhase::AwaitingInput;
        self.races = 0;

        info!("Ready to begin game!");
        self.sweep_indicators();
        self.output.set_decimal_points(0);
        self.push_digits();
    }

    /// Play one match, checking `stop` between steps, and report the result.
    /// Returns `None` when stopped before the match was over. A race or sweep in progress always
    /// runs to its end first.
    pub fn run_match_until(&mut self, mut stop: impl FnMut() -> bool) -> Option<MatchReport> {
        self.begin_match();
        while self.step() != MatchPhase::MatchOver {
            if stop() {
                return None;
            }
        }
        Some(self.report())
    }

    /// Advance the state machine by at most one key event.
    pub fn step(&mut self) -> MatchPhase {
        match self.phase {
            MatchPhase::MatchOver => return MatchPhase::MatchOver,
            MatchPhase::ScoredTerminal => {
                self.finish_match();
                return self.phase;
            }
            _ => {}
        }

        self.phase = MatchPhase::AwaitingInput;
        if let Some(key) = self.input.next_key_event() {
            self.handle_key_event(key);
        }
        self.phase
    }

    /// Process one key event: look it up, race, score, refresh the display.
    pub fn handle_key_event(&mut self, key: char) -> KeyEventResult {
        let Some(binding) = self.keymap.lookup(key) else {
            trace!("ignoring unbound key {key:?}");
            return KeyEventResult::Ignored;
        };

        let previous = self.phase;
        self.phase = MatchPhase::Racing;
        let window = RaceWindow::new(self.config.race_window_ms, self.config.response_mask);
        let outcome = resolve_race(
            &binding,
            &window,
            &mut self.input,
            &mut self.output,
            &self.clock,
        );
        self.races += 1;

        if !self
            .state
            .record(outcome, self.config.points_per_hit, self.config.win_threshold)
        {
            trace!("match already resolved, discarding {outcome:?} for {key:?}");
            self.phase = previous;
            return KeyEventResult::Discarded(outcome);
        }

        debug!(
            "key {:?}: {:?} -> {} / {}",
            key,
            outcome,
            self.state.player_one_score(),
            self.state.player_two_score()
        );
        self.push_digits();
        self.phase = if self.state.resolved() {
            MatchPhase::ScoredTerminal
        } else {
            MatchPhase::ScoredContinue
        };
        KeyEventResult::Scored(outcome)
    }

    /// Show the final digits, hold them, then close with an indicator sweep.
    fn finish_match(&mut self) {
        self.push_digits();
        self.clock.sleep_ms(self.config.settle_ms);
        info!(
            "Game over: {} / {} ({:?} ahead)",
            self.state.player_one_score(),
            self.state.player_two_score(),
            self.state.leader()
        );
        self.sweep_indicators();
        self.phase = MatchPhase::MatchOver;
    }

    pub fn report(&self) -> MatchReport {
        MatchReport {
            player_one_score: self.state.player_one_score(),
            player_two_score: self.state.player_two_score(),
            winner: self.state.leader(),
            races: self.races,
        }
    }

    fn push_digits(&mut self) {
        let digits = self.state.digits();
        self.output.write_digits(&digits);
    }

    /// Light each indicator in turn for one sweep step.
    fn sweep_indicators(&mut self) {
        let step = self.config.sweep_step_ms;
        for index in 0..self.config.indicator_count {
            self.output.set_indicator(index, true);
            self.clock.sleep_ms(step);
            self.output.set_indicator(index, false);
            self.clock.sleep_ms(step);
        }
    }
}
