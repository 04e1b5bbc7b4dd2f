//! Shared test doubles for the game's collaborators.
//!
//! These helpers de-duplicate host construction across the game, race and
//! core tests. They intentionally support just what the test suite needs.
//!
//! - `ManualClock`: deterministic time. Every `now_ms()` call advances the
//!   clock by a fixed step, so a busy-poll loop always terminates and the
//!   number of samples taken inside a window is predictable. Clones share the
//!   same time.
//! - `ScriptedInput`: queued key events, each paired with the switch response
//!   player two gives once that key's race starts (`Response`).
//! - `no_delay_config()`: default rules with the start/end delays removed, so
//!   tests only spend (simulated) time inside race windows.
//! - `RecordingOutput`: remembers the digit, decimal-point and indicator state
//!   and logs every write in order.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::peripherals::{
    DIGIT_COUNT, DisplayOutput, INDICATOR_COUNT, IndicatorOutput, InputSource,
};

pub fn no_delay_config() -> GameConfig {
    GameConfig {
        settle_ms: 0,
        sweep_step_ms: 0,
        ..GameConfig::default()
    }
}

/// Clock that advances `step_ms` per reading. `sleep_ms` jumps ahead.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    step_ms: u64,
}

impl ManualClock {
    pub fn new(step_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step_ms,
        }
    }

    /// Current time without advancing.
    pub fn peek(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step_ms);
        t
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

/// How player two answers one race.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Switches stay at the idle value for the whole window.
    Never,
    /// Switch vector becomes `value` once `delay_ms` have passed since the
    /// key event was delivered.
    After { delay_ms: u64, value: u16 },
}

/// Input that replays a list of key events and their responses.
#[derive(Debug)]
pub struct ScriptedInput {
    clock: ManualClock,
    keys: VecDeque<(char, Response)>,
    idle: u16,
    active: Option<(u64, Response)>,
    pub samples: usize,
    pub delivered: usize,
}

impl ScriptedInput {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            keys: VecDeque::new(),
            idle: 0,
            active: None,
            samples: 0,
            delivered: 0,
        }
    }

    /// Switch value presented outside a response.
    pub fn with_idle(mut self, idle: u16) -> Self {
        self.idle = idle;
        self
    }

    pub fn key(mut self, key: char, response: Response) -> Self {
        self.keys.push_back((key, response));
        self
    }

    /// `count` presses of `key` that player two never answers.
    pub fn unanswered(mut self, key: char, count: usize) -> Self {
        for _ in 0..count {
            self.keys.push_back((key, Response::Never));
        }
        self
    }

    pub fn push_key(&mut self, key: char, response: Response) {
        self.keys.push_back((key, response));
    }

    pub fn pending(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_key_event(&mut self) -> Option<char> {
        let (key, response) = self.keys.pop_front()?;
        self.active = Some((self.clock.peek(), response));
        self.delivered += 1;
        Some(key)
    }

    fn read_switch_vector(&mut self) -> u16 {
        self.samples += 1;
        let now = self.clock.peek();
        match self.active {
            Some((start, Response::After { delay_ms, value })) if now >= start + delay_ms => value,
            _ => self.idle,
        }
    }
}

/// One write seen by `RecordingOutput`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Recorded {
    Digit(usize, u8),
    DecimalPoints(u8),
    Indicator(usize, bool),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingOutput {
    pub digits: [u8; DIGIT_COUNT],
    pub decimal_points: u8,
    pub indicators: [bool; INDICATOR_COUNT],
    pub writes: Vec<Recorded>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete eight-digit pushes seen so far.
    pub fn digit_pushes(&self) -> usize {
        self.digit_writes() / DIGIT_COUNT
    }

    pub fn digit_writes(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, Recorded::Digit(..)))
            .count()
    }

    /// Indicator writes in order, as (index, on).
    pub fn indicator_writes(&self) -> Vec<(usize, bool)> {
        self.writes
            .iter()
            .filter_map(|w| match *w {
                Recorded::Indicator(i, on) => Some((i, on)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.writes.clear();
    }
}

impl DisplayOutput for RecordingOutput {
    fn set_digit(&mut self, position: usize, value: u8) {
        self.digits[position] = value;
        self.writes.push(Recorded::Digit(position, value));
    }

    fn set_decimal_points(&mut self, mask: u8) {
        self.decimal_points = mask;
        self.writes.push(Recorded::DecimalPoints(mask));
    }
}

impl IndicatorOutput for RecordingOutput {
    fn set_indicator(&mut self, index: usize, on: bool) {
        self.indicators[index] = on;
        self.writes.push(Recorded::Indicator(index, on));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_per_reading_and_shares_time() {
        let clock = ManualClock::new(2);
        let other = clock.clone();
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.now_ms(), 2);
        assert_eq!(other.peek(), 4);
        let mut other = other;
        other.sleep_ms(10);
        assert_eq!(clock.peek(), 14);
    }

    #[test]
    fn scripted_input_answers_after_delay() {
        let clock = ManualClock::new(1);
        let mut input = ScriptedInput::new(clock.clone()).key(
            'a',
            Response::After {
                delay_ms: 5,
                value: 0x0001,
            },
        );
        assert_eq!(input.read_switch_vector(), 0);
        assert_eq!(input.next_key_event(), Some('a'));
        assert_eq!(input.read_switch_vector(), 0);
        clock.advance(5);
        assert_eq!(input.read_switch_vector(), 0x0001);
        assert_eq!(input.next_key_event(), None);
    }

    #[test]
    fn recording_output_counts_pushes() {
        let mut out = RecordingOutput::new();
        out.write_digits(&[1, 2, 3, 4, 5, 6, 7, 8]);
        out.set_indicator(3, true);
        assert_eq!(out.digit_pushes(), 1);
        assert_eq!(out.indicator_writes(), vec![(3, true)]);
        assert!(out.indicators[3]);
    }
}
