/*!
Race resolution for a single key event.

Order of operations (fixed):
1. Light the binding's indicator.
2. Take the start time; the window closes `duration_ms` later.
3. Busy-poll the switch vector. The first sample whose masked value equals the
   binding's response ends the race for player two. No debounce: the
   comparison is exact equality, so a single matching sample is enough.
4. Clear the indicator, whatever the outcome.
5. Report who won.

The loop spins on the clock; it never sleeps or yields, and nothing can abort
it early. Key events that arrive meanwhile stay queued in the input source.
*/

use crate::clock::Clock;
use crate::game::keymap::KeyBinding;
use crate::peripherals::{IndicatorOutput, InputSource};

/// Who scores for one key event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RaceOutcome {
    /// Player two did not answer inside the window.
    PlayerOneWins,
    /// Player two presented the matching switch pattern in time.
    PlayerTwoWins,
}

/// Race timing and comparison parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RaceWindow {
    pub duration_ms: u64,
    /// Bits of the switch vector taken into account.
    pub response_mask: u16,
}

impl RaceWindow {
    pub const fn new(duration_ms: u64, response_mask: u16) -> Self {
        Self {
            duration_ms,
            response_mask,
        }
    }

    /// Whether a switch snapshot answers `binding`.
    #[inline]
    pub fn matches(&self, binding: &KeyBinding, switches: u16) -> bool {
        switches & self.response_mask == binding.response
    }
}

/// Run one race for `binding` and return its outcome.
pub fn resolve_race<I, L, C>(
    binding: &KeyBinding,
    window: &RaceWindow,
    input: &mut I,
    indicators: &mut L,
    clock: &C,
) -> RaceOutcome
where
    I: InputSource + ?Sized,
    L: IndicatorOutput + ?Sized,
    C: Clock + ?Sized,
{
    indicators.set_indicator(binding.indicator, true);

    let start = clock.now_ms();
    // Consumed at most once per call; a second match in the same window can't score twice.
    let mut checked = false;
    while clock.now_ms().saturating_sub(start) < window.duration_ms {
        let switches = input.read_switch_vector();
        if window.matches(binding, switches) && !checked {
            checked = true;
            break;
        }
        std::hint::spin_loop();
    }

    indicators.set_indicator(binding.indicator, false);

    if checked {
        RaceOutcome::PlayerTwoWins
    } else {
        RaceOutcome::PlayerOneWins
    }
}
