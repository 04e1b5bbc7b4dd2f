/*!
Self-playing demo host.

Both players are simulated on top of the board models in `crate::cores`:
- Player one types a random bound key into the PS/2 core after a random pause.
  Now and then they fumble an unbound key, which the game ignores.
- Player two reacts to each key with a random delay and flips exactly that
  key's switch. Delays are drawn past the race window often enough for
  player one to win races too.

Timing is taken from the host's own clock; the game engine uses its own. Only
relative times matter, so the two don't need a common epoch.
*/

use rand::Rng;

use crate::clock::Clock;
use crate::cores::Console;
use crate::game::keymap::{Keymap, KeyBinding};
use crate::peripherals::InputSource;

/// Timing and accuracy of the two simulated players.
#[derive(Clone, Debug, PartialEq)]
pub struct BotProfile {
    /// Pause before player one's next key, drawn from this range.
    pub press_gap_ms: (u64, u64),
    /// Player two's reaction delay, drawn from this range.
    pub reaction_ms: (u64, u64),
    /// Chance that player one hits an unbound key instead.
    pub stray_key_chance: f64,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            press_gap_ms: (150, 600),
            reaction_ms: (250, 1100),
            stray_key_chance: 0.05,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct PendingAnswer {
    at_ms: u64,
    switches: u16,
}

pub struct BotHost<C, R> {
    console: Console,
    clock: C,
    rng: R,
    profile: BotProfile,
    keymap: Keymap,
    next_press_at: Option<u64>,
    answer: Option<PendingAnswer>,
}

impl<C: Clock, R: Rng> BotHost<C, R> {
    pub fn new(clock: C, rng: R, profile: BotProfile) -> Self {
        Self {
            console: Console::new(),
            clock,
            rng,
            profile,
            keymap: Keymap::standard(),
            next_press_at: None,
            answer: None,
        }
    }

    fn draw(&mut self, (lo, hi): (u64, u64)) -> u64 {
        if hi <= lo { lo } else { self.rng.gen_range(lo..=hi) }
    }

    /// Player one: queue a key stroke once the current pause has elapsed.
    fn maybe_press(&mut self, now: u64) {
        let due = match self.next_press_at {
            Some(at) => at,
            None => {
                let at = now + self.draw(self.profile.press_gap_ms);
                self.next_press_at = Some(at);
                at
            }
        };
        if now < due || self.console.ps2.rx_pending() {
            return;
        }
        self.next_press_at = None;

        let key = if self.rng.gen_bool(self.profile.stray_key_chance.clamp(0.0, 1.0)) {
            'z'
        } else {
            let bindings = self.keymap.bindings();
            bindings[self.rng.gen_range(0..bindings.len())].key
        };
        self.console.ps2.press(key);
    }

    /// Player two: plan the switch flip for the key that was just delivered.
    fn arm_answer(&mut self, now: u64, binding: KeyBinding) {
        let delay = self.draw(self.profile.reaction_ms);
        self.answer = Some(PendingAnswer {
            at_ms: now + delay,
            switches: binding.response,
        });
    }
}

impl<C: Clock, R: Rng> InputSource for BotHost<C, R> {
    fn next_key_event(&mut self) -> Option<char> {
        let now = self.clock.now_ms();
        self.maybe_press(now);

        let key = self.console.next_key_event()?;
        // Each race starts from all switches down.
        self.console.switches.clear();
        self.answer = None;
        if let Some(binding) = self.keymap.lookup(key) {
            self.arm_answer(now, binding);
        }
        Some(key)
    }

    fn read_switch_vector(&mut self) -> u16 {
        if let Some(answer) = self.answer {
            if self.clock.now_ms() >= answer.at_ms {
                self.console.switches.set(answer.switches);
                self.answer = None;
            }
        }
        self.console.read_switch_vector()
    }
}
