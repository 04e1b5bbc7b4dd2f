/*!
Key binding table.

Behavior:
- Each playable key is a lowercase letter `a`..`p`. Pressing it lights one
  indicator and opens a race that player two wins by presenting exactly one
  switch bit.
- The standard table binds the n-th letter to indicator n and switch bit n:

  ```text
  key:        a  b  c  d  e  f  g  h  i  j  k  l  m  n  o  p
  indicator:  0  1  2  3  4  5  6  7  8  9  10 11 12 13 14 15
  response:   bit 0 (0x0001) ... bit 15 (0x8000)
  ```

- Anything else (other characters, the "no key" sentinel) has no binding and
  is ignored by the engine.

Notes:
- A table is validated once when constructed: keys, indicators and response
  bits must all be distinct, responses must be single bits, and indicators
  must be addressable. A table that fails is a configuration error.
*/

use crate::error::KeymapError;
use crate::peripherals::INDICATOR_COUNT;

/// One playable key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: char,
    /// Lamp lit while this key's race is open.
    pub indicator: usize,
    /// Switch pattern that answers the key. Exactly one bit set.
    pub response: u16,
}

impl KeyBinding {
    pub const fn new(key: char, indicator: usize, response: u16) -> Self {
        Self {
            key,
            indicator,
            response,
        }
    }
}

const fn standard_bindings() -> [KeyBinding; INDICATOR_COUNT] {
    let mut table = [KeyBinding::new('a', 0, 1); INDICATOR_COUNT];
    let mut i = 0;
    while i < INDICATOR_COUNT {
        table[i] = KeyBinding::new((b'a' + i as u8) as char, i, 1 << i);
        i += 1;
    }
    table
}

/// The sixteen bindings `a`..`p`.
pub const STANDARD_BINDINGS: [KeyBinding; INDICATOR_COUNT] = standard_bindings();

/// Look a character up in the standard table.
#[inline]
pub fn lookup(key: char) -> Option<KeyBinding> {
    STANDARD_BINDINGS.iter().copied().find(|b| b.key == key)
}

/// A validated, immutable set of bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::standard()
    }
}

impl Keymap {
    /// The standard `a`..`p` table.
    pub fn standard() -> Self {
        // The standard table satisfies every rule checked in `new`.
        Self {
            bindings: STANDARD_BINDINGS.to_vec(),
        }
    }

    /// Build a table from arbitrary bindings, rejecting any collision.
    pub fn new(bindings: Vec<KeyBinding>) -> Result<Self, KeymapError> {
        validate(&bindings)?;
        Ok(Self { bindings })
    }

    #[inline]
    pub fn lookup(&self, key: char) -> Option<KeyBinding> {
        self.bindings.iter().copied().find(|b| b.key == key)
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}

/// Check that no two bindings share a key, an indicator or a response bit.
pub fn validate(bindings: &[KeyBinding]) -> Result<(), KeymapError> {
    if bindings.is_empty() {
        return Err(KeymapError::Empty);
    }
    for (i, b) in bindings.iter().enumerate() {
        if b.response.count_ones() != 1 {
            return Err(KeymapError::ResponseNotSingleBit {
                key: b.key,
                mask: b.response,
            });
        }
        if b.indicator >= INDICATOR_COUNT {
            return Err(KeymapError::IndicatorOutOfRange {
                key: b.key,
                index: b.indicator,
                limit: INDICATOR_COUNT,
            });
        }
        for earlier in &bindings[..i] {
            if earlier.key == b.key {
                return Err(KeymapError::DuplicateKey(b.key));
            }
            if earlier.indicator == b.indicator {
                return Err(KeymapError::DuplicateIndicator {
                    index: b.indicator,
                    first: earlier.key,
                    second: b.key,
                });
            }
            if earlier.response == b.response {
                return Err(KeymapError::DuplicateResponse {
                    mask: b.response,
                    first: earlier.key,
                    second: b.key,
                });
            }
        }
    }
    Ok(())
}

/// Check that every response bit can be seen through the switch `mask`.
/// A bit outside it could never be matched, so player two could never win
/// that key's races.
pub fn validate_response_mask(bindings: &[KeyBinding], mask: u16) -> Result<(), KeymapError> {
    match bindings.iter().find(|b| b.response & mask != b.response) {
        Some(b) => Err(KeymapError::ResponseOutsideMask {
            key: b.key,
            response: b.response,
            mask,
        }),
        None => Ok(()),
    }
}
