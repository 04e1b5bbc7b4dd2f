/*!
General-purpose I/O cores.

- `GpoCore`: 16-bit output register driving the LED row. Supports whole-word
  writes and single-bit writes.
- `GpiCore`: 16-bit input register sampled from the slide switches. The
  "device side" (`set`, `toggle`, `clear`) is what a host or test uses to
  move switches; the game only ever calls `read`.
*/

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GpoCore {
    // Bit set = LED on.
    data: u16,
}

impl GpoCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one output bit. Indices past bit 15 are ignored.
    pub fn write_bit(&mut self, on: bool, index: usize) {
        if index >= 16 {
            return;
        }
        if on {
            self.data |= 1 << index;
        } else {
            self.data &= !(1 << index);
        }
    }

    pub fn read(&self) -> u16 {
        self.data
    }

    pub fn is_on(&self, index: usize) -> bool {
        index < 16 && self.data & (1 << index) != 0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GpiCore {
    // Current switch positions. Bit set = switch up.
    data: u16,
}

impl GpiCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> u16 {
        self.data
    }

    // Device side.

    pub fn set(&mut self, data: u16) {
        self.data = data;
    }

    pub fn toggle(&mut self, index: usize) {
        if index < 16 {
            self.data ^= 1 << index;
        }
    }

    pub fn clear(&mut self) {
        self.data = 0;
    }
}
