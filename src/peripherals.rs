/*!
peripherals: trait seams between the game engine and the hardware it drives.

The engine never touches a concrete device. It talks to three collaborators:

- `InputSource`: key-press events (one character per key-down) and an
  instantaneous snapshot of the 16-bit switch vector.
- `DisplayOutput`: the eight-digit display (one 4-bit value per position)
  plus a decimal-point mask.
- `IndicatorOutput`: sixteen single-bit lamps.

Writes are fire-and-forget: they are assumed to take effect before the call
returns, with no acknowledgement or backpressure.

Concrete implementors:
- `crate::cores::{Console, Panel}`: in-memory models of the keyboard, switch,
  LED and seven-segment cores.
- `crate::host`: process-level hosts (self-playing demo, terminal).
- Test doubles in `crate::test_utils`.
*/

/// Number of positions on the digit display.
pub const DIGIT_COUNT: usize = 8;

/// Number of indicator lamps / switches addressable by the game.
pub const INDICATOR_COUNT: usize = 16;

/// Source of key events and switch snapshots.
pub trait InputSource {
    /// Non-blocking poll. `None` means no key event is pending right now.
    ///
    /// Events that arrive while the engine is busy (e.g. inside a race window)
    /// must stay queued and be returned by later calls, in arrival order.
    fn next_key_event(&mut self) -> Option<char>;

    /// Point-in-time snapshot of the switch vector, one bit per switch.
    fn read_switch_vector(&mut self) -> u16;
}

/// Eight-digit display. Positions are 0..=7, values 0..=15.
pub trait DisplayOutput {
    fn set_digit(&mut self, position: usize, value: u8);

    /// Bit `n` set lights the decimal point of digit `n`.
    fn set_decimal_points(&mut self, mask: u8);

    /// Push a full digit array, position 0 first.
    fn write_digits(&mut self, digits: &[u8; DIGIT_COUNT]) {
        for (position, &value) in digits.iter().enumerate() {
            self.set_digit(position, value);
        }
    }
}

/// Indexed on/off lamps.
pub trait IndicatorOutput {
    fn set_indicator(&mut self, index: usize, on: bool);
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    #[inline]
    fn next_key_event(&mut self) -> Option<char> {
        (**self).next_key_event()
    }

    #[inline]
    fn read_switch_vector(&mut self) -> u16 {
        (**self).read_switch_vector()
    }
}

impl<T: DisplayOutput + ?Sized> DisplayOutput for &mut T {
    #[inline]
    fn set_digit(&mut self, position: usize, value: u8) {
        (**self).set_digit(position, value)
    }

    #[inline]
    fn set_decimal_points(&mut self, mask: u8) {
        (**self).set_decimal_points(mask)
    }
}

impl<T: IndicatorOutput + ?Sized> IndicatorOutput for &mut T {
    #[inline]
    fn set_indicator(&mut self, index: usize, on: bool) {
        (**self).set_indicator(index, on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal display that only remembers the last value per position.
    #[derive(Default)]
    struct Digits {
        values: [u8; DIGIT_COUNT],
        writes: usize,
    }

    impl DisplayOutput for Digits {
        fn set_digit(&mut self, position: usize, value: u8) {
            self.values[position] = value;
            self.writes += 1;
        }

        fn set_decimal_points(&mut self, _mask: u8) {}
    }

    #[test]
    fn write_digits_sets_every_position_in_order() {
        let mut d = Digits::default();
        d.write_digits(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(d.values, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(d.writes, DIGIT_COUNT);
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut d = Digits::default();
        {
            let mut r = &mut d;
            DisplayOutput::set_digit(&mut r, 3, 9);
        }
        assert_eq!(d.values[3], 9);
    }
}
