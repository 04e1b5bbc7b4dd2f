/*!
Eight-digit seven-segment display core.

Register model:
- One 8-bit pattern per digit, active low (a cleared bit lights the segment):

  ```text
  bit:      7   6   5   4   3   2   1   0
  segment:  dp  g   f   e   d   c   b   a
  ```

- A separate decimal-point mask, active high (bit n set = point n lit). It is
  merged into bit 7 of each pattern when the digit is read back for rendering.
- Position 0 is the rightmost digit.

`h2s` converts a hex value 0..=15 to its segment pattern.
*/

use crate::peripherals::DIGIT_COUNT;

/// Segment patterns for 0..=F, active low, decimal point off.
const HEX_TO_SEGMENTS: [u8; 16] = [
    0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, // 0-7
    0x80, 0x90, 0x88, 0x83, 0xC6, 0xA1, 0x86, 0x8E, // 8-F
];

/// Every segment off.
pub const BLANK: u8 = 0xFF;

/// Hex value to segment pattern. Values above 15 use their low nibble.
#[inline]
pub fn h2s(value: u8) -> u8 {
    HEX_TO_SEGMENTS[(value & 0x0F) as usize]
}

/// Segment pattern back to its hex value, ignoring the decimal point.
pub fn s2h(pattern: u8) -> Option<u8> {
    let pattern = pattern | 0x80;
    HEX_TO_SEGMENTS
        .iter()
        .position(|&p| p == pattern)
        .map(|v| v as u8)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SsegCore {
    patterns: [u8; DIGIT_COUNT],
    dp: u8,
}

impl Default for SsegCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SsegCore {
    pub fn new() -> Self {
        Self {
            patterns: [BLANK; DIGIT_COUNT],
            dp: 0,
        }
    }

    /// Write a raw pattern to one digit. Out-of-range positions are ignored.
    pub fn write_pattern(&mut self, pattern: u8, position: usize) {
        if let Some(slot) = self.patterns.get_mut(position) {
            *slot = pattern;
        }
    }

    pub fn set_dp(&mut self, mask: u8) {
        self.dp = mask;
    }

    /// Pattern as driven to the display, with the decimal point merged in.
    pub fn pattern(&self, position: usize) -> u8 {
        let raw = self.patterns[position];
        if self.dp & (1 << position) != 0 {
            raw & 0x7F
        } else {
            raw | 0x80
        }
    }

    /// Hex value currently shown at `position`, if the pattern is a hex digit.
    pub fn value(&self, position: usize) -> Option<u8> {
        s2h(self.patterns[position])
    }

    /// Left-to-right text rendering (position 7 first); blank or unknown
    /// patterns show as a space, lit decimal points as '.'.
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity(DIGIT_COUNT * 2);
        for position in (0..DIGIT_COUNT).rev() {
            match self.value(position) {
                Some(v) => s.push(char::from_digit(v as u32, 16).unwrap_or(' ').to_ascii_uppercase()),
                None => s.push(' '),
            }
            if self.dp & (1 << position) != 0 {
                s.push('.');
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h2s_known_patterns() {
        assert_eq!(h2s(0), 0xC0);
        assert_eq!(h2s(1), 0xF9);
        assert_eq!(h2s(8), 0x80);
        assert_eq!(h2s(0xF), 0x8E);
        assert_eq!(h2s(0x11), h2s(1));
    }

    #[test]
    fn s2h_inverts_h2s() {
        for v in 0..16u8 {
            assert_eq!(s2h(h2s(v)), Some(v));
            assert_eq!(s2h(h2s(v) & 0x7F), Some(v), "decimal point must be ignored");
        }
        assert_eq!(s2h(BLANK), None);
    }

    #[test]
    fn decimal_point_merges_into_bit_seven() {
        let mut s = SsegCore::new();
        s.write_pattern(h2s(3), 2);
        s.set_dp(0b0000_0100);
        assert_eq!(s.pattern(2), h2s(3) & 0x7F);
        s.set_dp(0);
        assert_eq!(s.pattern(2), h2s(3));
    }

    #[test]
    fn text_reads_left_to_right() {
        let mut s = SsegCore::new();
        for (pos, v) in [0u8, 0, 1, 0, 0, 0, 7, 0].iter().enumerate() {
            s.write_pattern(h2s(*v), pos);
        }
        assert_eq!(s.to_text(), "07000100");
        s.set_dp(0x80);
        assert_eq!(s.to_text(), "0.7000100");
        assert_eq!(SsegCore::new().to_text(), "        ");
    }

    #[test]
    fn out_of_range_write_is_ignored() {
        let mut s = SsegCore::new();
        s.write_pattern(h2s(1), 8);
        assert_eq!(s, SsegCore::new());
    }
}
