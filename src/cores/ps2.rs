/*!
PS/2 keyboard core: receive FIFO plus set-2 scan-code decoding.

Behavior:
- The device side pushes raw scan-code bytes into the receive FIFO
  (`push_scan_code`), or whole key strokes (`press`).
- `get_kb_ch` drains bytes until it can produce one character:
  * `F0 xx` is a break (key release) and produces nothing.
  * `E0` extended prefixes are skipped; extended keys produce nothing.
  * Left/right shift (`12` / `59`) are tracked and upper-case letters.
  * Unknown make codes are dropped with a warning.
- A sequence cut short by an empty FIFO (e.g. a lone `F0`) keeps its state
  until the next byte arrives.

Only the keys the harness uses are decoded: letters, digits, space, enter.
*/

use std::collections::VecDeque;

use log::warn;

const BREAK: u8 = 0xF0;
const EXTENDED: u8 = 0xE0;
const LEFT_SHIFT: u8 = 0x12;
const RIGHT_SHIFT: u8 = 0x59;

/// Set-2 make codes for the decoded keys.
const SCAN_TABLE: [(u8, char); 38] = [
    (0x1C, 'a'), (0x32, 'b'), (0x21, 'c'), (0x23, 'd'), (0x24, 'e'), (0x2B, 'f'),
    (0x34, 'g'), (0x33, 'h'), (0x43, 'i'), (0x3B, 'j'), (0x42, 'k'), (0x4B, 'l'),
    (0x3A, 'm'), (0x31, 'n'), (0x44, 'o'), (0x4D, 'p'), (0x15, 'q'), (0x2D, 'r'),
    (0x1B, 's'), (0x2C, 't'), (0x3C, 'u'), (0x2A, 'v'), (0x1D, 'w'), (0x22, 'x'),
    (0x35, 'y'), (0x1A, 'z'),
    (0x45, '0'), (0x16, '1'), (0x1E, '2'), (0x26, '3'), (0x25, '4'), (0x2E, '5'),
    (0x36, '6'), (0x3D, '7'), (0x3E, '8'), (0x46, '9'),
    (0x29, ' '), (0x5A, '\n'),
];

fn decode(code: u8) -> Option<char> {
    SCAN_TABLE.iter().find(|(c, _)| *c == code).map(|&(_, ch)| ch)
}

/// Make code for a character (lower-case form for letters).
pub fn encode(ch: char) -> Option<u8> {
    let lower = ch.to_ascii_lowercase();
    SCAN_TABLE.iter().find(|(_, c)| *c == lower).map(|&(code, _)| code)
}

#[derive(Clone, Debug, Default)]
pub struct Ps2Core {
    rx: VecDeque<u8>,
    // Decoder state carried between bytes.
    break_pending: bool,
    extended: bool,
    shift: bool,
}

impl Ps2Core {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------- Device side --------------

    pub fn push_scan_code(&mut self, code: u8) {
        self.rx.push_back(code);
    }

    /// Queue a full make/break stroke for `ch`, wrapped in shift for
    /// upper-case letters. Returns `false` if the character has no scan code.
    pub fn press(&mut self, ch: char) -> bool {
        let Some(code) = encode(ch) else {
            return false;
        };
        let shifted = ch.is_ascii_uppercase();
        if shifted {
            self.push_scan_code(LEFT_SHIFT);
        }
        self.push_scan_code(code);
        self.push_scan_code(BREAK);
        self.push_scan_code(code);
        if shifted {
            self.push_scan_code(BREAK);
            self.push_scan_code(LEFT_SHIFT);
        }
        true
    }

    // -------------- Host side --------------

    /// Whether raw bytes are waiting in the FIFO.
    pub fn rx_pending(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Decode the next character, if a complete key press is queued.
    pub fn get_kb_ch(&mut self) -> Option<char> {
        while let Some(byte) = self.rx.pop_front() {
            match byte {
                BREAK => {
                    self.break_pending = true;
                    continue;
                }
                EXTENDED => {
                    self.extended = true;
                    continue;
                }
                _ => {}
            }

            let released = std::mem::take(&mut self.break_pending);
            let extended = std::mem::take(&mut self.extended);
            if byte == LEFT_SHIFT || byte == RIGHT_SHIFT {
                self.shift = !released;
                continue;
            }
            if released || extended {
                continue;
            }
            match decode(byte) {
                Some(ch) if self.shift => return Some(ch.to_ascii_uppercase()),
                Some(ch) => return Some(ch),
                None => warn!("ps2: dropping unknown scan code 0x{byte:02X}"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(ps2: &mut Ps2Core, bytes: &[u8]) {
        for &b in bytes {
            ps2.push_scan_code(b);
        }
    }

    #[test]
    fn make_then_break_yields_one_char() {
        let mut ps2 = Ps2Core::new();
        feed(&mut ps2, &[0x1C, 0xF0, 0x1C]);
        assert_eq!(ps2.get_kb_ch(), Some('a'));
        assert_eq!(ps2.get_kb_ch(), None);
        assert!(!ps2.rx_pending());
    }

    #[test]
    fn press_round_trips_through_decoder() {
        let mut ps2 = Ps2Core::new();
        for ch in "abcdefghijklmnop".chars() {
            assert!(ps2.press(ch));
        }
        let decoded: String = std::iter::from_fn(|| ps2.get_kb_ch()).collect();
        assert_eq!(decoded, "abcdefghijklmnop");
    }

    #[test]
    fn shift_produces_upper_case_until_released() {
        let mut ps2 = Ps2Core::new();
        assert!(ps2.press('P'));
        assert!(ps2.press('p'));
        assert_eq!(ps2.get_kb_ch(), Some('P'));
        assert_eq!(ps2.get_kb_ch(), Some('p'));
    }

    #[test]
    fn extended_and_unknown_codes_are_skipped() {
        let mut ps2 = Ps2Core::new();
        // Right arrow (E0 74 / E0 F0 74), unknown 0x07, then 'b'.
        feed(&mut ps2, &[0xE0, 0x74, 0xE0, 0xF0, 0x74, 0x07, 0x32]);
        assert_eq!(ps2.get_kb_ch(), Some('b'));
    }

    #[test]
    fn split_break_sequence_keeps_state() {
        let mut ps2 = Ps2Core::new();
        feed(&mut ps2, &[0x21, 0xF0]);
        assert_eq!(ps2.get_kb_ch(), Some('c'));
        assert_eq!(ps2.get_kb_ch(), None);
        // Break completes later; must not produce a second 'c'.
        feed(&mut ps2, &[0x21]);
        assert_eq!(ps2.get_kb_ch(), None);
    }

    #[test]
    fn unencodable_char_is_rejected() {
        let mut ps2 = Ps2Core::new();
        assert!(!ps2.press('#'));
        assert!(!ps2.rx_pending());
    }
}
