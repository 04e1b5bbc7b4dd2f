/*!
In-memory models of the board's memory-mapped I/O cores.

The game only sees the `peripherals` traits. These types group the cores the
way the board wires them:

- `Console`: PS/2 keyboard core + switch input core. Implements `InputSource`;
  key events are decoded from the PS/2 FIFO, so presses that arrive during a
  race simply wait there.
- `Panel`: seven-segment core + LED output core. Implements `DisplayOutput`
  and `IndicatorOutput`.

Submodules:
- gpio: LED output and switch input registers
- sseg: eight-digit seven-segment core with hex-to-segment encoding
- ps2: keyboard receive FIFO and set-2 scan-code decoder
- raster: RGBA snapshot of the panel (PNG with the `screenshot` feature)
*/

pub mod gpio;
pub mod ps2;
pub mod raster;
pub mod sseg;


use crate::peripherals::{DisplayOutput, INDICATOR_COUNT, IndicatorOutput, InputSource};

use self::gpio::{GpiCore, GpoCore};
use self::ps2::Ps2Core;
use self::sseg::{SsegCore, h2s};

/// Keyboard and switches.
#[derive(Clone, Debug, Default)]
pub struct Console {
    pub ps2: Ps2Core,
    pub switches: GpiCore,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for Console {
    #[inline]
    fn next_key_event(&mut self) -> Option<char> {
        self.ps2.get_kb_ch()
    }

    #[inline]
    fn read_switch_vector(&mut self) -> u16 {
        self.switches.read()
    }
}

/// Seven-segment display and LED row.
#[derive(Clone, Debug, Default)]
pub struct Panel {
    pub sseg: SsegCore,
    pub leds: GpoCore,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line rendering: digits, then the LED row (LED 15 at the left).
    pub fn status_line(&self) -> String {
        let leds: String = (0..INDICATOR_COUNT)
            .rev()
            .map(|i| if self.leds.is_on(i) { '*' } else { '.' })
            .collect();
        format!("[{}]  {}", self.sseg.to_text(), leds)
    }
}

impl DisplayOutput for Panel {
    fn set_digit(&mut self, position: usize, value: u8) {
        self.sseg.write_pattern(h2s(value), position);
    }

    fn set_decimal_points(&mut self, mask: u8) {
        self.sseg.set_dp(mask);
    }
}

impl IndicatorOutput for Panel {
    fn set_indicator(&mut self, index: usize, on: bool) {
        self.leds.write_bit(on, index);
    }
}
