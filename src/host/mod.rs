/*!
Process-level hosts that feed the game and present its output.

- bot: self-playing demo (both players simulated on the board models)
- terminal: interactive keyboard host (feature `terminal`)

`LoggedPanel` is the demo's display: a `Panel` that logs its status line every
time a full digit array has been pushed. `QuitFlag` carries a quit request
from a host's input back to the process loop, which stops between steps.
*/

pub mod bot;
#[cfg(feature = "terminal")]
pub mod terminal;

use std::cell::Cell;
use std::rc::Rc;

use log::info;

use crate::cores::Panel;
use crate::peripherals::{DIGIT_COUNT, DisplayOutput, IndicatorOutput};

/// Read access to the board panel behind a host's display.
pub trait PanelView {
    fn panel(&self) -> &Panel;
}

impl PanelView for Panel {
    fn panel(&self) -> &Panel {
        self
    }
}

/// Shared quit request. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct QuitFlag(Rc<Cell<bool>>);

impl QuitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoggedPanel {
    panel: Panel,
}

impl LoggedPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelView for LoggedPanel {
    fn panel(&self) -> &Panel {
        &self.panel
    }
}

impl DisplayOutput for LoggedPanel {
    fn set_digit(&mut self, position: usize, value: u8) {
        self.panel.set_digit(position, value);
        // write_digits goes 0..=7; the last position completes a push.
        if position == DIGIT_COUNT - 1 {
            info!("{}", self.panel.status_line());
        }
    }

    fn set_decimal_points(&mut self, mask: u8) {
        self.panel.set_decimal_points(mask);
    }
}

impl IndicatorOutput for LoggedPanel {
    fn set_indicator(&mut self, index: usize, on: bool) {
        self.panel.set_indicator(index, on);
    }
}
