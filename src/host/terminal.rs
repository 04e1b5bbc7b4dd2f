/*!
Interactive terminal host (feature `terminal`).

Controls:
- `a`..`p`: player one's keys.
- `A`..`P`: toggle switch 0..15 (player two).
- space: all switches down.
- Ctrl-C: raise the quit flag; the process loop stops after the current step.

The terminal is drained without blocking on every poll, including the
switch samples taken inside a race, so switch flips land while the window is
open. Player-one keys typed during a race are queued and delivered after it.
The board state is redrawn on a single status line.
*/

use std::collections::VecDeque;
use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use log::warn;

use crate::cores::Panel;
use crate::cores::gpio::GpiCore;
use crate::host::{PanelView, QuitFlag};
use crate::peripherals::{DIGIT_COUNT, DisplayOutput, IndicatorOutput, InputSource};

/// Keyboard-driven input. Raw mode is enabled for the lifetime of the value.
pub struct TerminalInput {
    keys: VecDeque<char>,
    switches: GpiCore,
    quit: QuitFlag,
}

impl TerminalInput {
    pub fn new() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self::detached())
    }

    fn detached() -> Self {
        Self {
            keys: VecDeque::new(),
            switches: GpiCore::new(),
            quit: QuitFlag::new(),
        }
    }

    /// Flag raised when the user presses Ctrl-C.
    pub fn quit_flag(&self) -> QuitFlag {
        self.quit.clone()
    }

    /// Drain every pending terminal event without blocking.
    fn pump(&mut self) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    warn!("terminal poll failed: {e}");
                    return;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.on_key(key),
                Ok(_) => {}
                Err(e) => {
                    warn!("terminal read failed: {e}");
                    return;
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit.request();
            }
            KeyCode::Char(' ') => self.switches.clear(),
            KeyCode::Char(ch @ 'A'..='P') => self.switches.toggle((ch as u8 - b'A') as usize),
            KeyCode::Char(ch) => self.keys.push_back(ch),
            _ => {}
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl InputSource for TerminalInput {
    fn next_key_event(&mut self) -> Option<char> {
        self.pump();
        self.keys.pop_front()
    }

    fn read_switch_vector(&mut self) -> u16 {
        self.pump();
        self.switches.read()
    }
}

/// Panel redrawn in place on the current terminal line.
#[derive(Default)]
pub struct TerminalPanel {
    panel: Panel,
}

impl TerminalPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn redraw(&self) {
        let mut out = stdout();
        let _ = queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine));
        let _ = write!(out, "{}", self.panel.status_line());
        let _ = out.flush();
    }
}

impl PanelView for TerminalPanel {
    fn panel(&self) -> &Panel {
        &self.panel
    }
}

impl DisplayOutput for TerminalPanel {
    fn set_digit(&mut self, position: usize, value: u8) {
        self.panel.set_digit(position, value);
        if position == DIGIT_COUNT - 1 {
            self.redraw();
        }
    }

    fn set_decimal_points(&mut self, mask: u8) {
        self.panel.set_decimal_points(mask);
        self.redraw();
    }
}

impl IndicatorOutput for TerminalPanel {
    fn set_indicator(&mut self, index: usize, on: bool) {
        self.panel.set_indicator(index, on);
        self.redraw();
    }
}
