/*!
RGBA snapshot of the front panel.

Layout:
- Top row: the eight seven-segment digits, position 7 at the left, each
  drawn from the pattern the `SsegCore` drives (decimal point merged in).
- Bottom row: the sixteen LEDs, LED 15 at the left (board order).

Pixels are tightly packed RGBA8, row-major. With the `screenshot` feature the
snapshot can be written out as PNG.
*/

use crate::cores::Panel;
use crate::peripherals::{DIGIT_COUNT, INDICATOR_COUNT};

const CELL_W: usize = 24;
const CELL_H: usize = 40;
const MARGIN: usize = 8;
const SEG_T: usize = 3;
const LED_SIZE: usize = 8;
const LED_PITCH: usize = 12;

pub const WIDTH: usize = MARGIN * 2 + DIGIT_COUNT * CELL_W;
pub const HEIGHT: usize = MARGIN * 3 + CELL_H + LED_SIZE;

const BACKGROUND: [u8; 4] = [0x10, 0x10, 0x10, 0xFF];
const SEG_ON: [u8; 4] = [0xFF, 0x30, 0x20, 0xFF];
const SEG_OFF: [u8; 4] = [0x30, 0x18, 0x18, 0xFF];
const LED_ON: [u8; 4] = [0x30, 0xFF, 0x40, 0xFF];
const LED_OFF: [u8; 4] = [0x18, 0x30, 0x18, 0xFF];

/// Segment rectangles inside one digit cell, as (x, y, w, h), for bits 0..=6
/// (a, b, c, d, e, f, g).
const SEGMENTS: [(usize, usize, usize, usize); 7] = [
    (5, 2, 12, SEG_T),           // a
    (17, 5, SEG_T, 13),          // b
    (17, 21, SEG_T, 13),         // c
    (5, 34, 12, SEG_T),          // d
    (2, 21, SEG_T, 13),          // e
    (2, 5, SEG_T, 13),           // f
    (5, 18, 12, SEG_T),          // g
];
const DECIMAL_POINT: (usize, usize, usize, usize) = (20, 34, SEG_T, SEG_T);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl Snapshot {
    fn new(width: usize, height: usize) -> Self {
        let mut rgba = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            rgba.extend_from_slice(&BACKGROUND);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    fn fill(&mut self, (x, y, w, h): (usize, usize, usize, usize), color: [u8; 4]) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                let i = (row * self.width + col) * 4;
                self.rgba[i..i + 4].copy_from_slice(&color);
            }
        }
    }

    /// Write the snapshot as a PNG file.
    #[cfg(feature = "screenshot")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let img = image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.rgba.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        img.save(path)
    }
}

/// Top-left corner of the digit cell showing `position`.
fn digit_origin(position: usize) -> (usize, usize) {
    (MARGIN + (DIGIT_COUNT - 1 - position) * CELL_W, MARGIN)
}

/// Top-left corner of LED `index`.
fn led_origin(index: usize) -> (usize, usize) {
    (
        MARGIN + (INDICATOR_COUNT - 1 - index) * LED_PITCH,
        MARGIN * 2 + CELL_H,
    )
}

pub fn render(panel: &Panel) -> Snapshot {
    let mut snap = Snapshot::new(WIDTH, HEIGHT);

    for position in 0..DIGIT_COUNT {
        let (ox, oy) = digit_origin(position);
        let pattern = panel.sseg.pattern(position);
        for (bit, &(x, y, w, h)) in SEGMENTS.iter().enumerate() {
            let lit = pattern & (1 << bit) == 0;
            snap.fill((ox + x, oy + y, w, h), if lit { SEG_ON } else { SEG_OFF });
        }
        let (x, y, w, h) = DECIMAL_POINT;
        let lit = pattern & 0x80 == 0;
        snap.fill((ox + x, oy + y, w, h), if lit { SEG_ON } else { SEG_OFF });
    }

    for index in 0..INDICATOR_COUNT {
        let (x, y) = led_origin(index);
        let color = if panel.leds.is_on(index) { LED_ON } else { LED_OFF };
        snap.fill((x, y, LED_SIZE, LED_SIZE), color);
    }

    snap
}
