//! Hardware port abstraction
//!
//! The core talks to the outside world through four narrow capabilities:
//! switches in, pixels out, score digits out, and a timer rearm. The
//! memory-mapped versions live in [`crate::platform`]; the in-memory versions
//! here back the tests and the host demo.

use serde::{Deserialize, Serialize};

use crate::raster::Color;
use crate::sim::Player;

/// Digital switch bank, read once per tick
pub trait InputSource {
    fn read_switches(&mut self) -> u32;
}

/// Linear pixel array addressed by `x + y * width`
pub trait PixelSink {
    /// Row stride in pixels
    fn width(&self) -> usize;
    fn write(&mut self, offset: usize, color: Color);
}

/// Which digit cell of a player's two-digit score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigitPlace {
    Tens,
    Units,
}

impl DigitPlace {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            DigitPlace::Tens => 0,
            DigitPlace::Units => 1,
        }
    }
}

/// Per-player two-digit score display
pub trait ScoreSink {
    fn write_digit(&mut self, player: Player, place: DigitPlace, digit: u8);
}

/// Periodic tick source; period and enable are owned by startup code
pub trait TimerControl {
    fn rearm(&mut self);
}

/// Heap-backed framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a framebuffer filled with [`Color::BLACK`]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[x + y * self.width]
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of pixels currently holding `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Encode as a binary PGM (P5) image, one gray level per color byte
    pub fn to_pgm(&self) -> Vec<u8> {
        let mut out = format!("P5\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.extend(self.pixels.iter().map(|c| c.0));
        out
    }
}

impl PixelSink for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn write(&mut self, offset: usize, color: Color) {
        // Out-of-range offsets panic here; the MMIO port has no such guard
        self.pixels[offset] = color;
    }
}

/// Switch bank whose state is set by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Switches(pub u32);

impl Switches {
    pub fn set(&mut self, bits: u32) {
        self.0 = bits;
    }
}

impl InputSource for Switches {
    fn read_switches(&mut self) -> u32 {
        self.0
    }
}

/// Score display that just remembers its digit cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    /// [player][tens, units]
    digits: [[u8; 2]; 2],
    /// Total digit writes (for tests)
    pub writes: u32,
}

impl ScoreBoard {
    pub fn digit(&self, player: Player, place: DigitPlace) -> u8 {
        self.digits[player.index()][place.index()]
    }

    /// Two-digit number currently shown for `player`
    pub fn shown(&self, player: Player) -> u32 {
        self.digit(player, DigitPlace::Tens) as u32 * 10 + self.digit(player, DigitPlace::Units) as u32
    }
}

impl ScoreSink for ScoreBoard {
    fn write_digit(&mut self, player: Player, place: DigitPlace, digit: u8) {
        self.digits[player.index()][place.index()] = digit;
        self.writes += 1;
    }
}

/// Timer that counts rearms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingTimer {
    pub rearms: u64,
}

impl TimerControl for CountingTimer {
    fn rearm(&mut self) {
        self.rearms += 1;
    }
}
