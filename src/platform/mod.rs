//! Memory-mapped ports for the target board
//!
//! Each port wraps a raw register address and implements one capability
//! trait from [`crate::ports`]. Register map:
//!
//! | Port            | Base          | Notes                          |
//! |-----------------|---------------|--------------------------------|
//! | Pixel buffer    | `0x0800_0000` | one byte per pixel             |
//! | Switches        | `0x0400_0010` | low 10 bits valid              |
//! | Interval timer  | `0x0400_0020` | status word, then control word |
//! | 7-segment cells | `0x0400_0050` | 0x10 stride, active-low        |
//!
//! Constructors are `unsafe`: the caller promises the address really is the
//! device register (or, in tests, ordinary memory of sufficient size) and
//! that nothing else aliases it.
//!
//! Firmware wiring, with the interrupt vector calling `on_timer`:
//!
//! ```no_run
//! use orbit_pong::platform::BoardPorts;
//! use orbit_pong::{FrameController, Settings};
//!
//! let settings = Settings::default();
//! let ports = unsafe { BoardPorts::take(settings.screen_width as usize) };
//! let mut game = FrameController::new(settings, ports.switches, ports.pixels, ports.scores, ports.timer)
//!     .expect("default settings are valid");
//! game.start();
//! // from the timer interrupt handler:
//! game.on_timer();
//! ```

use crate::ports::{DigitPlace, InputSource, PixelSink, ScoreSink, TimerControl};
use crate::raster::Color;
use crate::sim::Player;

pub const PIXEL_BASE: usize = 0x0800_0000;
pub const SWITCH_BASE: usize = 0x0400_0010;
pub const TIMER_BASE: usize = 0x0400_0020;
pub const HEX_BASE: usize = 0x0400_0050;

/// Number of physical switches
pub const SWITCH_COUNT: u32 = 10;
/// Word distance between consecutive 7-segment cells (0x10 bytes)
pub const HEX_STRIDE_WORDS: usize = 4;

/// Timer control bits
const TIMER_CTRL_ITO: u32 = 1 << 0;
const TIMER_CTRL_START: u32 = 1 << 2;

/// Segment patterns for 0-9, bit 0 = segment a ... bit 6 = segment g
const SEVEN_SEGMENT: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Active-low segment pattern for a decimal digit (values above 9 show 9)
#[inline]
pub fn seven_segment(digit: u8) -> u8 {
    !SEVEN_SEGMENT[digit.min(9) as usize] & 0x7F
}

/// Display cell for a player's digit: player one on the left pair,
/// player two on the right pair
#[inline]
pub fn hex_cell(player: Player, place: DigitPlace) -> usize {
    match (player, place) {
        (Player::One, DigitPlace::Tens) => 5,
        (Player::One, DigitPlace::Units) => 4,
        (Player::Two, DigitPlace::Tens) => 1,
        (Player::Two, DigitPlace::Units) => 0,
    }
}

/// Byte-per-pixel video memory
#[derive(Debug)]
pub struct MmioPixels {
    base: *mut u8,
    width: usize,
}

impl MmioPixels {
    /// # Safety
    /// `base` must point to writable pixel memory of at least
    /// `width * height` bytes for every offset the caller will draw.
    pub unsafe fn new(base: *mut u8, width: usize) -> Self {
        Self { base, width }
    }
}

impl PixelSink for MmioPixels {
    fn width(&self) -> usize {
        self.width
    }

    fn write(&mut self, offset: usize, color: Color) {
        // No bounds check by contract; see `raster::draw_pixel`
        unsafe { self.base.add(offset).write_volatile(color.0) }
    }
}

/// Slide-switch bank
#[derive(Debug)]
pub struct MmioSwitches {
    reg: *const u32,
}

impl MmioSwitches {
    /// # Safety
    /// `reg` must be a readable 32-bit register.
    pub unsafe fn new(reg: *const u32) -> Self {
        Self { reg }
    }
}

impl InputSource for MmioSwitches {
    fn read_switches(&mut self) -> u32 {
        let raw = unsafe { self.reg.read_volatile() };
        raw & ((1 << SWITCH_COUNT) - 1)
    }
}

/// Six seven-segment cells, two per player used
#[derive(Debug)]
pub struct MmioScoreDisplay {
    base: *mut u32,
}

impl MmioScoreDisplay {
    /// # Safety
    /// `base` must address six word registers spaced
    /// [`HEX_STRIDE_WORDS`] apart.
    pub unsafe fn new(base: *mut u32) -> Self {
        Self { base }
    }
}

impl ScoreSink for MmioScoreDisplay {
    fn write_digit(&mut self, player: Player, place: DigitPlace, digit: u8) {
        let cell = hex_cell(player, place);
        let pattern = seven_segment(digit) as u32;
        unsafe { self.base.add(cell * HEX_STRIDE_WORDS).write_volatile(pattern) }
    }
}

/// One-shot interval timer; period is programmed by startup code
#[derive(Debug)]
pub struct MmioTimer {
    base: *mut u32,
}

impl MmioTimer {
    /// # Safety
    /// `base` must address the timer's status word followed by its control
    /// word.
    pub unsafe fn new(base: *mut u32) -> Self {
        Self { base }
    }
}

impl TimerControl for MmioTimer {
    fn rearm(&mut self) {
        unsafe {
            // Any write to status clears the timeout flag (acknowledges the IRQ)
            self.base.write_volatile(0);
            self.base.add(1).write_volatile(TIMER_CTRL_ITO | TIMER_CTRL_START);
        }
    }
}

/// Ports at the board's fixed addresses
pub struct BoardPorts {
    pub switches: MmioSwitches,
    pub pixels: MmioPixels,
    pub scores: MmioScoreDisplay,
    pub timer: MmioTimer,
}

impl BoardPorts {
    /// # Safety
    /// Only valid on the target board, and only once: the returned ports
    /// assume exclusive access to the device registers.
    pub unsafe fn take(screen_width: usize) -> Self {
        unsafe {
            Self {
                switches: MmioSwitches::new(SWITCH_BASE as *const u32),
                pixels: MmioPixels::new(PIXEL_BASE as *mut u8, screen_width),
                scores: MmioScoreDisplay::new(HEX_BASE as *mut u32),
                timer: MmioTimer::new(TIMER_BASE as *mut u32),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::draw_pixel;

    #[test]
    fn test_seven_segment_patterns() {
        // 8 lights every segment, so active-low is all zeros
        assert_eq!(seven_segment(8), 0x00);
        // 1 lights b and c only
        assert_eq!(seven_segment(1), 0x79);
        assert_eq!(seven_segment(0), 0x40);
        assert_eq!(seven_segment(12), seven_segment(9));
    }

    #[test]
    fn test_pixels_write_linear_offsets() {
        let mut mem = vec![0u8; 16 * 8];
        let mut pixels = unsafe { MmioPixels::new(mem.as_mut_ptr(), 16) };
        draw_pixel(&mut pixels, 3, 2, Color::WHITE);
        draw_pixel(&mut pixels, 0, 7, Color::GRAY);
        assert_eq!(mem[3 + 2 * 16], 0xFF);
        assert_eq!(mem[7 * 16], Color::GRAY.0);
    }

    #[test]
    fn test_switches_mask_unused_bits() {
        let reg: u32 = 0xFFFF_F101;
        let mut switches = unsafe { MmioSwitches::new(&reg) };
        assert_eq!(switches.read_switches(), 0x101);
    }

    #[test]
    fn test_score_display_cells() {
        let mut mem = [0xFFu32; 6 * HEX_STRIDE_WORDS];
        let mut display = unsafe { MmioScoreDisplay::new(mem.as_mut_ptr()) };
        display.write_digit(Player::One, DigitPlace::Units, 1);
        display.write_digit(Player::Two, DigitPlace::Tens, 8);
        assert_eq!(mem[4 * HEX_STRIDE_WORDS], seven_segment(1) as u32);
        assert_eq!(mem[HEX_STRIDE_WORDS], 0);
    }

    #[test]
    fn test_timer_rearm_clears_status_and_starts() {
        let mut mem = [1u32, 0];
        let mut timer = unsafe { MmioTimer::new(mem.as_mut_ptr()) };
        timer.rearm();
        assert_eq!(mem, [0, TIMER_CTRL_ITO | TIMER_CTRL_START]);
    }
}
