//! Software rasterization into a linear pixel port
//!
//! There is no back buffer. Shapes are erased by redrawing them in the
//! background color, so callers must erase the previous frame before they
//! move anything.

pub mod shapes;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::ports::PixelSink;

pub use shapes::{CirclePoints, LinePixels, circle_points, draw_circle, draw_line};

/// 8-bit RRRGGGBB pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Self = Self(0);
    pub const WHITE: Self = Self(0xFF);
    pub const GRAY: Self = Self(0b0010_0101);
    pub const RED: Self = Self(0b1110_0000);
    pub const BLUE: Self = Self(0b0000_0011);
}

/// Write one pixel at linear offset `x + y * width`.
///
/// No bounds check: the caller guarantees `0 <= x < width` and
/// `0 <= y < height`.
#[inline]
pub fn draw_pixel<P: PixelSink + ?Sized>(sink: &mut P, x: i32, y: i32, color: Color) {
    debug_assert!(x >= 0 && y >= 0, "pixel ({x}, {y}) left of or above screen");
    let offset = x as usize + y as usize * sink.width();
    sink.write(offset, color);
}

/// Point overload of [`draw_pixel`]
#[inline]
pub fn draw_point<P: PixelSink + ?Sized>(sink: &mut P, p: IVec2, color: Color) {
    draw_pixel(sink, p.x, p.y, color);
}
