//! Line and circle primitives
//!
//! Both walks are exposed as iterators so the exact pixel set can be checked
//! without a sink; the `draw_*` functions just feed them to [`draw_point`].

use glam::IVec2;

use super::{Color, draw_point};
use crate::ports::PixelSink;

/// Bresenham walk from `p0` to `p1`, endpoints inclusive, any octant
#[derive(Debug, Clone)]
pub struct LinePixels {
    cur: IVec2,
    end: IVec2,
    dx: i32,
    dy: i32,
    step: IVec2,
    err: i32,
    done: bool,
}

impl LinePixels {
    pub fn new(p0: IVec2, p1: IVec2) -> Self {
        let dx = (p1.x - p0.x).abs();
        // Negative so a single error term covers both axes
        let dy = -(p1.y - p0.y).abs();
        let step = IVec2::new(
            if p0.x < p1.x { 1 } else { -1 },
            if p0.y < p1.y { 1 } else { -1 },
        );
        Self {
            cur: p0,
            end: p1,
            dx,
            dy,
            step,
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LinePixels {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.done {
            return None;
        }
        let p = self.cur;
        if p == self.end {
            self.done = true;
            return Some(p);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.cur.x += self.step.x;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.cur.y += self.step.y;
        }
        Some(p)
    }
}

/// Draw a one-pixel line between two points
pub fn draw_line<P: PixelSink + ?Sized>(sink: &mut P, p0: IVec2, p1: IVec2, color: Color) {
    for p in LinePixels::new(p0, p1) {
        draw_point(sink, p, color);
    }
}

/// Midpoint circle outline (Jesko's variant), one octant mirrored 8 ways.
///
/// Pixels on the octant boundaries (the axes and diagonals) are yielded more
/// than once; drawing them twice is harmless.
#[derive(Debug, Clone)]
pub struct CirclePoints {
    center: IVec2,
    x: i32,
    y: i32,
    t1: i32,
    octant: u8,
}

impl CirclePoints {
    pub fn new(center: IVec2, radius: i32) -> Self {
        debug_assert!(radius >= 0, "negative circle radius {radius}");
        Self {
            center,
            x: radius,
            y: 0,
            t1: radius / 16,
            octant: 0,
        }
    }
}

impl Iterator for CirclePoints {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.x < self.y {
            return None;
        }

        let (x, y) = (self.x, self.y);
        let offset = match self.octant {
            0 => IVec2::new(x, y),
            1 => IVec2::new(y, x),
            2 => IVec2::new(-x, y),
            3 => IVec2::new(-y, x),
            4 => IVec2::new(x, -y),
            5 => IVec2::new(y, -x),
            6 => IVec2::new(-x, -y),
            _ => IVec2::new(-y, -x),
        };

        self.octant += 1;
        if self.octant == 8 {
            self.octant = 0;
            self.y += 1;
            self.t1 += self.y;
            let t2 = self.t1 - self.x;
            if t2 >= 0 {
                self.t1 = t2;
                self.x -= 1;
            }
        }

        Some(self.center + offset)
    }
}

#[inline]
pub fn circle_points(center: IVec2, radius: i32) -> CirclePoints {
    CirclePoints::new(center, radius)
}

/// Draw a circle outline; radius 0 draws only the center pixel
pub fn draw_circle<P: PixelSink + ?Sized>(sink: &mut P, center: IVec2, radius: i32, color: Color) {
    for p in circle_points(center, radius) {
        draw_point(sink, p, color);
    }
}
