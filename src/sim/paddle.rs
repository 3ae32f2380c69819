//! Paddle geometry
//!
//! A paddle is the chord between two points on the arena circle, centered on
//! the paddle's angle. The chord endpoints are derived from the angle and are
//! recomputed whenever it changes.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::raster::Color;
use crate::settings::Settings;
use crate::trig::{AngleTable, Degrees};

/// A player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub color: Color,
    /// Center of the paddle arc
    angle: Degrees,
    /// Chord endpoints: [angle + half-width, angle - half-width].
    /// Not serialized; a loaded state rebuilds them from `angle`.
    #[serde(skip)]
    ends: [Vec2; 2],
}

impl Paddle {
    pub fn new(angle: Degrees, color: Color, trig: &AngleTable, settings: &Settings) -> Self {
        let mut paddle = Self {
            color,
            angle,
            ends: [Vec2::ZERO; 2],
        };
        paddle.update_ends(trig, settings);
        paddle
    }

    #[inline]
    pub fn angle(&self) -> Degrees {
        self.angle
    }

    #[inline]
    pub fn ends(&self) -> [Vec2; 2] {
        self.ends
    }

    /// Chord endpoints rounded to screen pixels
    pub fn pixel_ends(&self) -> [IVec2; 2] {
        self.ends.map(|e| e.round().as_ivec2())
    }

    pub fn set_angle(&mut self, angle: Degrees, trig: &AngleTable, settings: &Settings) {
        self.angle = angle;
        self.update_ends(trig, settings);
    }

    /// Move along the arena by `delta` degrees (wrapping)
    pub fn rotate(&mut self, delta: i32, trig: &AngleTable, settings: &Settings) {
        self.set_angle(self.angle.offset(delta), trig, settings);
    }

    fn update_ends(&mut self, trig: &AngleTable, settings: &Settings) {
        let center = settings.center();
        let radius = settings.paddle_radius as f32;
        let half_width = settings.paddle_half_width_deg;
        self.ends = [
            trig.polar(center, radius, self.angle.offset(half_width)),
            trig.polar(center, radius, self.angle.offset(-half_width)),
        ];
    }
}
