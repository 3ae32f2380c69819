//! Degree-indexed trigonometry table
//!
//! All angular geometry in the tick path is looked up here, never computed.
//! The table is built once before the first tick and is immutable afterwards.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::N_ANGLES;
use crate::normalize_degrees;

/// An integer angle in degrees, always normalized to [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Degrees(u16);

impl Degrees {
    pub const ZERO: Self = Self(0);
    pub const HALF_TURN: Self = Self(180);

    /// Wrap any integer angle into range
    #[inline]
    pub fn new(angle: i32) -> Self {
        Self(normalize_degrees(angle))
    }

    #[inline]
    pub fn get(self) -> u16 {
        self.0
    }

    /// Offset by a signed number of degrees, wrapping
    #[inline]
    pub fn offset(self, delta: i32) -> Self {
        Self::new(self.0 as i32 + delta)
    }
}

impl From<i32> for Degrees {
    fn from(angle: i32) -> Self {
        Self::new(angle)
    }
}

impl From<Degrees> for i32 {
    fn from(angle: Degrees) -> Self {
        angle.0 as i32
    }
}

/// Precomputed sine and cosine for every integer degree
#[derive(Debug, Clone)]
pub struct AngleTable {
    sin: [f32; N_ANGLES],
    cos: [f32; N_ANGLES],
}

impl Default for AngleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleTable {
    pub fn new() -> Self {
        let mut sin = [0.0; N_ANGLES];
        let mut cos = [0.0; N_ANGLES];
        for i in 0..N_ANGLES {
            let radians = (i as f64).to_radians();
            sin[i] = radians.sin() as f32;
            cos[i] = radians.cos() as f32;
        }
        log::debug!("Angle table built ({} entries)", N_ANGLES);
        Self { sin, cos }
    }

    #[inline]
    pub fn sin(&self, angle: Degrees) -> f32 {
        self.sin[angle.0 as usize]
    }

    #[inline]
    pub fn cos(&self, angle: Degrees) -> f32 {
        self.cos[angle.0 as usize]
    }

    /// Radial unit vector pointing outward through `angle`
    #[inline]
    pub fn unit(&self, angle: Degrees) -> Vec2 {
        Vec2::new(self.cos(angle), self.sin(angle))
    }

    /// Point at distance `radius` from `center` along `angle`
    #[inline]
    pub fn polar(&self, center: IVec2, radius: f32, angle: Degrees) -> Vec2 {
        center.as_vec2() + self.unit(angle) * radius
    }
}
