//! Orbit Pong - two-player pong inside a circular arena
//!
//! Core modules:
//! - `trig`: Precomputed degree-indexed sine/cosine table
//! - `raster`: Integer line and circle rasterization into a pixel port
//! - `sim`: Per-tick simulation (paddle motion, ball physics, scoring)
//! - `frame`: Frame controller run once per timer interrupt
//! - `ports`: Capability traits for the hardware ports plus in-memory versions
//! - `platform`: Memory-mapped port implementations for the target board
//! - `settings`: Data-driven game tuning

pub mod frame;
pub mod platform;
pub mod ports;
pub mod raster;
pub mod settings;
pub mod sim;
pub mod trig;

pub use frame::{FrameController, FrameStats};
pub use raster::Color;
pub use settings::{Settings, SettingsError};
pub use trig::{AngleTable, Degrees};

/// Game configuration constants
pub mod consts {
    /// Timer interrupt rate (one simulation tick per interrupt)
    pub const TICKS_PER_SEC: u32 = 20;

    /// Number of integer degree steps in the angle table
    pub const N_ANGLES: usize = 360;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 240;
    pub const SCREEN_HEIGHT: i32 = 320;

    /// Arena radius; paddle chord endpoints sit on this circle
    pub const PADDLE_RADIUS: i32 = SCREEN_WIDTH / 2 - 10;
    /// Half of the paddle's angular width (degrees)
    pub const PADDLE_HALF_WIDTH_DEG: i32 = 5;
    /// Degrees a paddle moves per tick
    pub const PADDLE_MOVEMENT_SPEED: i32 = 1;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 10;
    /// Serve speed (pixels per tick)
    pub const BALL_BASE_SPEED: f32 = 2.0;
    /// Speed cap; must stay below the collision band width
    pub const BALL_MAX_SPEED: f32 = 8.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.05;

    /// Ticks after a paddle hit during which no collision is tested
    pub const HIT_COOLDOWN_TICKS: u32 = 12;

    /// Switch bits driving each paddle's direction
    pub const PLAYER_ONE_SWITCH_BIT: u32 = 0;
    pub const PLAYER_TWO_SWITCH_BIT: u32 = 8;
}

/// Normalize an integer angle to [0, 360)
#[inline]
pub fn normalize_degrees(angle: i32) -> u16 {
    // rem_euclid is ((a % 360) + 360) % 360 without the intermediate overflow
    angle.rem_euclid(consts::N_ANGLES as i32) as u16
}
