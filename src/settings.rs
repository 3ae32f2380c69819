//! Game settings and tuning
//!
//! Defaults match the reference board. A host can override any
//! subset from JSON; firmware just uses `Settings::default()`.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::raster::Color;

/// Reasons a settings value is rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("screen must be at least 1x1, got {width}x{height}")]
    Screen { width: i32, height: i32 },
    #[error("paddle half-width must be in 1..90 degrees, got {0}")]
    PaddleWidth(i32),
    #[error("paddle speed must be non-negative, got {0}")]
    PaddleSpeed(i32),
    #[error("ball radius {ball} must be positive and smaller than the arena radius {arena}")]
    BallRadius { ball: i32, arena: i32 },
    #[error("ball speeds must satisfy 0 < base ({base}) <= max ({max}) <= ball radius ({radius})")]
    BallSpeed { base: f32, max: f32, radius: i32 },
    #[error("speed multiplier must be at least 1.0, got {0}")]
    SpeedMultiplier(f32),
    #[error("hit cooldown must be at least one tick")]
    Cooldown,
    #[error("switch bits must be distinct and below 32, got {0} and {1}")]
    SwitchBits(u32, u32),
    #[error("arena reach of {reach}px exceeds the {room}px available around the screen center")]
    OffScreen { reach: i32, room: i32 },
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Arena / paddles ===
    /// Arena radius; paddle chords end on this circle
    pub paddle_radius: i32,
    /// Half of each paddle's angular width (degrees)
    pub paddle_half_width_deg: i32,
    /// Degrees a paddle moves per tick
    pub paddle_speed_deg: i32,

    // === Ball ===
    pub ball_radius: i32,
    /// Serve speed (pixels per tick)
    pub ball_base_speed: f32,
    /// Speed cap after paddle boosts (pixels per tick). A hit scales speed
    /// by `speed_multiplier` only while the result stays below this cap;
    /// at the cap the reflected speed is clamped instead.
    pub ball_max_speed: f32,
    /// Velocity scale applied on every paddle hit
    pub speed_multiplier: f32,
    /// Ticks during which collisions are not tested after a paddle hit
    pub hit_cooldown_ticks: u32,

    // === Input ===
    pub player_one_switch_bit: u32,
    pub player_two_switch_bit: u32,

    // === Colors ===
    pub background: Color,
    pub arena_color: Color,
    pub paddle_colors: [Color; 2],
    /// Ball color before any paddle has touched it
    pub ball_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            paddle_radius: PADDLE_RADIUS,
            paddle_half_width_deg: PADDLE_HALF_WIDTH_DEG,
            paddle_speed_deg: PADDLE_MOVEMENT_SPEED,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            speed_multiplier: PADDLE_BOOST,
            hit_cooldown_ticks: HIT_COOLDOWN_TICKS,

            player_one_switch_bit: PLAYER_ONE_SWITCH_BIT,
            player_two_switch_bit: PLAYER_TWO_SWITCH_BIT,

            background: Color::BLACK,
            arena_color: Color::BLUE,
            paddle_colors: [Color::WHITE, Color::GRAY],
            ball_color: Color::RED,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Arena center in screen pixels
    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.screen_width / 2, self.screen_height / 2)
    }

    /// Check that every value keeps the simulation well-defined and all
    /// drawing on screen
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width < 1 || self.screen_height < 1 {
            return Err(SettingsError::Screen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        // A zero half-width would collapse the paddle chord to a point
        if !(1..90).contains(&self.paddle_half_width_deg) {
            return Err(SettingsError::PaddleWidth(self.paddle_half_width_deg));
        }
        if self.paddle_speed_deg < 0 {
            return Err(SettingsError::PaddleSpeed(self.paddle_speed_deg));
        }
        if self.ball_radius < 1 || self.ball_radius >= self.paddle_radius {
            return Err(SettingsError::BallRadius {
                ball: self.ball_radius,
                arena: self.paddle_radius,
            });
        }
        // Per-tick travel above one ball radius can skip the collision band
        if !(self.ball_base_speed > 0.0
            && self.ball_base_speed <= self.ball_max_speed
            && self.ball_max_speed <= self.ball_radius as f32)
        {
            return Err(SettingsError::BallSpeed {
                base: self.ball_base_speed,
                max: self.ball_max_speed,
                radius: self.ball_radius,
            });
        }
        if !(self.speed_multiplier >= 1.0) {
            return Err(SettingsError::SpeedMultiplier(self.speed_multiplier));
        }
        if self.hit_cooldown_ticks == 0 {
            return Err(SettingsError::Cooldown);
        }
        let (a, b) = (self.player_one_switch_bit, self.player_two_switch_bit);
        if a >= 32 || b >= 32 || a == b {
            return Err(SettingsError::SwitchBits(a, b));
        }

        // Farthest pixel any primitive can touch: a ball one max-speed step
        // past the escape radius, plus rounding
        let center = self.center();
        let room = center
            .x
            .min(center.y)
            .min(self.screen_width - 1 - center.x)
            .min(self.screen_height - 1 - center.y);
        let reach = self.paddle_radius + self.ball_max_speed.ceil() as i32 + 1;
        if reach > room {
            return Err(SettingsError::OffScreen { reach, room });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.paddle_radius, 110);
        assert_eq!(settings.center(), IVec2::new(120, 160));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "hit_cooldown_ticks": 20, "speed_multiplier": 1.0 }"#)
            .unwrap();
        assert_eq!(settings.hit_cooldown_ticks, 20);
        assert_eq!(settings.speed_multiplier, 1.0);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            paddle_colors: [Color::RED, Color::BLUE],
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_zero_paddle_width() {
        let settings = Settings {
            paddle_half_width_deg: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::PaddleWidth(0))));
    }

    #[test]
    fn test_rejects_arena_larger_than_screen() {
        let settings = Settings {
            paddle_radius: 115,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OffScreen { reach: 124, room: 119 })
        ));
    }

    #[test]
    fn test_rejects_speed_above_ball_radius() {
        let settings = Settings {
            ball_max_speed: 12.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::BallSpeed { .. })));
    }

    #[test]
    fn test_rejects_shared_switch_bit() {
        let settings = Settings {
            player_two_switch_bit: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::SwitchBits(0, 0))));
    }

    #[test]
    fn test_rejects_slowing_multiplier() {
        let settings = Settings {
            speed_multiplier: 0.9,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::SpeedMultiplier(_))));
    }
}
