//! Demo autopilot
//!
//! Produces switch words that steer the receiving paddle to where the ball
//! will cross the arena edge, so the game can run unattended on a host. A
//! seeded PCG stream decides when a paddle fumbles, which keeps demo runs
//! reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameState, Player};
use crate::settings::Settings;
use crate::trig::Degrees;

pub struct Autopilot {
    rng: Pcg32,
    /// Probability per paddle per tick of steering the wrong way
    fumble_chance: f64,
}

impl Autopilot {
    pub fn new(seed: u64, fumble_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fumble_chance: fumble_chance.clamp(0.0, 1.0),
        }
    }

    /// Switch word for the next tick.
    ///
    /// The paddle the ball is heading for steers toward the point where the
    /// ball will leave the arena. The other paddle guards the opposite side,
    /// which is where a return through the middle ends up.
    pub fn switches(&mut self, state: &GameState, settings: &Settings) -> u32 {
        let receiver = state.last_touch.opponent();
        let exit = exit_bearing(state.ball.pos, state.ball.vel, settings);
        let mut bits = 0;
        for player in Player::ALL {
            let target = if player == receiver {
                exit
            } else {
                exit.offset(180)
            };
            let gap = signed_gap(state.paddle(player).angle(), target);
            // Paddles never stand still, so dither when already on target
            let mut forward = match gap {
                0 => self.rng.random_bool(0.5),
                g => g > 0,
            };
            if self.rng.random_bool(self.fumble_chance) {
                forward = !forward;
            }
            if forward {
                bits |= 1 << switch_bit(player, settings);
            }
        }
        bits
    }
}

fn switch_bit(player: Player, settings: &Settings) -> u32 {
    match player {
        Player::One => settings.player_one_switch_bit,
        Player::Two => settings.player_two_switch_bit,
    }
}

/// Angle of the ball as seen from the arena center
pub fn ball_bearing(pos: Vec2, settings: &Settings) -> Degrees {
    let rel = pos - settings.center().as_vec2();
    if rel.length_squared() < f32::EPSILON {
        return Degrees::ZERO;
    }
    Degrees::new(rel.y.atan2(rel.x).to_degrees().round() as i32)
}

/// Bearing at which a ball at `pos` moving along `vel` reaches the escape
/// radius. Falls back to the current bearing when the ball is at rest or
/// already outside.
pub fn exit_bearing(pos: Vec2, vel: Vec2, settings: &Settings) -> Degrees {
    let rel = pos - settings.center().as_vec2();
    let limit = (settings.paddle_radius - settings.ball_radius) as f32;

    // |rel + t*vel| = limit, larger root
    let a = vel.length_squared();
    let b = 2.0 * rel.dot(vel);
    let c = rel.length_squared() - limit * limit;
    let disc = b * b - 4.0 * a * c;
    if a < f32::EPSILON || c > 0.0 || disc < 0.0 {
        return ball_bearing(pos, settings);
    }
    let t = (-b + disc.sqrt()) / (2.0 * a);
    ball_bearing(pos + vel * t, settings)
}

/// Shortest signed rotation from `from` to `to`, in (-180, 180]
pub fn signed_gap(from: Degrees, to: Degrees) -> i32 {
    let diff = (to.get() as i32 - from.get() as i32).rem_euclid(360);
    if diff > 180 { diff - 360 } else { diff }
}
