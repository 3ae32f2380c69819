//! Game state and core simulation types
//!
//! `GameState` is the single mutable aggregate of the game. It is owned by
//! the frame controller and only changes inside a tick.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use crate::raster::Color;
use crate::settings::Settings;
use crate::trig::{AngleTable, Degrees};

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Color of the paddle that last deflected it
    pub color: Color,
}

impl Ball {
    /// Explicit Euler step, one tick
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Put the ball at `center` and launch it along `direction`
    pub fn serve(&mut self, center: IVec2, direction: Vec2, speed: f32) {
        self.pos = center.as_vec2();
        self.vel = direction * speed;
    }

    /// Position rounded to the pixel grid
    #[inline]
    pub fn pixel_center(&self) -> IVec2 {
        self.pos.round().as_ivec2()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Points per player, indexed by [`Player::index`]
    pub score: [u32; 2],
    /// Player whose paddle most recently deflected the ball
    pub last_touch: Player,
    /// Ticks left before collisions are tested again
    pub hit_cooldown: u32,
    pub ball: Ball,
    /// Indexed by [`Player::index`]
    pub paddles: [Paddle; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh match: paddles facing each other at 0° and 180°, ball at the
    /// center heading for player one, cooldown preloaded
    pub fn new(trig: &AngleTable, settings: &Settings) -> Self {
        let [one, two] = settings.paddle_colors;
        let paddles = [
            Paddle::new(Degrees::ZERO, one, trig, settings),
            Paddle::new(Degrees::HALF_TURN, two, trig, settings),
        ];

        let mut ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: settings.ball_color,
        };
        ball.serve(
            settings.center(),
            trig.unit(paddles[Player::One.index()].angle()),
            settings.ball_base_speed,
        );

        Self {
            score: [0, 0],
            // Player one is the first target, so the serve counts as player two's
            last_touch: Player::Two,
            hit_cooldown: settings.hit_cooldown_ticks,
            ball,
            paddles,
            time_ticks: 0,
        }
    }

    /// Load a saved state. Paddle endpoints are not part of the saved form;
    /// they are recomputed from each paddle's angle.
    pub fn from_json(json: &str, trig: &AngleTable, settings: &Settings) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(json)?;
        for paddle in &mut state.paddles {
            paddle.set_angle(paddle.angle(), trig, settings);
        }
        Ok(state)
    }

    #[inline]
    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let trig = AngleTable::new();
        let settings = Settings::default();
        let state = GameState::new(&trig, &settings);

        assert_eq!(state.score, [0, 0]);
        assert_eq!(state.ball.pos, Vec2::new(120.0, 160.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, 0.0));
        assert_eq!(state.ball.color, settings.ball_color);
        assert_eq!(state.paddle(Player::One).angle(), Degrees::ZERO);
        assert_eq!(state.paddle(Player::Two).angle(), Degrees::HALF_TURN);
        assert_eq!(state.paddle(Player::Two).color, Color::GRAY);
        assert_eq!(state.hit_cooldown, settings.hit_cooldown_ticks);
        assert_eq!(state.last_touch.opponent(), Player::One);
    }

    #[test]
    fn test_state_json_round_trip() {
        let trig = AngleTable::new();
        let state = GameState::new(&trig, &Settings::default());
        let json = serde_json::to_string(&state).unwrap();
        let restored = GameState::from_json(&json, &trig, &Settings::default()).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_loaded_paddle_ends_follow_angle() {
        let trig = AngleTable::new();
        let settings = Settings::default();
        let mut state = GameState::new(&trig, &settings);
        state.paddles[0].set_angle(Degrees::new(45), &trig, &settings);

        // Endpoints supplied in the JSON are ignored
        let mut value = serde_json::to_value(&state).unwrap();
        assert!(value["paddles"][0].get("ends").is_none());
        value["paddles"][0]["ends"] = serde_json::json!([[0.0, 0.0], [1.0, 1.0]]);

        let restored = GameState::from_json(&value.to_string(), &trig, &settings).unwrap();
        let expected = Paddle::new(Degrees::new(45), Color::WHITE, &trig, &settings);
        assert_eq!(restored.paddle(Player::One).angle(), Degrees::new(45));
        assert_eq!(restored.paddle(Player::One).ends(), expected.ends());
    }

    #[test]
    fn test_ball_pixel_center_rounds() {
        let ball = Ball {
            pos: Vec2::new(10.6, 3.4),
            vel: Vec2::ZERO,
            color: Color::RED,
        };
        assert_eq!(ball.pixel_center(), IVec2::new(11, 3));
    }
}
