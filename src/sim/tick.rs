//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one timer period: move paddles,
//! move the ball, then resolve at most one collision.

use super::collision::{ball_boundary_escape, ball_paddle_collision, reflect_velocity};
use super::state::{GameState, Player};
use crate::settings::Settings;
use crate::trig::AngleTable;

/// Input commands for a single tick (one direction bit per player)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Indexed by [`Player::index`]; set = counter-clockwise in table
    /// terms (increasing angle)
    pub forward: [bool; 2],
}

impl TickInput {
    /// Decode the switch bank
    pub fn from_switches(switches: u32, settings: &Settings) -> Self {
        Self {
            forward: [
                switches & (1 << settings.player_one_switch_bit) != 0,
                switches & (1 << settings.player_two_switch_bit) != 0,
            ],
        }
    }

    /// +1 or -1; paddles never stand still
    #[inline]
    pub fn direction(&self, player: Player) -> i32 {
        if self.forward[player.index()] { 1 } else { -1 }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Paddle that deflected the ball
    pub paddle_hit: Option<Player>,
    /// Player awarded a point
    pub scored: Option<Player>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, trig: &AngleTable, settings: &Settings) -> TickEvents {
    state.time_ticks += 1;

    move_paddles(state, input, trig, settings);
    state.ball.advance();
    resolve_collisions(state, trig, settings)
}

/// Step each paddle one increment in its input direction
pub fn move_paddles(state: &mut GameState, input: &TickInput, trig: &AngleTable, settings: &Settings) {
    for player in Player::ALL {
        let delta = input.direction(player) * settings.paddle_speed_deg;
        state.paddles[player.index()].rotate(delta, trig, settings);
    }
}

/// Paddle hit, else boundary escape, else nothing; skipped entirely while the
/// hit cooldown runs down
pub fn resolve_collisions(state: &mut GameState, trig: &AngleTable, settings: &Settings) -> TickEvents {
    if state.hit_cooldown > 0 {
        state.hit_cooldown -= 1;
        return TickEvents::default();
    }

    let ball_radius = settings.ball_radius as f32;

    // Only the opponent of the last toucher can take the next hit
    let target = state.last_touch.opponent();
    let paddle = state.paddle(target);
    if ball_paddle_collision(state.ball.pos, ball_radius, paddle) {
        let normal = trig.unit(paddle.angle());
        let color = paddle.color;

        let reflected = reflect_velocity(state.ball.vel, normal) * settings.speed_multiplier;
        state.ball.vel = reflected.clamp_length_max(settings.ball_max_speed);
        state.ball.color = color;
        state.last_touch = target;
        state.hit_cooldown = settings.hit_cooldown_ticks;

        log::debug!(
            "tick {}: {:?} hit, ball speed {:.2}",
            state.time_ticks,
            target,
            state.ball.vel.length()
        );
        return TickEvents {
            paddle_hit: Some(target),
            scored: None,
        };
    }

    let center = settings.center();
    if ball_boundary_escape(
        state.ball.pos,
        ball_radius,
        center.as_vec2(),
        settings.paddle_radius as f32,
    ) {
        let scorer = state.last_touch;
        state.score[scorer.index()] = state.score[scorer.index()].saturating_add(1);

        // Serve toward the player who just conceded
        let receiver = scorer.opponent();
        let direction = trig.unit(state.paddle(receiver).angle());
        state.ball.serve(center, direction, settings.ball_base_speed);

        log::info!(
            "{:?} scores ({} - {})",
            scorer,
            state.score[Player::One.index()],
            state.score[Player::Two.index()]
        );
        return TickEvents {
            paddle_hit: None,
            scored: Some(scorer),
        };
    }

    TickEvents::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;
    use crate::sim::Paddle;
    use crate::trig::Degrees;
    use glam::Vec2;

    fn setup() -> (AngleTable, Settings, GameState) {
        let trig = AngleTable::new();
        let settings = Settings::default();
        let state = GameState::new(&trig, &settings);
        (trig, settings, state)
    }

    /// Ball inside player one's collision band, live and targeting player one
    fn armed_near_player_one(state: &mut GameState) {
        state.hit_cooldown = 0;
        state.last_touch = Player::Two;
        state.ball.pos = Vec2::new(222.0, 160.0);
        state.ball.vel = Vec2::new(2.0, 0.0);
    }

    #[test]
    fn test_input_from_switches() {
        let settings = Settings::default();
        let input = TickInput::from_switches(0b1, &settings);
        assert_eq!(input.direction(Player::One), 1);
        assert_eq!(input.direction(Player::Two), -1);

        let input = TickInput::from_switches(1 << 8, &settings);
        assert_eq!(input.direction(Player::One), -1);
        assert_eq!(input.direction(Player::Two), 1);
    }

    #[test]
    fn test_move_paddles_wraps_and_recomputes_ends() {
        let (trig, settings, mut state) = setup();
        let input = TickInput {
            forward: [false, true],
        };
        move_paddles(&mut state, &input, &trig, &settings);

        assert_eq!(state.paddle(Player::One).angle(), Degrees::new(359));
        assert_eq!(state.paddle(Player::Two).angle(), Degrees::new(181));
        let fresh = Paddle::new(Degrees::new(359), Color::WHITE, &trig, &settings);
        assert_eq!(state.paddle(Player::One).ends(), fresh.ends());
    }

    #[test]
    fn test_ball_moves_before_collisions() {
        let (trig, settings, mut state) = setup();
        let before = state.ball.pos;
        tick(&mut state, &TickInput::default(), &trig, &settings);
        assert_eq!(state.ball.pos, before + Vec2::new(2.0, 0.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_paddle_hit_reflects_along_radial_normal() {
        let (trig, settings, mut state) = setup();
        armed_near_player_one(&mut state);

        let before = state.ball.vel;
        let events = resolve_collisions(&mut state, &trig, &settings);

        assert_eq!(events.paddle_hit, Some(Player::One));
        assert_eq!(events.scored, None);
        assert_eq!(state.last_touch, Player::One);
        assert_eq!(state.ball.color, Color::WHITE);
        assert_eq!(state.hit_cooldown, settings.hit_cooldown_ticks);

        let expected_speed = before.length() * settings.speed_multiplier;
        assert!((state.ball.vel.length() - expected_speed).abs() < 1e-4);
        assert!(state.ball.vel.x < 0.0);
        assert!(state.ball.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_oblique_hit_negates_normal_component() {
        let (trig, settings, mut state) = setup();
        state.paddles[0].set_angle(Degrees::new(30), &trig, &settings);
        state.hit_cooldown = 0;
        state.last_touch = Player::Two;

        let normal = trig.unit(Degrees::new(30));
        state.ball.pos = settings.center().as_vec2() + normal * 100.0;
        state.ball.vel = Vec2::new(1.5, 0.5);
        let before = state.ball.vel;

        let events = resolve_collisions(&mut state, &trig, &settings);
        assert_eq!(events.paddle_hit, Some(Player::One));

        let m = settings.speed_multiplier;
        let after = state.ball.vel;
        assert!((after.length() - before.length() * m).abs() < 1e-4);
        assert!((after.dot(normal) + before.dot(normal) * m).abs() < 1e-4);
    }

    #[test]
    fn test_hit_speed_is_capped() {
        let (trig, settings, mut state) = setup();
        armed_near_player_one(&mut state);
        state.ball.vel = Vec2::new(settings.ball_max_speed, 0.0);

        resolve_collisions(&mut state, &trig, &settings);
        // The boost would exceed the cap, so speed lands exactly on it
        assert!((state.ball.vel.length() - settings.ball_max_speed).abs() < 1e-4);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_cooldown_suppresses_repeat_hits() {
        let (trig, settings, mut state) = setup();
        armed_near_player_one(&mut state);
        let events = resolve_collisions(&mut state, &trig, &settings);
        assert_eq!(events.paddle_hit, Some(Player::One));

        // Keep the ball in the band and player one targeted for the whole cooldown
        for _ in 0..settings.hit_cooldown_ticks {
            state.last_touch = Player::Two;
            state.ball.pos = Vec2::new(222.0, 160.0);
            let events = resolve_collisions(&mut state, &trig, &settings);
            assert_eq!(events, TickEvents::default());
        }
        assert_eq!(state.hit_cooldown, 0);

        // Re-armed
        state.last_touch = Player::Two;
        let events = resolve_collisions(&mut state, &trig, &settings);
        assert_eq!(events.paddle_hit, Some(Player::One));
    }

    #[test]
    fn test_last_toucher_paddle_is_not_tested() {
        let (trig, settings, mut state) = setup();
        armed_near_player_one(&mut state);
        state.last_touch = Player::One;
        // Inside player one's band but not past the escape radius
        state.ball.pos = Vec2::new(219.0, 160.0);

        let events = resolve_collisions(&mut state, &trig, &settings);
        assert_eq!(events, TickEvents::default());
    }

    #[test]
    fn test_paddle_hit_takes_priority_over_escape() {
        let (trig, settings, mut state) = setup();
        armed_near_player_one(&mut state);
        // Past the escape radius (100) and still within the paddle band
        state.ball.pos = Vec2::new(221.0, 160.0);

        let events = resolve_collisions(&mut state, &trig, &settings);
        assert_eq!(events.paddle_hit, Some(Player::One));
        assert_eq!(events.scored, None);
        assert_eq!(state.score, [0, 0]);
    }

    #[test]
    fn test_escape_scores_and_serves_toward_loser() {
        let (trig, settings, mut state) = setup();
        state.hit_cooldown = 0;
        state.last_touch = Player::One;
        state.paddles[1].set_angle(Degrees::new(135), &trig, &settings);
        state.ball.pos = Vec2::new(227.0, 160.0);

        let events = resolve_collisions(&mut state, &trig, &settings);

        assert_eq!(events.scored, Some(Player::One));
        assert_eq!(state.score, [1, 0]);
        assert_eq!(state.last_touch, Player::One);
        assert_eq!(state.ball.pos, settings.center().as_vec2());
        let expected = trig.unit(Degrees::new(135)) * settings.ball_base_speed;
        assert!(state.ball.vel.distance(expected) < 1e-5);
    }

    #[test]
    fn test_no_escape_during_cooldown() {
        let (trig, settings, mut state) = setup();
        state.hit_cooldown = 3;
        state.ball.pos = Vec2::new(230.0, 200.0);

        let events = resolve_collisions(&mut state, &trig, &settings);
        assert_eq!(events, TickEvents::default());
        assert_eq!(state.score, [0, 0]);
        assert_eq!(state.hit_cooldown, 2);
    }
}
