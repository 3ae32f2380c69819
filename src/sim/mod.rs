//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per timer tick
//! - Integer angles, table-driven trigonometry
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod paddle;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{ball_boundary_escape, ball_paddle_collision, ball_segment_collision, reflect_velocity};
pub use paddle::Paddle;
pub use state::{Ball, GameState, Player};
pub use tick::{TickEvents, TickInput, move_paddles, resolve_collisions, tick};
