//! Collision detection and response
//!
//! Paddles collide as finite chords; the arena edge is a circle the ball
//! escapes through when no paddle stops it.

use glam::Vec2;

use super::paddle::Paddle;

/// Check a ball against the finite segment `a`-`b`.
///
/// The ball center is projected onto the segment and the projection clamped
/// to the segment's extent, so a ball lying on the chord's line but past an
/// endpoint only hits when it overlaps the endpoint itself. Contact at
/// exactly `ball_radius` counts. A zero-length segment never collides.
pub fn ball_segment_collision(ball_pos: Vec2, ball_radius: f32, a: Vec2, b: Vec2) -> bool {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq <= f32::EPSILON {
        return false;
    }

    let k = ((ball_pos - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    let nearest = a + seg * k;
    ball_pos.distance_squared(nearest) <= ball_radius * ball_radius
}

/// Check a ball against a paddle's chord
#[inline]
pub fn ball_paddle_collision(ball_pos: Vec2, ball_radius: f32, paddle: &Paddle) -> bool {
    let [a, b] = paddle.ends();
    ball_segment_collision(ball_pos, ball_radius, a, b)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check whether the ball has left the arena
pub fn ball_boundary_escape(ball_pos: Vec2, ball_radius: f32, center: Vec2, arena_radius: f32) -> bool {
    let limit = arena_radius - ball_radius;
    ball_pos.distance_squared(center) >= limit * limit
}
