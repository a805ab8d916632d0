//! Fixed timestep simulation tick
//!
//! One call advances the round by exactly one display frame. There is no
//! variable timestep: velocities are in pixels/tick and gravity in pixels/tick².

use super::state::{GameState, Wall};
use crate::settings::PhysicsConfig;

/// What a single tick did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball not launched yet; nothing moved
    Frozen,
    /// Ball moved, possibly reflecting off a side wall
    Moved { bounced: Option<Wall> },
    /// Ball reached the floor; the round is over
    BallLost { final_score: u32 },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, config: &PhysicsConfig) -> TickOutcome {
    state.time_ticks += 1;

    if !state.is_active() {
        return TickOutcome::Frozen;
    }

    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Clamp before flipping so the ball never stays embedded in a wall
    let right = config.right_bound();
    let mut bounced = None;
    if ball.pos.x > right {
        ball.pos.x = right;
        ball.vel.x = -ball.vel.x;
        bounced = Some(Wall::Right);
    }
    if ball.pos.x < 0.0 {
        ball.pos.x = 0.0;
        ball.vel.x = -ball.vel.x;
        bounced = Some(Wall::Left);
    }

    ball.vel.y += config.gravity;

    if ball.pos.y >= config.floor() {
        return TickOutcome::BallLost {
            final_score: state.score,
        };
    }

    TickOutcome::Moved { bounced }
}
