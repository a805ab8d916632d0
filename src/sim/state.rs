//! Game state and core simulation types
//!
//! Owned by the Playing scene; a fresh state is built for every round.

use glam::Vec2;

use crate::settings::PhysicsConfig;

/// The ball entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

/// Horizontal screen edge the ball reflected off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Activations so far; physics stays frozen while this is 0
    pub score: u32,
    pub ball: Ball,
    /// Ticks simulated since the round started (frozen ticks included)
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new round with the ball resting at its spawn point
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            score: 0,
            ball: Ball {
                pos: Vec2::new(config.start_x, config.start_y),
                vel: Vec2::new(config.start_vx, 0.0),
            },
            time_ticks: 0,
        }
    }

    /// True once the ball has been launched
    pub fn is_active(&self) -> bool {
        self.score > 0
    }

    /// Launch (or re-launch mid-air) the ball.
    ///
    /// Every activation scores a point and replaces the vertical speed
    /// outright, whatever the ball was doing.
    pub fn activate(&mut self, config: &PhysicsConfig) {
        self.score += 1;
        self.ball.vel.y = config.launch_impulse;
    }

    /// HUD text for the running score
    pub fn score_text(&self) -> String {
        format!("SCORE:{}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_rests_at_spawn() {
        let state = GameState::new(&PhysicsConfig::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 500.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 0.0));
        assert!(!state.is_active());
    }

    #[test]
    fn test_activate_overrides_vertical_speed() {
        let config = PhysicsConfig::default();
        let mut state = GameState::new(&config);

        state.ball.vel.y = 3.7;
        state.activate(&config);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel, Vec2::new(5.0, -8.0));

        // Pumping while already rising still scores and resets speed
        state.ball.vel.y = -2.0;
        state.activate(&config);
        assert_eq!(state.score, 2);
        assert_eq!(state.ball.vel.y, -8.0);
    }

    #[test]
    fn test_score_text() {
        let config = PhysicsConfig::default();
        let mut state = GameState::new(&config);
        assert_eq!(state.score_text(), "SCORE:0");
        state.activate(&config);
        state.activate(&config);
        assert_eq!(state.score_text(), "SCORE:2");
    }
}
