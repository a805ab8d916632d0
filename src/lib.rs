//! Bounce Tap - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Fixed-step ball physics and scoring
//! - `scene`: Scene state machine, frame callback registry and the stage boundary
//! - `share`: Result sharing (tweet intent URLs)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod scene;
pub mod settings;
pub mod share;
pub mod sim;

pub use scene::{HeadlessStage, Scene, SceneKind, SceneMachine, Signal, Stage};
pub use settings::{PhysicsConfig, Settings, SettingsError, ShareConfig};
pub use share::ShareRequest;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Ball sprite width. Position is the sprite's top-left corner,
    /// so the ball touches the right edge at `SCREEN_WIDTH - BALL_WIDTH`.
    pub const BALL_WIDTH: f32 = 60.0;

    /// Ball spawn point
    pub const BALL_START: Vec2 = Vec2::new(200.0, 500.0);
    /// Horizontal speed the ball starts with (pixels/tick)
    pub const BALL_START_VX: f32 = 5.0;
    /// Vertical speed set by each activation (negative is up)
    pub const LAUNCH_IMPULSE: f32 = -8.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.1;

    /// Result screen layout
    pub const RESULT_HEADLINE_POS: Vec2 = Vec2::new(200.0, 200.0);
    pub const RETRY_BUTTON_POS: Vec2 = Vec2::new(50.0, 500.0);
    pub const SHARE_BUTTON_POS: Vec2 = Vec2::new(250.0, 500.0);
    pub const BUTTON_SIZE: Vec2 = Vec2::new(100.0, 60.0);
}
