//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (one call = one display frame)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Ball, GameState, Wall};
pub use tick::{TickOutcome, tick};
