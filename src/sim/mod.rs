//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, transport, or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::aabb_overlap;
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleTags, Player, SpawnSpec,
};
pub use tick::{TickInput, tick};
