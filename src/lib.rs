//! Txfall - dodge the mempool
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (physics, collisions, status effects)
//! - `feed`: Ingests pending/confirmed transaction events and turns them into spawns
//! - `engine`: 60 Hz clock reconciling the tick pipeline with the async feed
//! - `snapshot`: Read-only per-tick state handed to whatever draws the game

pub mod engine;
pub mod feed;
pub mod sim;
pub mod snapshot;

pub use engine::{Engine, EngineConfig, EngineHandle, InputIntent};
pub use snapshot::{RenderSink, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Milliseconds of game time per tick
    pub const MS_PER_TICK: f64 = 1000.0 / TICK_RATE as f64;

    /// Playfield dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 450.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Horizontal speed while a directional intent is held (pixels per tick)
    pub const PLAYER_MOVE_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u32 = 100;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Gravity while a low-gravity window is open
    pub const LOW_GRAVITY: f32 = 0.3;
    /// Jump impulse (negative = up)
    pub const JUMP_STRENGTH: f32 = -10.0;
    /// Jump impulse while a low-gravity window is open
    pub const LOW_GRAVITY_JUMP_STRENGTH: f32 = -15.0;

    /// Obstacle side length bounds (pixels, obstacles are square)
    pub const OBSTACLE_MIN_SIZE: f32 = 20.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 60.0;
    /// Obstacle fall speed bounds (pixels per tick)
    pub const OBSTACLE_MIN_FALL_SPEED: f32 = 1.0;
    pub const OBSTACLE_MAX_FALL_SPEED: f32 = 5.0;

    /// Invincibility granted per high-MEV contact
    pub const INVINCIBILITY_MS: f64 = 3000.0;
    /// Duration of the low-gravity window opened by a Uniswap spawn
    pub const LOW_GRAVITY_MS: f64 = 10_000.0;

    /// Gas above this counts a pending tx as high-MEV
    pub const HIGH_MEV_GAS_THRESHOLD: u64 = 200_000;
    /// Uniswap V2 router; spawns addressed to it open a low-gravity window
    pub const UNISWAP_ROUTER: &str = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";
}

/// Convert a millisecond duration to whole ticks at the fixed rate.
#[inline]
pub fn ms_to_ticks(ms: f64) -> u32 {
    (ms / consts::MS_PER_TICK).round() as u32
}
