//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ms_to_ticks;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Lives exhausted; state is frozen
    GameOver,
}

/// Events surfaced to the collaborator layer per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A non-MEV obstacle hit the player while vulnerable
    LifeLost { obstacle_id: String, lives: u32 },
    /// A high-MEV obstacle hit the player
    InvincibilityExtended { obstacle_id: String },
    /// Lives reached zero. Reported exactly once per run.
    GameOver { score: u64 },
}

/// The controllable actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed width/height
    pub size: Vec2,
    /// True from jump until the next floor contact
    pub jumping: bool,
    pub lives: u32,
    /// Invincibility countdown in ticks; 3000 ms at 60 Hz is exactly 180
    pub invincible_ticks: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                (CANVAS_WIDTH - PLAYER_WIDTH) / 2.0,
                CANVAS_HEIGHT - PLAYER_HEIGHT,
            ),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            jumping: false,
            lives: STARTING_LIVES,
            invincible_ticks: 0,
        }
    }

    /// Remaining invincibility in milliseconds
    pub fn invincible_ms(&self) -> f64 {
        f64::from(self.invincible_ticks) * MS_PER_TICK
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Category flags fixed at obstacle creation, immutable afterward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleTags {
    /// Destination is the Uniswap router; the spawn opens a low-gravity window
    pub uniswap: bool,
    /// Gas above the MEV threshold; grants invincibility on contact
    pub high_mev: bool,
}

/// A falling object spawned from a pending transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Transaction hash; opaque and stable
    pub id: String,
    /// Top-left corner
    pub pos: Vec2,
    /// Side length (obstacles are square)
    pub size: f32,
    /// Pixels per tick
    pub fall_speed: f32,
    /// Set once the tx lands on-chain; never reverts. Confirmed obstacles
    /// keep falling but no longer collide or render.
    pub confirmed: bool,
    pub tags: ObstacleTags,
}

impl Obstacle {
    pub fn size_vec(&self) -> Vec2 {
        Vec2::splat(self.size)
    }
}

/// A spawn request distilled from a pending transaction by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub id: String,
    pub size: f32,
    pub fall_speed: f32,
    pub tags: ObstacleTags,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible spawn placement
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Tick at which the current low-gravity window closes (last writer wins)
    pub low_gravity_until: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Running,
            score: 0,
            player: Player::new(),
            obstacles: Vec::new(),
            low_gravity_until: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Whether a low-gravity window is currently open
    pub fn low_gravity_active(&self) -> bool {
        self.time_ticks < self.low_gravity_until
    }

    /// Append an obstacle for a spawn released by the feed.
    ///
    /// Obstacles are created on the first sighting of a hash only; a hash
    /// already in the registry is ignored. A Uniswap-tagged spawn (re)opens
    /// the low-gravity window for the full duration.
    pub fn spawn_obstacle(&mut self, spec: SpawnSpec) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if self.obstacles.iter().any(|o| o.id == spec.id) {
            log::debug!("duplicate pending tx {}, ignoring", spec.id);
            return;
        }

        let tags = spec.tags;
        let max_x = (CANVAS_WIDTH - spec.size).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);
        self.obstacles.push(Obstacle {
            id: spec.id,
            pos: Vec2::new(x, 0.0),
            size: spec.size,
            fall_speed: spec.fall_speed,
            confirmed: false,
            tags,
        });

        if tags.uniswap {
            self.low_gravity_until =
                self.time_ticks + u64::from(ms_to_ticks(LOW_GRAVITY_MS));
        }
    }

    /// Mark the obstacle for `id` as confirmed. Unknown or already-removed
    /// hashes are a no-op; the flag never reverts.
    pub fn confirm_obstacle(&mut self, id: &str) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id == id) {
            obstacle.confirmed = true;
        }
    }
}
