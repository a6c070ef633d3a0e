//! Read-only per-tick state for the render layer
//!
//! The renderer is an external collaborator: it consumes a committed
//! `Snapshot` each tick and holds no game logic. Colors derive
//! deterministically from the transaction hash so two renderers of the same
//! run agree on what they show.

use serde::Serialize;

use crate::sim::{GamePhase, GameState, ObstacleTags};

/// Channel offset applied after hashing, keeps colors away from near-black
const COLOR_OFFSET: u16 = 64;

/// Derive a stable RGB color from a transaction hash.
///
/// The first eight hex characters (after any `0x` prefix) are parsed into a
/// color seed, then each channel is offset by a fixed constant modulo 256.
/// Ids that do not parse as hex fall back to a byte fold so the color is
/// still stable.
pub fn color_for_id(id: &str) -> [u8; 3] {
    let hex = id.strip_prefix("0x").unwrap_or(id);
    let head: String = hex.chars().take(8).collect();
    let bits = u32::from_str_radix(&head, 16).unwrap_or_else(|_| {
        id.bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)))
    });

    let r = u16::from(((bits >> 16) & 0xff) as u8);
    let g = u16::from(((bits >> 8) & 0xff) as u8);
    let b = u16::from((bits & 0xff) as u8);
    [
        ((r + COLOR_OFFSET) % 256) as u8,
        ((g + COLOR_OFFSET) % 256) as u8,
        ((b + COLOR_OFFSET) % 256) as u8,
    ]
}

/// Category marker shown on an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Glyph {
    None,
    /// Uniswap-tagged spawn
    Uniswap,
    /// High-MEV obstacle; touching it is beneficial
    HighMev,
}

impl Glyph {
    fn for_tags(tags: ObstacleTags) -> Self {
        if tags.high_mev {
            Glyph::HighMev
        } else if tags.uniswap {
            Glyph::Uniswap
        } else {
            Glyph::None
        }
    }
}

/// The player as seen by the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// True on ticks where invincibility should blink the sprite
    pub blink: bool,
}

/// An unconfirmed obstacle as seen by the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: [u8; 3],
    pub glyph: Glyph,
}

/// Committed state of one tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: u64,
    pub lives: u32,
    pub game_over: bool,
    pub actor: ActorView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    /// Capture the committed state of the current tick.
    ///
    /// Confirmed obstacles are excluded; they still fall in the registry but
    /// are no longer drawn.
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let blink = player.is_invincible() && state.time_ticks % 8 < 4;

        Self {
            tick: state.time_ticks,
            score: state.score,
            lives: player.lives,
            game_over: state.phase == GamePhase::GameOver,
            actor: ActorView {
                x: player.pos.x,
                y: player.pos.y,
                width: player.size.x,
                height: player.size.y,
                blink,
            },
            obstacles: state
                .obstacles
                .iter()
                .filter(|o| !o.confirmed)
                .map(|o| ObstacleView {
                    id: o.id.clone(),
                    x: o.pos.x,
                    y: o.pos.y,
                    size: o.size,
                    color: color_for_id(&o.id),
                    glyph: Glyph::for_tags(o.tags),
                })
                .collect(),
        }
    }
}

/// Consumes committed per-tick snapshots and draws them.
///
/// Implementations hold no game logic; `Send` so the engine can run on its
/// own thread.
pub trait RenderSink: Send {
    fn present(&mut self, snapshot: &Snapshot);
}
