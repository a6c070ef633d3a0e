//! Fixed timestep simulation tick
//!
//! One tick runs the full pipeline in fixed order: obstacles (with collision
//! against the player's pre-physics rectangle), player physics, score, then
//! the terminal check. No step is skipped or reordered.

use super::collision::aabb_overlap;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::ms_to_ticks;

/// Input for a single tick, pre-debounced by the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left intent held
    pub left: bool,
    /// Move-right intent held
    pub right: bool,
    /// Jump pressed this tick (edge, not level)
    pub jump: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the events produced this tick; `GameEvent::GameOver` appears at
/// most once per run, after which the state is frozen.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    let granted = advance_obstacles(state, &mut events);
    advance_player(state, input, granted);
    state.score += 1;

    if state.player.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
    }
    events
}

/// Advance every obstacle and resolve collisions.
///
/// All collisions this tick resolve against the player's pre-physics
/// rectangle, taken once up front, so resolution cannot depend on obstacle
/// order. Returns true if any contact granted invincibility.
fn advance_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let player_pos = state.player.pos;
    let player_size = state.player.size;
    let player = &mut state.player;
    let mut granted = false;

    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.y += obstacle.fall_speed;

        let collides = !obstacle.confirmed
            && aabb_overlap(player_pos, player_size, obstacle.pos, obstacle.size_vec());

        if collides {
            if obstacle.tags.high_mev {
                // High-MEV contact grants invincibility instead of damage,
                // regardless of the current countdown.
                player.invincible_ticks = player
                    .invincible_ticks
                    .saturating_add(ms_to_ticks(INVINCIBILITY_MS));
                granted = true;
                events.push(GameEvent::InvincibilityExtended {
                    obstacle_id: obstacle.id.clone(),
                });
            } else if player.invincible_ticks == 0 {
                player.lives = player.lives.saturating_sub(1);
                events.push(GameEvent::LifeLost {
                    obstacle_id: obstacle.id.clone(),
                    lives: player.lives,
                });
            }
            return false;
        }

        // Cull obstacles that left the playfield. No penalty.
        obstacle.pos.y < CANVAS_HEIGHT
    });

    granted
}

/// Advance player physics for one tick.
///
/// `granted` skips the countdown decay on the tick an invincibility grant
/// landed, so a 3000 ms grant reads exactly 3000 ms at the end of that tick
/// and exactly 0 at the end of the 180th tick after it.
fn advance_player(state: &mut GameState, input: &TickInput, granted: bool) {
    let low_gravity = state.low_gravity_active();
    let player = &mut state.player;

    player.vel.x = if input.left && !input.right {
        -PLAYER_MOVE_SPEED
    } else if input.right && !input.left {
        PLAYER_MOVE_SPEED
    } else {
        0.0
    };

    if input.jump && !player.jumping {
        player.vel.y = if low_gravity {
            LOW_GRAVITY_JUMP_STRENGTH
        } else {
            JUMP_STRENGTH
        };
        player.jumping = true;
    }

    player.pos.x += player.vel.x;
    player.pos.y += player.vel.y;
    player.vel.y += if low_gravity { LOW_GRAVITY } else { GRAVITY };

    player.pos.x = player.pos.x.clamp(0.0, CANVAS_WIDTH - player.size.x);

    if player.pos.y + player.size.y > CANVAS_HEIGHT {
        // Rest on the floor
        player.pos.y = CANVAS_HEIGHT - player.size.y;
        player.vel.y = 0.0;
        player.jumping = false;
    } else if player.pos.y < 0.0 {
        player.pos.y = 0.0;
    }

    if !granted {
        player.invincible_ticks = player.invincible_ticks.saturating_sub(1);
    }
}
