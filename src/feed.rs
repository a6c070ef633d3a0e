//! External event ingestion
//!
//! Translates pending/confirmed transaction notifications into obstacle
//! registry mutations. The transport delivering these events is an external
//! collaborator; it only sees the `FeedEvent` type and a channel sender.
//! Malformed events are logged and dropped, never surfaced to the player and
//! never fatal to the ingestor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{GameState, ObstacleTags, SpawnSpec};

/// A pending transaction as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTx {
    /// Transaction hash (opaque, stable)
    pub hash: String,
    /// Destination address, if the lookup resolved one
    pub to: Option<String>,
    /// Gas estimate, if the lookup resolved one
    pub gas: Option<u64>,
}

/// Inbound feed events, unordered relative to the tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedEvent {
    /// A new pending transaction was sighted
    Pending(PendingTx),
    /// A previously sighted transaction landed on-chain
    Confirmed(String),
}

/// Classification failures. All of these drop the event; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("pending tx {0} has no gas estimate")]
    MissingGas(String),
}

/// Derive a spawn request from a pending transaction.
///
/// Size scales with gas (`gas / 10_000`, clamped to the obstacle bounds) and
/// fall speed with size (`size / 10`, clamped). A destination matching the
/// Uniswap router (case-insensitive) tags the spawn `uniswap`; gas above the
/// MEV threshold tags it `high_mev`.
pub fn classify(tx: &PendingTx) -> Result<SpawnSpec, FeedError> {
    let gas = tx
        .gas
        .ok_or_else(|| FeedError::MissingGas(tx.hash.clone()))?;

    let uniswap = tx
        .to
        .as_deref()
        .is_some_and(|to| to.eq_ignore_ascii_case(UNISWAP_ROUTER));
    let high_mev = gas > HIGH_MEV_GAS_THRESHOLD;

    let size = (gas as f32 / 10_000.0).clamp(OBSTACLE_MIN_SIZE, OBSTACLE_MAX_SIZE);
    let fall_speed = (size / 10.0).clamp(OBSTACLE_MIN_FALL_SPEED, OBSTACLE_MAX_FALL_SPEED);

    Ok(SpawnSpec {
        id: tx.hash.clone(),
        size,
        fall_speed,
        tags: ObstacleTags { uniswap, high_mev },
    })
}

/// Apply one feed event to the registry.
///
/// Spawns that fail to classify are logged and dropped; a confirm for an
/// unknown hash is a no-op. This never fails and never stalls later events.
pub fn ingest(state: &mut GameState, event: FeedEvent) {
    match event {
        FeedEvent::Pending(tx) => match classify(&tx) {
            Ok(spec) => state.spawn_obstacle(spec),
            Err(err) => log::warn!("dropping pending tx: {err}"),
        },
        FeedEvent::Confirmed(hash) => state.confirm_obstacle(&hash),
    }
}
