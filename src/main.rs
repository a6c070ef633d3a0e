//! Txfall entry point
//!
//! Runs the simulation headless with a synthetic mempool feed. The real
//! transport and renderer are external collaborators; this binary wires a
//! fake feed and a logging sink so the core can be watched from a terminal.

use std::thread;
use std::time::Duration;

use rand::Rng;

use txfall::engine::{Engine, EngineConfig};
use txfall::feed::{FeedEvent, PendingTx};
use txfall::snapshot::{RenderSink, Snapshot};

/// Logs one line per second of game time instead of drawing pixels
struct LogSink;

impl RenderSink for LogSink {
    fn present(&mut self, snapshot: &Snapshot) {
        if snapshot.tick % 60 == 0 || snapshot.game_over {
            log::info!(
                "tick {} score {} lives {} obstacles {}{}",
                snapshot.tick,
                snapshot.score,
                snapshot.lives,
                snapshot.obstacles.len(),
                if snapshot.game_over { " GAME OVER" } else { "" },
            );
        }
    }
}

fn load_config() -> EngineConfig {
    let Some(path) = std::env::args().nth(1) else {
        return EngineConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match EngineConfig::from_json(&json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("bad config {path}: {err}, using defaults");
                EngineConfig::default()
            }
        },
        Err(err) => {
            log::warn!("cannot read config {path}: {err}, using defaults");
            EngineConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("txfall (headless) starting...");

    let (engine, handle) = Engine::new(load_config());

    // Synthetic mempool: ~10 pending tx/s for a minute, then stop.
    let feeder_handle = handle.clone();
    let feeder = thread::spawn(move || {
        let mut rng = rand::rng();
        for _ in 0..600 {
            let hash = format!("0x{:032x}{:032x}", rng.random::<u128>(), rng.random::<u128>());
            let to = if rng.random_bool(0.15) {
                txfall::consts::UNISWAP_ROUTER.to_string()
            } else {
                format!("0x{:040x}", rng.random::<u128>())
            };
            let gas = rng.random_range(21_000..400_000);

            feeder_handle.send_feed(FeedEvent::Pending(PendingTx {
                hash: hash.clone(),
                to: Some(to),
                gas: Some(gas),
            }));
            thread::sleep(Duration::from_millis(100));

            // Some txs land on-chain shortly after
            if rng.random_bool(0.3) {
                feeder_handle.send_feed(FeedEvent::Confirmed(hash));
            }
        }
        feeder_handle.stop();
    });

    let mut sink = LogSink;
    let state = engine.run(&mut sink);
    let _ = feeder.join();

    log::info!(
        "done: {} ticks, score {}, lives {}",
        state.time_ticks,
        state.score,
        state.player.lives
    );
}
