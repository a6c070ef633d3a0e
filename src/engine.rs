//! 60 Hz clock and the mutation boundary between the tick and the feed
//!
//! The engine owns the game state outright. The transport and the input
//! device layer talk to it over channels only; their events are applied
//! between ticks, so the tick pipeline never observes a half-applied
//! mutation and the feed is never blocked by the simulation.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded, never, select, tick as ticker, unbounded};
use serde::Deserialize;

use crate::feed::{self, FeedEvent};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::snapshot::{RenderSink, Snapshot};

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulation rate in ticks per second
    pub tick_hz: u32,
    /// Seed for spawn placement
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_hz: crate::consts::TICK_RATE,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Pre-debounced input intents from the input device layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
    JumpPressed,
}

/// Held/queued input state folded from intents between ticks
#[derive(Debug, Clone, Copy, Default)]
struct HeldInput {
    left: bool,
    right: bool,
    jump_queued: bool,
}

impl HeldInput {
    fn apply(&mut self, intent: InputIntent) {
        match intent {
            InputIntent::LeftPressed => self.left = true,
            InputIntent::LeftReleased => self.left = false,
            InputIntent::RightPressed => self.right = true,
            InputIntent::RightReleased => self.right = false,
            InputIntent::JumpPressed => self.jump_queued = true,
        }
    }

    /// One-shot: the queued jump press fires on exactly one tick.
    fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump_queued,
        };
        self.jump_queued = false;
        input
    }
}

/// Channel ends handed to the outside world
#[derive(Debug, Clone)]
pub struct EngineHandle {
    feed: Sender<FeedEvent>,
    input: Sender<InputIntent>,
    stop: Sender<()>,
}

impl EngineHandle {
    /// Queue a feed event. Never blocks the caller on the simulation.
    pub fn send_feed(&self, event: FeedEvent) {
        let _ = self.feed.send(event);
    }

    /// Queue an input intent.
    pub fn send_input(&self, intent: InputIntent) {
        let _ = self.input.send(intent);
    }

    /// Stop the engine after the current tick completes.
    pub fn stop(&self) {
        let _ = self.stop.try_send(());
    }
}

/// Owns the game state and the fixed-rate clock
pub struct Engine {
    state: GameState,
    config: EngineConfig,
    feed_rx: Receiver<FeedEvent>,
    input_rx: Receiver<InputIntent>,
    stop_rx: Receiver<()>,
    held: HeldInput,
}

impl Engine {
    pub fn new(config: EngineConfig) -> (Self, EngineHandle) {
        let (feed_tx, feed_rx) = unbounded();
        let (input_tx, input_rx) = unbounded();
        let (stop_tx, stop_rx) = bounded(1);

        let engine = Self {
            state: GameState::new(config.seed),
            config,
            feed_rx,
            input_rx,
            stop_rx,
            held: HeldInput::default(),
        };
        let handle = EngineHandle {
            feed: feed_tx,
            input: input_tx,
            stop: stop_tx,
        };
        (engine, handle)
    }

    /// Run the fixed-rate loop until stopped or the run ends.
    ///
    /// Feed and input events are applied as they arrive, between ticks. Each
    /// tick runs the full pipeline and hands the committed snapshot to
    /// `sink`; the tick that reports game over is presented, then the loop
    /// exits and nothing mutates afterward. Returns the final state.
    pub fn run(mut self, sink: &mut dyn RenderSink) -> GameState {
        let period =
            Duration::from_nanos(1_000_000_000 / u64::from(self.config.tick_hz.max(1)));
        let clock = ticker(period);
        let mut feed_rx = self.feed_rx.clone();
        let mut input_rx = self.input_rx.clone();
        let mut stop_rx = self.stop_rx.clone();

        log::info!(
            "engine running at {} Hz, seed {}",
            self.config.tick_hz,
            self.config.seed
        );

        loop {
            select! {
                recv(stop_rx) -> msg => {
                    if msg.is_ok() {
                        log::info!("engine stopped at tick {}", self.state.time_ticks);
                        break;
                    }
                    // Handle dropped without a stop; keep running
                    stop_rx = never();
                }
                recv(feed_rx) -> event => match event {
                    Ok(event) => feed::ingest(&mut self.state, event),
                    Err(_) => feed_rx = never(),
                },
                recv(input_rx) -> intent => match intent {
                    Ok(intent) => self.held.apply(intent),
                    Err(_) => input_rx = never(),
                },
                recv(clock) -> _ => {
                    let input = self.held.take_tick_input();
                    let events = tick(&mut self.state, &input);
                    sink.present(&Snapshot::capture(&self.state));

                    if let Some(GameEvent::GameOver { score }) = events
                        .iter()
                        .find(|e| matches!(e, GameEvent::GameOver { .. }))
                    {
                        log::info!("game over, final score {score}");
                        break;
                    }
                }
            }
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::PendingTx;
    use std::thread;

    #[derive(Default)]
    struct CountingSink {
        presented: u64,
        last_obstacles: usize,
    }

    impl RenderSink for CountingSink {
        fn present(&mut self, snapshot: &Snapshot) {
            self.presented += 1;
            self.last_obstacles = snapshot.obstacles.len();
        }
    }

    #[test]
    fn test_held_input_folds_press_release() {
        let mut held = HeldInput::default();
        held.apply(InputIntent::LeftPressed);
        assert!(held.take_tick_input().left);

        held.apply(InputIntent::LeftReleased);
        held.apply(InputIntent::RightPressed);
        let input = held.take_tick_input();
        assert!(!input.left);
        assert!(input.right);
    }

    #[test]
    fn test_jump_press_fires_exactly_one_tick() {
        let mut held = HeldInput::default();
        held.apply(InputIntent::JumpPressed);
        assert!(held.take_tick_input().jump);
        assert!(!held.take_tick_input().jump);
    }

    #[test]
    fn test_config_from_json_with_defaults() {
        let config = EngineConfig::from_json(r#"{"seed": 99}"#).unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.tick_hz, crate::consts::TICK_RATE);
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_engine_ticks_ingests_and_stops() {
        let (engine, handle) = Engine::new(EngineConfig {
            tick_hz: 1000,
            seed: 3,
        });

        let worker = thread::spawn(move || {
            let mut sink = CountingSink::default();
            let state = engine.run(&mut sink);
            (state, sink)
        });

        handle.send_feed(FeedEvent::Pending(PendingTx {
            hash: "0xaa".to_string(),
            to: None,
            gas: Some(80_000),
        }));
        handle.send_input(InputIntent::RightPressed);
        thread::sleep(Duration::from_millis(100));
        handle.stop();

        let (state, sink) = worker.join().expect("engine thread panicked");
        assert!(state.time_ticks > 0);
        assert_eq!(state.score, state.time_ticks);
        assert_eq!(sink.presented, state.time_ticks);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.player.pos.x > (crate::consts::CANVAS_WIDTH - state.player.size.x) / 2.0);
    }
}
