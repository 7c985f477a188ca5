//! Frame driver
//!
//! `Game` is the one owner of a running instance: simulation state, the input
//! queue, the frame clock and the best-score store. Platform loops call
//! `frame(now_ms)` once per display refresh; headless callers use `step`.

use crate::config::{ConfigError, GameConfig};
use crate::input::{InputQueue, InputSender};
use crate::persistence::{BestScore, KeyValueStore};
use crate::sim::{GameClock, GameEvent, GameState, Snapshot, TickInput, tick};

pub struct Game<S: KeyValueStore> {
    state: GameState,
    clock: GameClock,
    input: InputQueue,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    /// Validate the config and load the stored best score
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let best = BestScore::load(&store);
        log::info!(
            "Game created ({}x{}, seed {}), best {}",
            config.world_width,
            config.world_height,
            config.seed,
            best
        );
        Ok(Self {
            clock: GameClock::new(config.frame_rate),
            state: GameState::new(config, best),
            input: InputQueue::new(),
            store,
        })
    }

    /// Handle for input listeners
    pub fn input(&self) -> InputSender {
        self.input.sender()
    }

    /// Run as many logical frames as the elapsed wall time calls for
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let steps = self.clock.advance(now_ms);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step());
        }
        events
    }

    /// Run exactly one logical frame, applying any queued input
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            activate: self.input.drain() > 0,
        };
        let events = tick(&mut self.state, &input);
        self.persist(&events);
        events
    }

    /// Run `n` logical frames, applying any queued input on the first
    pub fn step_frames(&mut self, n: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.step());
        }
        events
    }

    /// Forget the last timestamp (e.g. when the page was hidden)
    pub fn resync_clock(&mut self) {
        self.clock.resync();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Crashed {
                best,
                new_best: true,
                ..
            } = *event
            {
                log::info!("New best score: {}", best);
                BestScore::save(&mut self.store, best);
            }
        }
    }
}
