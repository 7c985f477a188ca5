//! Flap Engine - a side-scrolling avoidance game for greeting pages
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, state machine)
//! - `game`: Frame driver owning the simulation, input queue and best score
//! - `config`: Data-driven tuning and theme hooks
//! - `persistence`: Best-score key-value storage
//! - `platform`: Browser frame loop and storage (wasm32)
//! - `render`: Render collaborators consuming per-frame snapshots

pub mod autopilot;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::{ConfigError, GameConfig, Theme};
pub use game::Game;
pub use input::{InputQueue, InputSender};
pub use persistence::{BestScore, KeyValueStore, MemoryStore};

/// Default tuning constants (per logical frame at 60 Hz)
pub mod consts {
    /// Logical frames per second
    pub const FRAME_RATE: u32 = 60;
    /// Longest wall-clock delta accepted in one refresh (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
    /// Maximum logical frames per refresh to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 500.0;

    /// Actor defaults - fixed column, world scrolls past
    pub const ACTOR_X: f32 = 80.0;
    pub const ACTOR_START_Y: f32 = 250.0;
    pub const ACTOR_RADIUS: f32 = 12.0;

    /// Downward acceleration (px/frame²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by an activate event (px/frame, negative is up)
    pub const IMPULSE: f32 = -7.0;

    /// Obstacle defaults
    pub const GAP_SIZE: f32 = 130.0;
    pub const GAP_MARGIN: f32 = 60.0;
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const SCROLL_SPEED: f32 = 2.5;
    /// Running frames between spawns
    pub const SPAWN_INTERVAL: u32 = 100;

    /// Default RNG seed
    pub const SEED: u64 = 0x5EED;
}
