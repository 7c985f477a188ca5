//! Game configuration and theme hooks
//!
//! One parameterized engine replaces per-page copies: every page variant is a
//! `GameConfig` (usually JSON) rather than its own loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration cannot drive the engine
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world size must be positive, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },
    #[error("gap of {gap} with margin {margin} does not fit a world {height} high")]
    GapTooLarge { gap: f32, margin: f32, height: f32 },
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("impulse must point upward (negative), got {0}")]
    ImpulseNotUpward(f32),
    #[error("spawn interval must be at least one frame")]
    ZeroSpawnInterval,
    #[error("frame rate must be at least 1 Hz")]
    ZeroFrameRate,
    #[error("actor at ({x}, {y}) radius {radius} starts outside the world")]
    ActorOutOfBounds { x: f32, y: f32, radius: f32 },
    #[error("invalid config JSON: {0}")]
    Parse(String),
}

/// Colors handed to renderers; the simulation never reads these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub actor: String,
    pub obstacle: String,
    pub text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#1a0b2e".to_string(),
            actor: "#fbbf24".to_string(),
            obstacle: "#7c3aed".to_string(),
            text: "#ffffff".to_string(),
        }
    }
}

/// Tuning for one game instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub actor_x: f32,
    pub actor_start_y: f32,
    pub actor_radius: f32,
    /// px/frame², added to velocity every Running frame
    pub gravity: f32,
    /// px/frame, replaces velocity on activate
    pub impulse: f32,
    pub gap_size: f32,
    /// Minimum distance between a gap and the top/bottom edge
    pub gap_margin: f32,
    pub obstacle_width: f32,
    /// px/frame
    pub scroll_speed: f32,
    /// Running frames between spawns
    pub spawn_interval: u32,
    /// Logical frames per second
    pub frame_rate: u32,
    pub seed: u64,
    pub theme: Theme,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            actor_x: ACTOR_X,
            actor_start_y: ACTOR_START_Y,
            actor_radius: ACTOR_RADIUS,
            gravity: GRAVITY,
            impulse: IMPULSE,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            obstacle_width: OBSTACLE_WIDTH,
            scroll_speed: SCROLL_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            frame_rate: FRAME_RATE,
            seed: SEED,
            theme: Theme::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a playable world
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("actor_x", self.actor_x),
            ("actor_start_y", self.actor_start_y),
            ("actor_radius", self.actor_radius),
            ("gravity", self.gravity),
            ("impulse", self.impulse),
            ("gap_size", self.gap_size),
            ("gap_margin", self.gap_margin),
            ("obstacle_width", self.obstacle_width),
            ("scroll_speed", self.scroll_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }

        for (name, value) in [
            ("gap_size", self.gap_size),
            ("obstacle_width", self.obstacle_width),
            ("scroll_speed", self.scroll_speed),
            ("actor_radius", self.actor_radius),
            ("gravity", self.gravity),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.impulse < 0.0) {
            return Err(ConfigError::ImpulseNotUpward(self.impulse));
        }

        if self.gap_margin < 0.0 || self.gap_size + 2.0 * self.gap_margin > self.world_height {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap_size,
                margin: self.gap_margin,
                height: self.world_height,
            });
        }

        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        let r = self.actor_radius;
        let inside_x = self.actor_x - r >= 0.0 && self.actor_x + r <= self.world_width;
        let inside_y =
            self.actor_start_y - r >= 0.0 && self.actor_start_y + r <= self.world_height;
        if !(inside_x && inside_y) {
            return Err(ConfigError::ActorOutOfBounds {
                x: self.actor_x,
                y: self.actor_start_y,
                radius: r,
            });
        }

        Ok(())
    }

    /// Lowest legal gap start
    #[inline]
    pub fn min_gap_start(&self) -> f32 {
        self.gap_margin
    }

    /// Highest legal gap start
    #[inline]
    pub fn max_gap_start(&self) -> f32 {
        self.world_height - self.gap_margin - self.gap_size
    }
}
