//! Game state and core simulation types
//!
//! Everything a frame step reads or writes lives in `GameState`.

use serde::{Deserialize, Serialize};

use super::collision::CollisionCause;
use super::obstacles::{Obstacle, ObstacleField};
use super::physics::Actor;
use super::score::ScoreKeeper;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Actor hovers at the start position, waiting for the first activate
    Waiting,
    /// Active gameplay
    Running,
    /// Attempt over; frozen on the colliding frame until activate
    Ended,
}

/// Things that happened during a frame step, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Waiting -> Running
    Started,
    /// Impulse applied while Running
    Flapped,
    ObstacleSpawned { id: u32 },
    /// An obstacle was cleared; `score` is the new total
    Scored { score: u32 },
    /// Running -> Ended
    Crashed {
        score: u32,
        best: u32,
        new_best: bool,
        cause: CollisionCause,
    },
    /// Ended -> Waiting
    Reset,
}

/// Read-only view of one frame for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub actor_x: f32,
    pub actor_y: f32,
    pub actor_radius: f32,
    pub velocity: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub actor: Actor,
    pub field: ObstacleField,
    pub scores: ScoreKeeper,
    /// Frames stepped over the lifetime of this state
    pub frame: u64,
    /// Completed attempts; also varies the obstacle seed per attempt
    pub attempt: u32,
}

impl GameState {
    /// Create a waiting game with a previously stored best score
    pub fn new(config: GameConfig, best_score: u32) -> Self {
        Self {
            actor: Actor::new(&config),
            field: ObstacleField::new(config.seed),
            scores: ScoreKeeper::new(best_score),
            phase: GamePhase::Waiting,
            frame: 0,
            attempt: 0,
            config,
        }
    }

    /// Ended -> Waiting: reposition the actor, clear obstacles, zero the score.
    /// Does nothing (and returns false) in any other phase.
    pub fn reset(&mut self) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }

        self.attempt += 1;
        self.actor = Actor::new(&self.config);
        self.field
            .reset(self.config.seed.wrapping_add(self.attempt as u64));
        self.scores.reset();
        self.phase = GamePhase::Waiting;

        log::info!("Reset for attempt {}", self.attempt + 1);
        true
    }

    pub fn score(&self) -> u32 {
        self.scores.score
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best
    }

    /// Copy out what a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            phase: self.phase,
            actor_x: self.actor.pos.x,
            actor_y: self.actor.pos.y,
            actor_radius: self.actor.radius,
            velocity: self.actor.vel,
            obstacles: self.field.as_slice().to_vec(),
            score: self.scores.score,
            best_score: self.scores.best,
        }
    }
}
