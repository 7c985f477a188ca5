//! Obstacle spawning, scrolling and retirement
//!
//! Obstacles are kept in creation order (ascending id) so that every per-frame
//! pass visits the oldest first.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// A paired upper/lower barrier with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top of the passable band
    pub gap_start: f32,
    pub gap_size: f32,
    /// Set once the actor has cleared this obstacle
    pub scored: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom of the passable band
    #[inline]
    pub fn gap_end(&self) -> f32 {
        self.gap_start + self.gap_size
    }

    /// Fully behind the world's leading edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Owner of every active obstacle
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    /// Running frames elapsed since the attempt started
    ticks: u64,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            next_id: 1,
        }
    }

    /// Drop every obstacle and restart the spawn cadence with a new seed
    pub fn reset(&mut self, seed: u64) {
        self.obstacles.clear();
        self.rng = Pcg32::seed_from_u64(seed);
        self.ticks = 0;
    }

    /// One Running frame: spawn if due, scroll, retire.
    /// Returns the id of a newly spawned obstacle.
    pub fn update(&mut self, config: &GameConfig) -> Option<u32> {
        let spawned = if self.ticks % config.spawn_interval as u64 == 0 {
            Some(self.spawn(config))
        } else {
            None
        };
        self.ticks += 1;

        self.advance(config.scroll_speed);
        self.retire();

        spawned
    }

    /// Spawn at the trailing edge with a random gap
    pub fn spawn(&mut self, config: &GameConfig) -> u32 {
        let gap_start = self
            .rng
            .random_range(config.min_gap_start()..=config.max_gap_start());
        self.spawn_at(config.world_width, gap_start, config)
    }

    /// Spawn with explicit placement
    pub fn spawn_at(&mut self, x: f32, gap_start: f32, config: &GameConfig) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        log::debug!("Obstacle {} spawned at x={} gap_start={:.1}", id, x, gap_start);

        self.obstacles.push(Obstacle {
            id,
            x,
            width: config.obstacle_width,
            gap_start,
            gap_size: config.gap_size,
            scored: false,
        });
        id
    }

    /// Scroll every obstacle toward the actor
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Remove obstacles that are fully off-screen; returns how many
    pub fn retire(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        before - self.obstacles.len()
    }

    /// Active obstacles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Running frames counted since the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
