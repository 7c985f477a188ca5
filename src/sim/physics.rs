//! The player-controlled actor
//!
//! The actor never moves horizontally; only `pos.y` and `vel` change.
//! Integration is semi-implicit Euler: velocity first, then position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// The single player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Center; x is fixed for the whole run
    pub pos: Vec2,
    /// Vertical velocity (px/frame, +y is down)
    pub vel: f32,
    /// Collision half-size
    pub radius: f32,
}

impl Actor {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.actor_x, config.actor_start_y),
            vel: 0.0,
            radius: config.actor_radius,
        }
    }

    /// Advance one frame under gravity
    #[inline]
    pub fn step(&mut self, gravity: f32) {
        self.vel += gravity;
        self.pos.y += self.vel;
    }

    /// Override velocity with the upward impulse
    #[inline]
    pub fn flap(&mut self, impulse: f32) {
        self.vel = impulse;
    }

    /// Advance one frame on which an activate event arrived
    #[inline]
    pub fn flap_step(&mut self, impulse: f32) {
        self.flap(impulse);
        self.pos.y += self.vel;
    }

    /// Top of the collision box
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Bottom of the collision box
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}
