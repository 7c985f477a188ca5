//! Demo controller
//!
//! Plays the game from snapshots alone, so it drives the exact same input path
//! as a human: it only ever decides whether to activate on a frame.

use crate::config::GameConfig;
use crate::sim::{GamePhase, Snapshot};

/// How far down the gap to aim, as a fraction of its size
const AIM_FRACTION: f32 = 0.7;
/// Frames to linger on the crash before restarting
const RESTART_DELAY_FRAMES: u32 = 60;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    ended_frames: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to activate on the frame after `snapshot`
    pub fn decide(&mut self, snapshot: &Snapshot, config: &GameConfig) -> bool {
        match snapshot.phase {
            GamePhase::Waiting => {
                self.ended_frames = 0;
                true
            }
            GamePhase::Running => {
                let target = Self::target_y(snapshot, config);
                snapshot.actor_y > target && snapshot.velocity >= 0.0
            }
            GamePhase::Ended => {
                self.ended_frames += 1;
                if self.ended_frames >= RESTART_DELAY_FRAMES {
                    self.ended_frames = 0;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Aim point inside the next gap the actor has not fully cleared
    fn target_y(snapshot: &Snapshot, config: &GameConfig) -> f32 {
        let actor_left = snapshot.actor_x - snapshot.actor_radius;
        snapshot
            .obstacles
            .iter()
            .find(|o| o.right() >= actor_left)
            .map(|o| o.gap_start + o.gap_size * AIM_FRACTION)
            .unwrap_or(config.world_height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::GameEvent;
    use crate::Game;

    #[test]
    fn test_starts_and_restarts() {
        let config = GameConfig::default();
        let mut pilot = Autopilot::new();
        let mut game = Game::new(config.clone(), MemoryStore::new()).unwrap();
        let snapshot = game.snapshot();
        assert!(pilot.decide(&snapshot, &config));

        // Force an ended game by free-falling
        game.input().activate();
        game.step_frames(300);
        let ended = game.snapshot();
        assert_eq!(ended.phase, GamePhase::Ended);

        let presses = (0..RESTART_DELAY_FRAMES)
            .filter(|_| pilot.decide(&ended, &config))
            .count();
        assert_eq!(presses, 1);
    }

    #[test]
    fn test_clears_obstacles() {
        let config = GameConfig::default();
        let mut pilot = Autopilot::new();
        let mut game = Game::new(config.clone(), MemoryStore::new()).unwrap();
        let input = game.input();

        let mut scored = 0;
        for _ in 0..1500 {
            if pilot.decide(&game.snapshot(), &config) {
                input.activate();
            }
            for event in game.step() {
                if let GameEvent::Scored { .. } = event {
                    scored += 1;
                }
            }
        }
        assert!(scored >= 3, "autopilot only scored {}", scored);
    }
}
