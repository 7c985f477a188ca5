//! Score keeping: one point per cleared obstacle, best-ever tracking

use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;

/// Current-attempt and best-ever scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub score: u32,
    pub best: u32,
}

impl ScoreKeeper {
    pub fn new(best: u32) -> Self {
        Self { score: 0, best }
    }

    /// Award a point for every unscored obstacle whose trailing edge is behind
    /// `actor_x`. Returns the number of points awarded this call.
    pub fn award_passes(&mut self, field: &mut ObstacleField, actor_x: f32) -> u32 {
        let mut awarded = 0;
        for obstacle in field.iter_mut() {
            if !obstacle.scored && obstacle.right() < actor_x {
                obstacle.scored = true;
                awarded += 1;
                log::debug!("Cleared obstacle {}", obstacle.id);
            }
        }
        self.score += awarded;
        awarded
    }

    /// Fold the finished attempt into the best score.
    /// Returns true when a new best was set.
    pub fn record_attempt(&mut self) -> bool {
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }

    /// Zero the current attempt; best is kept
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use proptest::prelude::*;

    #[test]
    fn test_pass_scores_exactly_once() {
        let config = GameConfig::default();
        let mut field = ObstacleField::new(1);
        field.spawn_at(50.0, 100.0, &config);
        let mut keeper = ScoreKeeper::new(0);

        // right edge 100 is ahead of actor x 80
        assert_eq!(keeper.award_passes(&mut field, 80.0), 0);

        field.advance(20.0);
        // right edge exactly at 80 has not passed yet
        assert_eq!(keeper.award_passes(&mut field, 80.0), 0);

        field.advance(0.5);
        assert_eq!(keeper.award_passes(&mut field, 80.0), 1);
        assert_eq!(keeper.score, 1);

        for _ in 0..10 {
            field.advance(2.0);
            assert_eq!(keeper.award_passes(&mut field, 80.0), 0);
        }
        assert_eq!(keeper.score, 1);
        assert!(field.as_slice()[0].scored);
    }

    #[test]
    fn test_record_attempt_keeps_max() {
        let mut keeper = ScoreKeeper::new(5);
        keeper.score = 3;
        assert!(!keeper.record_attempt());
        assert_eq!(keeper.best, 5);

        keeper.score = 8;
        assert!(keeper.record_attempt());
        assert_eq!(keeper.best, 8);

        keeper.reset();
        assert_eq!(keeper.score, 0);
        assert_eq!(keeper.best, 8);
    }

    proptest! {
        #[test]
        fn prop_best_is_max_of_attempts(attempts in prop::collection::vec(0u32..1000, 1..20)) {
            let mut keeper = ScoreKeeper::new(0);
            let mut last_best = 0;
            for &score in &attempts {
                keeper.score = score;
                keeper.record_attempt();
                prop_assert!(keeper.best >= last_best);
                last_best = keeper.best;
                keeper.reset();
            }
            prop_assert_eq!(keeper.best, attempts.iter().copied().max().unwrap_or(0));
        }
    }
}
