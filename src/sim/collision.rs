//! Collision detection against world bounds and obstacles
//!
//! The actor is treated as an axis-aligned box of half-size `radius`.
//! Every test is independent; the first hit found ends the attempt.

use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::physics::Actor;

/// What the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    /// Above the top of the world
    Ceiling,
    /// Below the bottom of the world
    Floor,
    /// Outside the gap of the obstacle with this id
    Obstacle { id: u32 },
}

/// Check the actor against the vertical world bounds `[0, height]`
pub fn bounds_collision(actor: &Actor, world_height: f32) -> Option<CollisionCause> {
    if actor.top() < 0.0 {
        Some(CollisionCause::Ceiling)
    } else if actor.bottom() > world_height {
        Some(CollisionCause::Floor)
    } else {
        None
    }
}

/// Check whether the actor overlaps an obstacle's barriers
pub fn obstacle_collision(actor: &Actor, obstacle: &Obstacle) -> bool {
    let overlaps_x = actor.right() > obstacle.x && actor.left() < obstacle.right();
    if !overlaps_x {
        return false;
    }
    actor.top() < obstacle.gap_start || actor.bottom() > obstacle.gap_end()
}

/// Run every check; bounds first, then obstacles oldest first
pub fn detect<'a>(
    actor: &Actor,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    world_height: f32,
) -> Option<CollisionCause> {
    if let Some(cause) = bounds_collision(actor, world_height) {
        return Some(cause);
    }
    obstacles
        .into_iter()
        .find(|o| obstacle_collision(actor, o))
        .map(|o| CollisionCause::Obstacle { id: o.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use proptest::prelude::*;

    fn actor_at(y: f32) -> Actor {
        let mut actor = Actor::new(&GameConfig::default());
        actor.pos.y = y;
        actor
    }

    fn obstacle(x: f32, gap_start: f32) -> Obstacle {
        Obstacle {
            id: 9,
            x,
            width: 50.0,
            gap_start,
            gap_size: 130.0,
            scored: false,
        }
    }

    #[test]
    fn test_inside_gap_no_collision() {
        // actor 68..92 x 153..177, band 100..230
        let actor = actor_at(165.0);
        assert!(!obstacle_collision(&actor, &obstacle(50.0, 100.0)));
    }

    #[test]
    fn test_outside_gap_collides() {
        let o = obstacle(50.0, 100.0);
        // top at 95 pokes above the band
        assert!(obstacle_collision(&actor_at(107.0), &o));
        // bottom at 235 pokes below the band
        assert!(obstacle_collision(&actor_at(223.0), &o));
        assert_eq!(
            detect(&actor_at(107.0), [&o], 500.0),
            Some(CollisionCause::Obstacle { id: 9 })
        );
    }

    #[test]
    fn test_no_horizontal_overlap() {
        let actor = actor_at(20.0);
        // obstacle entirely right of the actor
        assert!(!obstacle_collision(&actor, &obstacle(92.0, 300.0)));
        // obstacle entirely left of the actor
        assert!(!obstacle_collision(&actor, &obstacle(18.0, 300.0)));
        // one pixel of overlap
        assert!(obstacle_collision(&actor, &obstacle(91.0, 300.0)));
    }

    #[test]
    fn test_bounds_without_obstacles() {
        assert_eq!(bounds_collision(&actor_at(11.0), 500.0), Some(CollisionCause::Ceiling));
        assert_eq!(bounds_collision(&actor_at(12.0), 500.0), None);
        assert_eq!(bounds_collision(&actor_at(488.0), 500.0), None);
        assert_eq!(bounds_collision(&actor_at(489.0), 500.0), Some(CollisionCause::Floor));
    }

    #[test]
    fn test_bounds_reported_before_obstacles() {
        let o = obstacle(50.0, 100.0);
        assert_eq!(
            detect(&actor_at(-5.0), [&o], 500.0),
            Some(CollisionCause::Ceiling)
        );
    }

    proptest! {
        #[test]
        fn prop_bounds_iff_outside_world(y in -100.0f32..600.0) {
            let actor = actor_at(y);
            let outside = y - 12.0 < 0.0 || y + 12.0 > 500.0;
            prop_assert_eq!(detect(&actor, std::iter::empty(), 500.0).is_some(), outside);
        }
    }
}
