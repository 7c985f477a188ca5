//! Fixed-cadence simulation step
//!
//! The state machine: one call advances the game by exactly one logical frame.

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// At least one activate event (tap/click/key) arrived before this frame
    pub activate: bool,
}

impl TickInput {
    pub const ACTIVATE: TickInput = TickInput { activate: true };
}

/// Advance the game state by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    match state.phase {
        GamePhase::Waiting => {
            if input.activate {
                state.actor.flap(state.config.impulse);
                state.phase = GamePhase::Running;
                events.push(GameEvent::Started);
                log::info!("Run started (attempt {})", state.attempt + 1);
            }
        }

        GamePhase::Running => {
            // Physics
            if input.activate {
                state.actor.flap_step(state.config.impulse);
                events.push(GameEvent::Flapped);
            } else {
                state.actor.step(state.config.gravity);
            }

            // Obstacles
            if let Some(id) = state.field.update(&state.config) {
                events.push(GameEvent::ObstacleSpawned { id });
            }

            // Scoring
            let awarded = state
                .scores
                .award_passes(&mut state.field, state.actor.pos.x);
            let first = state.scores.score - awarded;
            for n in 1..=awarded {
                events.push(GameEvent::Scored { score: first + n });
            }

            // Collisions
            if let Some(cause) = collision::detect(
                &state.actor,
                state.field.iter(),
                state.config.world_height,
            ) {
                let new_best = state.scores.record_attempt();
                state.phase = GamePhase::Ended;
                log::info!(
                    "Crashed ({:?}) with score {} (best {})",
                    cause,
                    state.scores.score,
                    state.scores.best
                );
                events.push(GameEvent::Crashed {
                    score: state.scores.score,
                    best: state.scores.best,
                    new_best,
                    cause,
                });
            }
        }

        GamePhase::Ended => {
            if input.activate && state.reset() {
                events.push(GameEvent::Reset);
            }
        }
    }

    events
}
