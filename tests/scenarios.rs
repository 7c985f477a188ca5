//! End-to-end scenarios through the public `Game` API

use flap_engine::persistence::{BestScore, KeyValueStore};
use flap_engine::sim::{CollisionCause, GameEvent, GamePhase, GameState, TickInput, tick};
use flap_engine::{Game, GameConfig, MemoryStore};

fn new_game() -> Game<MemoryStore> {
    Game::new(GameConfig::default(), MemoryStore::new()).unwrap()
}

/// Play until the attempt ends, returning the crash event
fn run_until_crash(game: &mut Game<MemoryStore>) -> GameEvent {
    for _ in 0..10_000 {
        for event in game.step() {
            if matches!(event, GameEvent::Crashed { .. }) {
                return event;
            }
        }
    }
    panic!("attempt never ended");
}

#[test]
fn first_activate_starts_run_and_first_frame_integrates() {
    let mut game = new_game();
    game.input().activate();

    let events = game.step();
    assert_eq!(events, vec![GameEvent::Started]);
    let s = game.snapshot();
    assert_eq!(s.phase, GamePhase::Running);
    assert_eq!(s.velocity, -7.0);
    assert_eq!(s.actor_y, 250.0);

    game.step();
    let s = game.snapshot();
    assert!((s.velocity - -6.6).abs() < 1e-5);
    assert!((s.actor_y - 243.4).abs() < 1e-4);
}

#[test]
fn velocity_grows_by_gravity_except_on_activate_frames() {
    let mut game = new_game();
    let input = game.input();
    input.activate();
    game.step();

    let mut previous = game.snapshot().velocity;
    for frame in 1..40 {
        let flap = frame % 13 == 0;
        if flap {
            input.activate();
        }
        game.step();
        let s = game.snapshot();
        if s.phase != GamePhase::Running {
            break;
        }
        if flap {
            assert_eq!(s.velocity, -7.0);
        } else {
            assert!((s.velocity - (previous + 0.4)).abs() < 1e-5);
        }
        previous = s.velocity;
    }
}

#[test]
fn ceiling_collision_with_no_obstacles() {
    let mut game = new_game();
    let input = game.input();

    // Flap every frame: the actor rises 7px per frame until it hits the top
    let mut crash = None;
    for _ in 0..100 {
        input.activate();
        for event in game.step() {
            if let GameEvent::Crashed { cause, .. } = event {
                crash = Some(cause);
            }
        }
        if crash.is_some() {
            break;
        }
    }

    assert_eq!(crash, Some(CollisionCause::Ceiling));
    let s = game.snapshot();
    assert_eq!(s.phase, GamePhase::Ended);
    assert!(s.actor_y - s.actor_radius < 0.0);
}

#[test]
fn gap_scenario_collision_and_single_point() {
    let config = GameConfig {
        gravity: 0.0,
        ..Default::default()
    };
    let mut state = GameState::new(config.clone(), 0);
    tick(&mut state, &TickInput::ACTIVATE);
    state.actor.vel = 0.0;

    // Obstacle at x=50..100 with band 100..230, actor inside the band
    state.field.spawn_at(50.0, 100.0, &config);
    state.actor.pos.y = 165.0;

    let mut points = 0;
    for _ in 0..60 {
        for event in tick(&mut state, &TickInput::default()) {
            match event {
                GameEvent::Scored { .. } => points += 1,
                GameEvent::Crashed { .. } => panic!("actor inside the band must not collide"),
                _ => {}
            }
        }
    }
    assert_eq!(points, 1);
    assert_eq!(state.score(), 1);

    // Same obstacle, actor poking above the band
    let mut state = GameState::new(config.clone(), 0);
    tick(&mut state, &TickInput::ACTIVATE);
    state.actor.vel = 0.0;
    state.field.spawn_at(50.0, 100.0, &config);
    state.actor.pos.y = 105.0;

    let events = tick(&mut state, &TickInput::default());
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Crashed {
            cause: CollisionCause::Obstacle { id: 1 },
            ..
        }
    )));
    assert_eq!(state.phase, GamePhase::Ended);
}

#[test]
fn spawned_gaps_respect_margins() {
    let config = GameConfig::default();
    for seed in 0..50 {
        let mut state = GameState::new(GameConfig { seed, ..config.clone() }, 0);
        tick(&mut state, &TickInput::ACTIVATE);
        state.config.gravity = 0.0;
        state.actor.vel = 0.0;
        for _ in 0..(config.spawn_interval * 3) {
            for event in tick(&mut state, &TickInput::default()) {
                if let GameEvent::ObstacleSpawned { id } = event {
                    let o = state.field.iter().find(|o| o.id == id).unwrap();
                    assert!(o.gap_start >= 60.0);
                    assert!(o.gap_start + 130.0 <= 460.0);
                }
            }
            if state.phase == GamePhase::Ended {
                break;
            }
        }
    }
}

#[test]
fn scoreless_attempt_leaves_store_untouched() {
    let mut game = new_game();
    let input = game.input();

    // Attempt 1: start, then flap upward into the ceiling with no points
    input.activate();
    game.step();
    for _ in 0..100 {
        input.activate();
        if game
            .step()
            .iter()
            .any(|e| matches!(e, GameEvent::Crashed { .. }))
        {
            break;
        }
    }
    assert_eq!(game.snapshot().phase, GamePhase::Ended);
    assert_eq!(game.snapshot().best_score, 0);
    assert_eq!(game.store().writes, 0);

    // Reset
    input.activate();
    assert_eq!(game.step(), vec![GameEvent::Reset]);
    assert_eq!(game.snapshot().phase, GamePhase::Waiting);
    assert_eq!(game.snapshot().best_score, 0);
}

#[test]
fn new_best_is_written_once_per_crash() {
    let mut game = new_game();
    let input = game.input();
    let mut pilot = flap_engine::autopilot::Autopilot::new();
    let config = game.config().clone();

    // Let the autopilot clear a few obstacles, then stop flapping
    let mut scored = 0;
    for _ in 0..2000 {
        if pilot.decide(&game.snapshot(), &config) {
            input.activate();
        }
        for event in game.step() {
            if let GameEvent::Scored { score } = event {
                scored = score;
            }
        }
        if scored >= 2 {
            break;
        }
    }
    assert!(scored >= 2);

    let crash = run_until_crash(&mut game);
    match crash {
        GameEvent::Crashed {
            score,
            best,
            new_best,
            ..
        } => {
            assert!(new_best);
            assert_eq!(best, score);
            assert!(score >= 2);
        }
        _ => unreachable!(),
    }
    assert_eq!(game.store().writes, 1);
    assert_eq!(
        BestScore::load(game.store()),
        game.snapshot().best_score
    );

    // A worse attempt leaves the best and the store alone
    let best = game.snapshot().best_score;
    input.activate();
    game.step(); // reset
    input.activate();
    game.step(); // start
    run_until_crash(&mut game);
    assert_eq!(game.snapshot().best_score, best);
    assert_eq!(game.store().writes, 1);
}

#[test]
fn stored_best_survives_into_a_new_game() {
    let mut store = MemoryStore::new();
    store.set(BestScore::STORAGE_KEY, 17);
    let game = Game::new(GameConfig::default(), store).unwrap();
    assert_eq!(game.snapshot().best_score, 17);

    let mut corrupt = MemoryStore::new();
    corrupt.set(BestScore::STORAGE_KEY, -1);
    let game = Game::new(GameConfig::default(), corrupt).unwrap();
    assert_eq!(game.snapshot().best_score, 0);
}

#[test]
fn reset_twice_without_running_is_noop() {
    let mut game = new_game();
    let input = game.input();
    input.activate();
    game.step();
    run_until_crash(&mut game);

    input.activate();
    assert_eq!(game.step(), vec![GameEvent::Reset]);
    let waiting = game.snapshot();

    let mut state = game.state().clone();
    assert!(!state.reset());
    assert_eq!(state.snapshot(), waiting);
}

#[test]
fn identical_inputs_give_identical_frames() {
    let mut a = new_game();
    let mut b = new_game();
    let (ia, ib) = (a.input(), b.input());

    for frame in 0..1000u32 {
        if frame % 19 == 0 {
            ia.activate();
            ib.activate();
        }
        assert_eq!(a.step(), b.step());
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
