//! Flap Engine entry point
//!
//! On the web this mounts the game on the `#game` canvas. Natively it runs a
//! headless demo: the autopilot plays a fixed number of frames and the result
//! is logged.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Flap Engine starting...");
    flap_engine::platform::web::mount_default()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flap_engine::autopilot::Autopilot;
    use flap_engine::render::{FrameSink, LogSink};
    use flap_engine::sim::GameEvent;
    use flap_engine::{Game, GameConfig, MemoryStore};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flap Engine (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    // Optional: path to a JSON config, then a frame count
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Could not load {}: {}", path, e);
                    std::process::exit(2);
                }
            }
        }
        None => GameConfig::default(),
    };
    let frames: u32 = args.next().and_then(|n| n.parse().ok()).unwrap_or(3600);

    let mut game = match Game::new(config, MemoryStore::new()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(2);
        }
    };

    let input = game.input();
    let mut pilot = Autopilot::new();
    let mut sink = LogSink::new();
    let mut attempts = 0;

    for _ in 0..frames {
        if pilot.decide(&game.snapshot(), game.config()) {
            input.activate();
        }
        for event in game.step() {
            if let GameEvent::Crashed { .. } = event {
                attempts += 1;
            }
        }
        sink.present(&game.snapshot());
    }

    let snapshot = game.snapshot();
    log::info!(
        "Demo finished after {} frames: score {}, best {}, crashes {}",
        frames,
        snapshot.score,
        snapshot.best_score,
        attempts
    );
}
