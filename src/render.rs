//! Render collaborators
//!
//! The core never draws. Once per refresh the frame loop hands the latest
//! `Snapshot` to a `FrameSink`.

use crate::sim::{GamePhase, Snapshot};

/// Anything that can present a frame
pub trait FrameSink {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Logs phase changes and score milestones; used by headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    last_phase: Option<GamePhase>,
    last_score: u32,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, snapshot: &Snapshot) {
        if self.last_phase != Some(snapshot.phase) {
            log::info!(
                "[frame {}] {:?} score={} best={}",
                snapshot.frame,
                snapshot.phase,
                snapshot.score,
                snapshot.best_score
            );
            self.last_phase = Some(snapshot.phase);
        }
        if snapshot.score != self.last_score {
            if snapshot.score > 0 && snapshot.score % 10 == 0 {
                log::info!("[frame {}] score {}", snapshot.frame, snapshot.score);
            }
            self.last_score = snapshot.score;
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::TAU;

    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::FrameSink;
    use crate::config::{GameConfig, Theme};
    use crate::sim::{GamePhase, Snapshot};

    /// Draws a snapshot onto a 2D canvas sized to the world
    pub struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        theme: Theme,
        width: f64,
        height: f64,
    }

    impl CanvasSink {
        pub fn new(
            canvas: &HtmlCanvasElement,
            config: &GameConfig,
        ) -> Result<Self, wasm_bindgen::JsValue> {
            use wasm_bindgen::JsCast;

            canvas.set_width(config.world_width as u32);
            canvas.set_height(config.world_height as u32);

            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| wasm_bindgen::JsValue::from_str("2d context unavailable"))?
                .dyn_into::<CanvasRenderingContext2d>()?;

            Ok(Self {
                ctx,
                theme: config.theme.clone(),
                width: config.world_width as f64,
                height: config.world_height as f64,
            })
        }

        fn draw_hud(&self, snapshot: &Snapshot) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str(&self.theme.text);
            ctx.set_text_align("center");

            ctx.set_font("bold 36px sans-serif");
            let _ = ctx.fill_text(&snapshot.score.to_string(), self.width / 2.0, 56.0);

            ctx.set_font("16px sans-serif");
            let _ = ctx.fill_text(
                &format!("Best {}", snapshot.best_score),
                self.width / 2.0,
                80.0,
            );

            let prompt = match snapshot.phase {
                GamePhase::Waiting => Some("Tap to fly"),
                GamePhase::Ended => Some("Tap to try again"),
                GamePhase::Running => None,
            };
            if let Some(prompt) = prompt {
                ctx.set_font("bold 20px sans-serif");
                let _ = ctx.fill_text(prompt, self.width / 2.0, self.height * 0.7);
            }
        }
    }

    impl FrameSink for CanvasSink {
        fn present(&mut self, snapshot: &Snapshot) {
            let ctx = &self.ctx;

            ctx.set_fill_style_str(&self.theme.background);
            ctx.fill_rect(0.0, 0.0, self.width, self.height);

            // Obstacles: upper and lower barrier around the gap
            ctx.set_fill_style_str(&self.theme.obstacle);
            for o in &snapshot.obstacles {
                let x = o.x as f64;
                let w = o.width as f64;
                ctx.fill_rect(x, 0.0, w, o.gap_start as f64);
                let gap_end = o.gap_end() as f64;
                ctx.fill_rect(x, gap_end, w, self.height - gap_end);
            }

            // Actor
            ctx.set_fill_style_str(&self.theme.actor);
            ctx.begin_path();
            let _ = ctx.arc(
                snapshot.actor_x as f64,
                snapshot.actor_y as f64,
                snapshot.actor_radius as f64,
                0.0,
                TAU,
            );
            ctx.fill();

            self.draw_hud(snapshot);
        }
    }
}
