//! Browser frame loop
//!
//! `WebRunner` owns the `requestAnimationFrame` callback and every DOM
//! listener it installs. Stopping (or dropping) the runner cancels the pending
//! frame and detaches all listeners, so a removed page leaves nothing running.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PageTransitionEvent};

use super::{KeyAction, LocalStorageStore, PageHide};
use crate::audio::AudioManager;
use crate::autopilot::Autopilot;
use crate::config::GameConfig;
use crate::game::Game;
use crate::input::InputSender;
use crate::render::{CanvasSink, FrameSink};

/// An installed DOM listener, kept so it can be removed again
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Remove from the DOM; the closure stays alive until `self` is dropped
    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }

    fn detach(self) {
        self.remove();
    }
}

struct Runner {
    game: Game<LocalStorageStore>,
    sink: Box<dyn FrameSink>,
    audio: AudioManager,
    autopilot: Option<Autopilot>,
    input: InputSender,
    raf_id: Option<i32>,
    raf_closure: Option<Closure<dyn FnMut(f64)>>,
    listeners: Vec<Listener>,
    running: bool,
}

impl Runner {
    fn on_frame(&mut self, time: f64) {
        if let Some(pilot) = &mut self.autopilot {
            if pilot.decide(&self.game.snapshot(), self.game.config()) {
                self.input.activate();
            }
        }

        let events = self.game.frame(time);
        self.audio.play_events(&events);
        self.sink.present(&self.game.snapshot());
    }

    fn schedule(&mut self) {
        let Some(window) = web_sys::window() else { return };
        let Some(closure) = &self.raf_closure else { return };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn toggle_autopilot(&mut self) {
        self.autopilot = match self.autopilot {
            Some(_) => None,
            None => Some(Autopilot::new()),
        };
        log::info!("Demo mode: {}", self.autopilot.is_some());
    }

    fn toggle_mute(&mut self) {
        let muted = self.audio.toggle_muted();
        log::info!("Sound {}", if muted { "off" } else { "on" });
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        if let (Some(window), Some(id)) = (web_sys::window(), self.raf_id.take()) {
            let _ = window.cancel_animation_frame(id);
        }
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.raf_closure = None;
        log::info!("Game loop stopped");
    }
}

/// Handle to a game running on a canvas
pub struct WebRunner {
    inner: Rc<RefCell<Runner>>,
}

impl WebRunner {
    /// Attach a game to `canvas` and start the frame loop
    pub fn start(canvas: &HtmlCanvasElement, config: GameConfig) -> Result<Self, JsValue> {
        let sink = CanvasSink::new(canvas, &config)?;
        let game = Game::new(config, LocalStorageStore::open())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let input = game.input();

        let inner = Rc::new(RefCell::new(Runner {
            game,
            sink: Box::new(sink),
            audio: AudioManager::new(),
            autopilot: None,
            input,
            raf_id: None,
            raf_closure: None,
            listeners: Vec::new(),
            running: true,
        }));

        Self::install_listeners(&inner, canvas)?;

        let weak = Rc::downgrade(&inner);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(inner) = weak.upgrade() else { return };
            let mut runner = inner.borrow_mut();
            if !runner.running {
                return;
            }
            runner.on_frame(time);
            runner.schedule();
        });
        {
            let mut runner = inner.borrow_mut();
            runner.raf_closure = Some(closure);
            runner.schedule();
        }

        log::info!("Game loop started");
        Ok(Self { inner })
    }

    fn install_listeners(
        inner: &Rc<RefCell<Runner>>,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas_target: EventTarget = canvas.clone().into();
        let document_target: EventTarget = document.clone().into();
        let window_target: EventTarget = window.into();
        let input = inner.borrow().input.clone();

        // Pointer (mouse, pen and touch)
        {
            let weak = Rc::downgrade(inner);
            let input = input.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                activate(&weak, &input);
            });
            adopt(inner, listen(&canvas_target, "pointerdown", closure)?);
        }

        // Keep touches from scrolling or zooming the page
        {
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
            });
            adopt(inner, listen(&canvas_target, "touchstart", closure)?);
        }

        // Keyboard
        {
            let weak = Rc::downgrade(inner);
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else { return };
                if event.repeat() {
                    return;
                }
                match KeyAction::from_code(&event.code()) {
                    Some(KeyAction::Activate) => {
                        event.prevent_default();
                        activate(&weak, &input);
                    }
                    Some(KeyAction::ToggleAutopilot) => with_runner(&weak, Runner::toggle_autopilot),
                    Some(KeyAction::ToggleMute) => with_runner(&weak, Runner::toggle_mute),
                    None => {}
                }
            });
            adopt(inner, listen(&document_target, "keydown", closure)?);
        }

        // Hidden tabs get no frames; don't replay the gap as a burst
        {
            let weak = Rc::downgrade(inner);
            let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                with_runner(&weak, |runner| runner.game.resync_clock());
            });
            adopt(inner, listen(&document_target, "visibilitychange", closure)?);
        }

        // Restored from the back/forward cache
        {
            let weak = Rc::downgrade(inner);
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if page_persisted(&event) {
                    log::info!("Page restored from cache");
                    with_runner(&weak, |runner| runner.game.resync_clock());
                }
            });
            adopt(inner, listen(&window_target, "pageshow", closure)?);
        }

        // Navigating away tears everything down unless the page is cached
        {
            let weak = Rc::downgrade(inner);
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if PageHide::from_persisted(page_persisted(&event)) == PageHide::Suspend {
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    // This closure is one of the runner's listeners and must
                    // outlive its own dispatch
                    if let Ok(mut runner) = inner.try_borrow_mut() {
                        let listeners: Vec<Listener> = runner.listeners.drain(..).collect();
                        runner.stop();
                        drop(runner);
                        defer_drop(listeners);
                    }
                }
            });
            adopt(inner, listen(&window_target, "pagehide", closure)?);
        }

        Ok(())
    }

    /// Queue an activate event, as a tap would
    pub fn activate(&self) {
        self.inner.borrow().input.activate();
    }

    /// Current frame as JSON (for page scripts and debugging)
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.inner.borrow().game.snapshot()).unwrap_or_default()
    }

    /// Cancel the frame loop and detach every listener. Safe to call twice.
    pub fn stop(&self) {
        self.inner.borrow_mut().stop();
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Queue an activate event and wake audio (a user gesture is required)
fn activate(weak: &Weak<RefCell<Runner>>, input: &InputSender) {
    input.activate();
    let Some(inner) = weak.upgrade() else { return };
    if let Ok(runner) = inner.try_borrow() {
        runner.audio.resume();
    }
}

fn with_runner(weak: &Weak<RefCell<Runner>>, f: impl FnOnce(&mut Runner)) {
    let Some(inner) = weak.upgrade() else { return };
    if let Ok(mut runner) = inner.try_borrow_mut() {
        f(&mut runner);
    }
}

fn page_persisted(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(|e| e.persisted())
}

/// Hand a listener to the runner so `stop` can detach it
fn adopt(inner: &Rc<RefCell<Runner>>, listener: Listener) {
    inner.borrow_mut().listeners.push(listener);
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
) -> Result<Listener, JsValue> {
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}

/// Detach listeners now but free their closures on the next task, after the
/// current dispatch has returned
fn defer_drop(listeners: Vec<Listener>) {
    for listener in &listeners {
        listener.remove();
    }
    let Some(window) = web_sys::window() else { return };
    let callback = Closure::once_into_js(move || drop(listeners));
    let _ = window.set_timeout_with_callback(callback.unchecked_ref());
}

/// JavaScript-facing handle
#[wasm_bindgen]
pub struct FlapGame {
    runner: WebRunner,
}

#[wasm_bindgen]
impl FlapGame {
    /// Start a game on the canvas with `canvas_id`; `config_json` overrides defaults
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<FlapGame, JsValue> {
        let config = match config_json {
            Some(json) => {
                GameConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => GameConfig::default(),
        };

        let canvas: HtmlCanvasElement = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into()?;

        Ok(FlapGame {
            runner: WebRunner::start(&canvas, config)?,
        })
    }

    pub fn activate(&self) {
        self.runner.activate();
    }

    pub fn snapshot(&self) -> String {
        self.runner.snapshot_json()
    }

    /// Stop the loop and detach listeners
    pub fn stop(&self) {
        self.runner.stop();
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<FlapGame>> = const { RefCell::new(None) };
}

/// Mount the default game on `#game` and keep it alive for the page
pub fn mount_default() -> Result<(), JsValue> {
    let game = FlapGame::new("game", None)?;
    MOUNTED.with(|slot| {
        if let Some(previous) = slot.borrow_mut().replace(game) {
            previous.stop();
        }
    });
    Ok(())
}
