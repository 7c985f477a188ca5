//! Platform abstraction layer
//!
//! Browser-only collaborators of the core:
//! - Frame loop driven by `requestAnimationFrame`
//! - Input listeners feeding the activate queue
//! - Best-score storage in LocalStorage
//!
//! Native builds drive `Game` directly (see `main.rs`).

#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
#[cfg(target_arch = "wasm32")]
pub use web::{FlapGame, WebRunner};

/// Keys (as `KeyboardEvent.code`) that count as an activate event
pub const ACTIVATE_KEYS: &[&str] = &["Space", "ArrowUp", "KeyW"];
/// Key toggling the demo autopilot
pub const AUTOPILOT_KEY: &str = "KeyD";
/// Key toggling sound
pub const MUTE_KEY: &str = "KeyM";

/// What a key press does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Activate,
    ToggleAutopilot,
    ToggleMute,
}

impl KeyAction {
    /// Map a `KeyboardEvent.code`; unbound keys are ignored
    pub fn from_code(code: &str) -> Option<Self> {
        if ACTIVATE_KEYS.contains(&code) {
            Some(KeyAction::Activate)
        } else if code == AUTOPILOT_KEY {
            Some(KeyAction::ToggleAutopilot)
        } else if code == MUTE_KEY {
            Some(KeyAction::ToggleMute)
        } else {
            None
        }
    }
}

/// What a `pagehide` means for the running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHide {
    /// Kept in the back/forward cache and may be shown again
    Suspend,
    /// The page is going away for good
    Teardown,
}

impl PageHide {
    /// From `PageTransitionEvent.persisted`
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Suspend
        } else {
            PageHide::Teardown
        }
    }
}
