//! Activate-event queue
//!
//! Input handlers fire asynchronously with respect to the frame loop. They only
//! append to this queue; the game drains it once at the start of each frame so
//! simulation state is never mutated mid-step.

use std::sync::mpsc::{self, Receiver, Sender};

/// Cloneable handle given to input listeners
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<()>,
}

impl InputSender {
    /// Queue one activate event (tap, click or key)
    pub fn activate(&self) {
        // The receiver only goes away with the game itself
        let _ = self.tx.send(());
    }
}

/// Receiving side, owned by the game
#[derive(Debug)]
pub struct InputQueue {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every queued event; returns how many there were
    pub fn drain(&self) -> usize {
        self.rx.try_iter().count()
    }
}
