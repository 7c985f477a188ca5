//! Best-score persistence
//!
//! The only thing that outlives a page is one integer. Storage is
//! best-effort: an unavailable store or an absent/invalid value is a best
//! score of 0, never an error in the frame loop.

use std::collections::HashMap;

/// Synchronous integer key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64);
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
    /// Number of `set` calls, for tests and diagnostics
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
    }
}

/// Load/save of the best score under a fixed key
pub struct BestScore;

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flap_engine_best_score";

    /// Read the stored best score; absent or out-of-range values are 0
    pub fn load(store: &dyn KeyValueStore) -> u32 {
        match store.get(Self::STORAGE_KEY) {
            Some(value) => match u32::try_from(value) {
                Ok(best) => {
                    log::info!("Loaded best score {}", best);
                    best
                }
                Err(_) => {
                    log::warn!("Ignoring invalid stored best score {}", value);
                    0
                }
            },
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    /// Write the best score
    pub fn save(store: &mut dyn KeyValueStore, best: u32) {
        store.set(Self::STORAGE_KEY, i64::from(best));
        log::info!("Best score saved ({})", best);
    }
}
