//! Hall of Runes leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 finished runs by runes.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HALL_ENTRIES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallEntry {
    /// Runes held when the run ended
    pub runes: u64,
    pub score: u64,
    /// Zone reached (1-based)
    pub zone: u32,
    /// Final boss defeated
    pub won: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HallEntry {
    /// Ordering key: runes first, a win breaks ties
    fn beats(&self, other: &HallEntry) -> bool {
        (self.runes, self.won) > (other.runes, other.won)
    }
}

/// Hall of Runes leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HallEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rune_raid_hall";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run would make the hall
    pub fn qualifies(&self, entry: &HallEntry) -> bool {
        if entry.runes == 0 && !entry.won {
            return false;
        }
        if self.entries.len() < MAX_HALL_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| entry.beats(e)).unwrap_or(true)
    }

    /// Record a finished run.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_run(&mut self, entry: HallEntry) -> Option<usize> {
        if !self.qualifies(&entry) {
            return None;
        }

        // Sorted descending; equal runs keep arrival order
        let pos = self.entries.iter().position(|e| entry.beats(e));
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HALL_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most runes ever banked (if any)
    pub fn best_runes(&self) -> Option<u64> {
        self.entries.first().map(|e| e.runes)
    }

    /// Load the hall from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(hall) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded {} Hall of Runes entries", hall.entries.len());
                    return hall;
                }
            }
        }

        log::info!("No Hall of Runes found, starting fresh");
        Self::new()
    }

    /// Save the hall to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Hall of Runes saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(runes: u64, won: bool) -> HallEntry {
        HallEntry {
            runes,
            score: runes * 10,
            zone: 1,
            won,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_empty_run_does_not_qualify() {
        let hall = HighScores::new();
        assert!(!hall.qualifies(&run(0, false)));
        assert!(hall.qualifies(&run(0, true)));
    }

    #[test]
    fn test_sorted_descending() {
        let mut hall = HighScores::new();
        assert_eq!(hall.add_run(run(50, false)), Some(1));
        assert_eq!(hall.add_run(run(200, false)), Some(1));
        assert_eq!(hall.add_run(run(100, false)), Some(2));
        let runes: Vec<u64> = hall.entries.iter().map(|e| e.runes).collect();
        assert_eq!(runes, vec![200, 100, 50]);
        assert_eq!(hall.best_runes(), Some(200));
    }

    #[test]
    fn test_win_breaks_tie() {
        let mut hall = HighScores::new();
        hall.add_run(run(100, false));
        assert_eq!(hall.add_run(run(100, true)), Some(1));
        assert_eq!(hall.add_run(run(100, false)), Some(3));
    }

    #[test]
    fn test_capped_at_ten() {
        let mut hall = HighScores::new();
        for i in 1..=MAX_HALL_ENTRIES as u64 {
            hall.add_run(run(i * 10, false));
        }
        assert!(!hall.qualifies(&run(10, false)));
        assert_eq!(hall.add_run(run(5, false)), None);
        assert_eq!(hall.add_run(run(15, false)), Some(10));
        assert_eq!(hall.entries.len(), MAX_HALL_ENTRIES);
        assert_eq!(hall.entries.last().map(|e| e.runes), Some(15));
    }
}
