//! All-time best results of players that left the arena.

use serde::{Deserialize, Serialize};

use crate::config::game::BEST_LIST_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestEntry {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Default)]
pub struct BestList {
    entries: Vec<BestEntry>,
}

impl BestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a finished result. Ties keep the earlier entry ahead.
    pub fn record(&mut self, name: &str, score: i64) {
        let at = self.entries.partition_point(|e| e.score >= score);
        if at >= BEST_LIST_SIZE {
            return;
        }
        self.entries.insert(
            at,
            BestEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(BEST_LIST_SIZE);
    }

    pub fn top(&self) -> &[BestEntry] {
        &self.entries
    }
}
