//! Collection records: kanji/monster dexes, the review queue and stage clears.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A set of collected entity ids. Recording is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dex {
    entries: BTreeSet<String>,
}

impl Dex {
    /// Record an entity as collected. Returns true if it was new.
    pub fn record_collected(&mut self, id: String) -> bool {
        self.entries.insert(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Kanji answered incorrectly, queued for later review. Each id appears at
/// most once, in the order first missed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewQueue {
    ids: VecDeque<String>,
}

impl ReviewQueue {
    pub fn enqueue(&mut self, challenge_id: String) {
        if !self.ids.contains(&challenge_id) {
            self.ids.push_back(challenge_id);
        }
    }

    /// Drop a kanji once it has been reviewed. Returns false if it was not
    /// queued.
    pub fn remove(&mut self, challenge_id: &str) -> bool {
        match self.ids.iter().position(|id| id == challenge_id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Everything the player has collected across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub kanji_dex: Dex,
    pub monster_dex: Dex,
    pub review_queue: ReviewQueue,
    /// Stage id -> unix timestamp of the first clear.
    pub cleared_stages: BTreeMap<String, i64>,
}

impl Collection {
    pub fn record_stage_clear(&mut self, stage_id: &str, timestamp: i64) {
        self.cleared_stages
            .entry(stage_id.to_string())
            .or_insert(timestamp);
    }

    pub fn is_stage_cleared(&self, stage_id: &str) -> bool {
        self.cleared_stages.contains_key(stage_id)
    }
}
