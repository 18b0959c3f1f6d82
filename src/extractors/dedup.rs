// src/extractors/dedup.rs
use std::collections::HashSet;

/// First-seen gate for one extraction call. Keys are compared by exact string
/// equality, so a raw fallback fragment never collides with a canonical date.
#[derive(Debug, Default)]
pub struct DeduplicationTracker {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl DeduplicationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` if it is new. Returns whether it was kept.
    pub fn offer(&mut self, key: String) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.ordered.push(key);
        true
    }

    pub fn into_dates(self) -> Vec<String> {
        self.ordered
    }
}
