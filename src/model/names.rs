//! Identifier Registry
//!
//! Assigns collision-free programmer names within one naming scope. Each
//! collection owns its own registry, so a sub-function called `def` never
//! collides with a service called `def`.
//!
//! The counter map starts with `reserved -> 0`. That makes the first
//! `reserved` already count as a repeat: protocol tables list many reserved
//! ranges and none of them may claim the bare name.

use std::collections::HashMap;

/// The placeholder name that is always suffixed
pub const RESERVED_NAME: &str = "reserved";

/// Per-scope name counter
#[derive(Debug, Clone)]
pub struct IdentifierRegistry {
    counters: HashMap<String, u32>,
}

impl Default for IdentifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierRegistry {
    /// Create a registry with only the reserved placeholder seeded
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        counters.insert(RESERVED_NAME.to_string(), 0);
        Self { counters }
    }

    /// Register a candidate name and return the name to use
    ///
    /// The first occurrence keeps its name, later ones get `1`, `2`, ...
    /// appended. `reserved` is suffixed from its first occurrence.
    pub fn register(&mut self, candidate: &str) -> String {
        let counter = match self.counters.get_mut(candidate) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counters.insert(candidate.to_string(), 0);
                0
            }
        };

        if counter == 0 {
            candidate.to_string()
        } else {
            format!("{}{}", candidate, counter)
        }
    }

    /// Number of times `name` has been seen as a repeat
    #[cfg(test)]
    fn occurrences(&self, name: &str) -> Option<u32> {
        self.counters.get(name).copied()
    }
}
