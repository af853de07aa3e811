//! Suffix-rename collision policy for named logical entities.
//!
//! Skins and geometry entries are distinct content referenced by id, so
//! a collision must keep both under a new name. Files use the opposite
//! policy (first seen wins, never renamed) in the merge engine; the two
//! must not be unified.

use std::collections::HashSet;

/// Outcome of claiming a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// The name actually registered: the original, or a suffixed one.
    pub name: String,
    /// Whether a rename was required.
    pub renamed: bool,
}

/// Tracks names already emitted and resolves collisions with the first
/// unused `_2`, `_3`, ... suffix.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Register `name`, suffix-renaming it if already taken.
    pub fn claim(&mut self, name: &str) -> Claim {
        if self.taken.insert(name.to_string()) {
            return Claim {
                name: name.to_string(),
                renamed: false,
            };
        }

        let mut counter = 2;
        loop {
            let candidate = format!("{}_{}", name, counter);
            if self.taken.insert(candidate.clone()) {
                return Claim {
                    name: candidate,
                    renamed: true,
                };
            }
            counter += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
