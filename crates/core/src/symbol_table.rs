//! Collision-free identifier allocation within one scope.

use std::collections::HashSet;

/// Hands out identifiers that never repeat within one table.
///
/// Names are compared case-insensitively, so `Class` collides with a
/// reserved `class`. A taken candidate is retried with a numeric suffix
/// starting at 2 (`name`, `name2`, `name3`, ...). Results depend on call
/// order, so callers must allocate in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    taken: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table whose seed words can never be returned verbatim.
    pub fn from_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            taken: seed.into_iter().map(|s| symbol_key(s.as_ref())).collect(),
        }
    }

    /// Return `candidate` if it is free, otherwise the first free suffixed variant.
    pub fn allocate(&mut self, candidate: &str) -> String {
        if self.taken.insert(symbol_key(candidate)) {
            return candidate.to_string();
        }

        let mut suffix: u64 = 2;
        loop {
            let next = format!("{candidate}{suffix}");
            if self.taken.insert(symbol_key(&next)) {
                return next;
            }
            suffix += 1;
        }
    }
}

fn symbol_key(name: &str) -> String {
    name.to_lowercase()
}
