//! Per-run reachability memo, scoped by target.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

impl From<bool> for Reachability {
    fn from(reached: bool) -> Self {
        if reached {
            Self::Reachable
        } else {
            Self::Unreachable
        }
    }
}

/// Tracks which coordinates are known to reach (or not reach) each target
/// during one resolution run. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ResolutionMemo {
    scopes: HashMap<String, HashMap<String, Reachability>>,
}

impl ResolutionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &str, identifier: &str) -> Option<Reachability> {
        self.scopes.get(target)?.get(identifier).copied()
    }

    pub fn mark(&mut self, target: &str, identifier: &str, reachability: Reachability) {
        self.scopes
            .entry(target.to_string())
            .or_default()
            .insert(identifier.to_string(), reachability);
    }

    pub fn is_unreachable(&self, target: &str, identifier: &str) -> bool {
        self.get(target, identifier) == Some(Reachability::Unreachable)
    }

    /// Number of memoised entries across all targets.
    pub fn len(&self) -> usize {
        self.scopes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_by_target() {
        let mut memo = ResolutionMemo::new();
        memo.mark("acme:core", "acme:app:1.0", Reachability::Unreachable);
        assert!(memo.is_unreachable("acme:core", "acme:app:1.0"));
        assert!(!memo.is_unreachable("acme:net", "acme:app:1.0"));
        assert_eq!(memo.get("acme:net", "acme:app:1.0"), None);

        memo.mark("acme:core", "acme:app:1.0", true.into());
        assert_eq!(
            memo.get("acme:core", "acme:app:1.0"),
            Some(Reachability::Reachable)
        );
        assert_eq!(memo.len(), 1);
    }
}
