//! Result accumulators for a resolution: a membership set or an ordered path map.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;

use keeper_core::coordinate::Target;

/// Where a reachable module leads toward the target.
#[derive(Debug, Clone, Copy)]
pub enum NextHop<'a> {
    /// Through a dependency that itself reaches the target.
    Dependency(&'a str),
    /// Directly: `dependency` belongs to the target family.
    Target {
        dependency: &'a str,
        target: &'a Target,
    },
}

/// What the traversal records as it discovers reachable modules.
pub trait Accumulator {
    fn contains(&self, identifier: &str) -> bool;

    /// Whether a module of the target family counts as reachable by itself.
    fn self_match(&self) -> bool {
        false
    }

    fn record_reachable(&mut self, identifier: &str, next_hop: NextHop<'_>);

    /// Record a module that is itself in the target family, reached without
    /// a hop. Returns false when the accumulator has no entry for it.
    fn record_match(&mut self, _identifier: &str) -> bool {
        false
    }
}

/// Unordered set of every identifier on a path to the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSet {
    members: BTreeSet<String>,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>) -> bool {
        self.members.insert(identifier.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Accumulator for MembershipSet {
    fn contains(&self, identifier: &str) -> bool {
        self.members.contains(identifier)
    }

    fn record_reachable(&mut self, identifier: &str, next_hop: NextHop<'_>) {
        let dependency = match next_hop {
            NextHop::Dependency(dependency) | NextHop::Target { dependency, .. } => dependency,
        };
        self.members.insert(dependency.to_string());
        self.members.insert(identifier.to_string());
    }

    fn record_match(&mut self, identifier: &str) -> bool {
        self.members.insert(identifier.to_string());
        true
    }
}

/// Reachable identifier -> next hop toward the target, in discovery order.
///
/// A module keeps the first hop recorded for it. The hop of a module whose
/// dependency is in the target family is the target as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    hops: IndexMap<String, String>,
}

impl PathMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_hop(&self, identifier: &str) -> Option<&str> {
        self.hops.get(identifier).map(String::as_str)
    }

    /// `(identifier, next hop)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hops.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Follow next hops from `from` to the end of its path.
    ///
    /// Starts with `from` itself; empty if `from` is not in the map. Stops
    /// before an identifier already on the chain.
    pub fn chain(&self, from: &str) -> Vec<&str> {
        let Some((start, _)) = self.hops.get_key_value(from) else {
            return Vec::new();
        };
        let mut seen: HashSet<&str> = HashSet::new();
        let mut chain = Vec::new();
        let mut current = start.as_str();
        while seen.insert(current) {
            chain.push(current);
            match self.hops.get(current) {
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        chain
    }

    /// Every identifier in the map, ordered so that a module's next hop
    /// comes before the module itself.
    pub fn publish_order(&self) -> Vec<&str> {
        let mut placed: HashSet<&str> = HashSet::new();
        let mut order = Vec::with_capacity(self.hops.len());
        for start in self.hops.keys() {
            let mut pending = Vec::new();
            let mut current = start.as_str();
            while let Some(next) = self.hops.get(current) {
                if !placed.insert(current) {
                    break;
                }
                pending.push(current);
                current = next.as_str();
            }
            order.extend(pending.into_iter().rev());
        }
        order
    }
}

impl Accumulator for PathMap {
    fn contains(&self, identifier: &str) -> bool {
        self.hops.contains_key(identifier)
    }

    fn self_match(&self) -> bool {
        true
    }

    fn record_reachable(&mut self, identifier: &str, next_hop: NextHop<'_>) {
        let hop = match next_hop {
            NextHop::Dependency(dependency) => dependency.to_string(),
            NextHop::Target { target, .. } => target.identifier(),
        };
        self.hops.entry(identifier.to_string()).or_insert(hop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target::parse("acme:core").unwrap()
    }

    #[test]
    fn membership_records_both_ends() {
        let t = target();
        let mut set = MembershipSet::new();
        set.record_reachable(
            "other:util:1.0",
            NextHop::Target {
                dependency: "acme:core:2.0",
                target: &t,
            },
        );
        set.record_reachable("acme:app:1.0", NextHop::Dependency("other:util:1.0"));
        let members: Vec<&str> = set.iter().collect();
        assert_eq!(members, ["acme:app:1.0", "acme:core:2.0", "other:util:1.0"]);
        assert!(!set.self_match());
    }

    #[test]
    fn path_map_keeps_first_hop() {
        let t = target();
        let mut map = PathMap::new();
        map.record_reachable("b", NextHop::Target { dependency: "acme:core:2.0", target: &t });
        map.record_reachable("a", NextHop::Dependency("b"));
        map.record_reachable("a", NextHop::Dependency("c"));
        assert_eq!(map.next_hop("a"), Some("b"));
        assert_eq!(map.next_hop("b"), Some("acme:core"));
        assert!(map.self_match());
    }

    #[test]
    fn chain_walks_to_target() {
        let t = target();
        let mut map = PathMap::new();
        map.record_reachable("b", NextHop::Target { dependency: "acme:core:2.0", target: &t });
        map.record_reachable("a", NextHop::Dependency("b"));
        assert_eq!(map.chain("a"), ["a", "b", "acme:core"]);
        assert!(map.chain("zzz").is_empty());
    }

    #[test]
    fn chain_stops_on_repeat() {
        let mut map = PathMap::new();
        map.record_reachable("a", NextHop::Dependency("b"));
        map.record_reachable("b", NextHop::Dependency("a"));
        assert_eq!(map.chain("a"), ["a", "b"]);
    }

    #[test]
    fn publish_order_puts_hops_first() {
        let t = target();
        let mut map = PathMap::new();
        // Discovery order is outermost first.
        map.record_reachable("app", NextHop::Dependency("feature"));
        map.record_reachable("feature", NextHop::Dependency("util"));
        map.record_reachable("util", NextHop::Target { dependency: "acme:core:2.0", target: &t });
        map.record_reachable("other", NextHop::Dependency("util"));
        assert_eq!(map.publish_order(), ["util", "feature", "app", "other"]);
    }
}
