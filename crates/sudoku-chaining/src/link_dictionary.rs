//! Symmetric adjacency of nodes plus the pattern pool for grouped links.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::link::{LinkPattern, UndirectedLink};
use crate::node::Node;

/// Frozen view of a dictionary's pattern pool, shareable across threads.
pub type GroupedLinkPool = Arc<HashMap<UndirectedLink, LinkPattern>>;

/// The strong and weak pools a chain reads patterns back from.
#[derive(Debug, Clone, Default)]
pub struct LinkPools {
    pub strong: GroupedLinkPool,
    pub weak: GroupedLinkPool,
}

impl LinkPools {
    pub fn from_dictionaries(strong: &LinkDictionary, weak: &LinkDictionary) -> Self {
        LinkPools {
            strong: strong.grouped_link_pool(),
            weak: weak.grouped_link_pool(),
        }
    }

    pub fn pattern(&self, a: &Node, b: &Node, is_strong: bool) -> Option<LinkPattern> {
        let pool = if is_strong { &self.strong } else { &self.weak };
        pool.get(&UndirectedLink::new(*a, *b, is_strong)).copied()
    }
}

/// Mutable builder of links for one search attempt.
///
/// Not synchronised: each worker owns its own strong/weak pair.
#[derive(Debug, Clone, Default)]
pub struct LinkDictionary {
    adjacency: HashMap<Node, HashSet<Node>>,
    pool: HashMap<UndirectedLink, LinkPattern>,
}

impl LinkDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `a <-> b` and its contrapositive `!a <-> !b`.
    ///
    /// A pattern is only stored if the pool has none for that key yet.
    pub fn add_entry(&mut self, a: Node, b: Node, is_strong: bool, pattern: Option<LinkPattern>) {
        let (a, b) = (a.without_parent(), b.without_parent());
        self.insert_pair(a, b, is_strong, pattern);
        self.insert_pair(!a, !b, is_strong, pattern);
    }

    fn insert_pair(&mut self, a: Node, b: Node, is_strong: bool, pattern: Option<LinkPattern>) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        if let Some(pattern) = pattern {
            self.pool
                .entry(UndirectedLink::new(a, b, is_strong))
                .or_insert(pattern);
        }
    }

    /// Nodes linked to `node`, if any
    pub fn get(&self, node: &Node) -> Option<&HashSet<Node>> {
        self.adjacency.get(&node.without_parent())
    }

    pub fn neighbors<'a>(&'a self, node: &Node) -> impl Iterator<Item = &'a Node> + 'a {
        self.get(node).into_iter().flatten()
    }

    pub fn contains_link(&self, a: &Node, b: &Node) -> bool {
        self.get(a).is_some_and(|set| set.contains(&b.without_parent()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &HashSet<Node>)> {
        self.adjacency.iter()
    }

    /// Number of nodes with at least one link
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Undirected links stored, contrapositives included
    pub fn link_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2
    }

    pub fn pattern(&self, a: &Node, b: &Node, is_strong: bool) -> Option<&LinkPattern> {
        self.pool.get(&UndirectedLink::new(*a, *b, is_strong))
    }

    /// Snapshot of the pattern pool
    pub fn grouped_link_pool(&self) -> GroupedLinkPool {
        Arc::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::candidate;

    fn node(cell: usize, digit: u8, is_on: bool) -> Node {
        Node::from_candidate(candidate(cell, digit), is_on, false).unwrap()
    }

    fn locked(house: usize) -> LinkPattern {
        LinkPattern::LockedCandidates { house, digit: 1 }
    }

    #[test]
    fn test_add_entry_is_symmetric_and_contrapositive() {
        let mut dict = LinkDictionary::new();
        let a = node(0, 1, false);
        let b = node(4, 1, true);
        dict.add_entry(a, b, true, None);

        assert!(dict.contains_link(&a, &b));
        assert!(dict.contains_link(&b, &a));
        assert!(dict.contains_link(&!a, &!b));
        assert!(dict.contains_link(&!b, &!a));
        assert!(!dict.contains_link(&a, &!b));
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.link_count(), 2);
    }

    #[test]
    fn test_readding_is_noop() {
        let mut dict = LinkDictionary::new();
        let a = node(0, 1, true);
        let b = node(1, 1, false);
        dict.add_entry(a, b, false, None);
        dict.add_entry(b, a, false, None);
        assert_eq!(dict.link_count(), 2);
    }

    #[test]
    fn test_pool_first_writer_wins() {
        let mut dict = LinkDictionary::new();
        let a = node(0, 1, false);
        let b = node(4, 1, true);
        dict.add_entry(a, b, true, Some(locked(0)));
        dict.add_entry(a, b, true, Some(locked(5)));

        assert_eq!(dict.pattern(&a, &b, true), Some(&locked(0)));
        assert_eq!(dict.pattern(&b, &a, true), Some(&locked(0)));
        assert_eq!(dict.pattern(&!a, &!b, true), Some(&locked(0)));
        assert_eq!(dict.pattern(&a, &b, false), None);
    }

    #[test]
    fn test_pool_snapshot_is_frozen() {
        let mut dict = LinkDictionary::new();
        let a = node(0, 1, false);
        let b = node(4, 1, true);
        dict.add_entry(a, b, true, Some(locked(0)));
        let pool = dict.grouped_link_pool();
        dict.add_entry(node(9, 2, false), node(10, 2, true), true, Some(locked(1)));
        assert_eq!(pool.len(), 2);
    }
}
