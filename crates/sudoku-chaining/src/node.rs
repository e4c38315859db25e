//! Nodes: "candidate set is on/off" propositions and the arena holding their
//! parent links.
//!
//! A search frontier grows by pushing children into a [`NodeArena`]; each child
//! stores its parent as a [`NodeId`]. Equality, hashing, and ordering never look
//! at the parent.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, Not};

use crate::bitset::{candidate, BitSet, Candidate, CandidateMap, CellMap, CANDIDATE_COUNT};
use crate::error::{ChainingError, Result};

/// How two nodes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeComparison {
    /// Compare candidate maps only
    IgnorePolarity,
    /// Compare polarity, then candidate maps
    IncludePolarity,
}

impl TryFrom<u8> for NodeComparison {
    type Error = ChainingError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(NodeComparison::IgnorePolarity),
            1 => Ok(NodeComparison::IncludePolarity),
            other => Err(ChainingError::InvalidNodeComparison(other)),
        }
    }
}

/// Index of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A proposition over a non-empty candidate map.
///
/// The `PartialEq`/`Hash`/`Ord` impls follow
/// [`NodeComparison::IncludePolarity`], which is what adjacency maps key on.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    map: CandidateMap,
    is_on: bool,
    is_advanced: bool,
    parent: Option<NodeId>,
}

impl Node {
    pub fn new(map: CandidateMap, is_on: bool, is_advanced: bool) -> Result<Self> {
        if map.is_empty() {
            return Err(ChainingError::EmptyNodeMap);
        }
        Ok(Node {
            map,
            is_on,
            is_advanced,
            parent: None,
        })
    }

    pub fn from_candidate(cand: Candidate, is_on: bool, is_advanced: bool) -> Result<Self> {
        if cand >= CANDIDATE_COUNT {
            return Err(ChainingError::CandidateOutOfRange(cand));
        }
        Self::new(CandidateMap::from_candidate(cand), is_on, is_advanced)
    }

    pub fn from_cell_digit(cell: usize, digit: u8, is_on: bool, is_advanced: bool) -> Result<Self> {
        if cell >= 81 {
            return Err(ChainingError::CellOutOfRange(cell));
        }
        if !(1..=9).contains(&digit) {
            return Err(ChainingError::DigitOutOfRange(digit));
        }
        Self::from_candidate(candidate(cell, digit), is_on, is_advanced)
    }

    /// Same proposition hanging off a different parent
    pub fn with_parent(self, parent: NodeId) -> Self {
        Node {
            parent: Some(parent),
            ..self
        }
    }

    pub fn with_polarity(self, is_on: bool) -> Self {
        Node { is_on, ..self }
    }

    /// Same proposition detached from the tree
    pub fn without_parent(self) -> Self {
        Node {
            parent: None,
            ..self
        }
    }

    pub fn map(&self) -> &CandidateMap {
        &self.map
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn is_advanced(&self) -> bool {
        self.is_advanced
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Spans two or more candidates
    pub fn is_grouped(&self) -> bool {
        self.map.len() >= 2
    }

    /// The candidate when the map holds exactly one
    pub fn candidate(&self) -> Option<Candidate> {
        self.map.single()
    }

    pub fn cells(&self) -> CellMap {
        self.map.cells()
    }

    pub fn digits(&self) -> BitSet {
        self.map.digits()
    }

    pub fn equals(&self, other: &Node, mode: NodeComparison) -> bool {
        match mode {
            NodeComparison::IgnorePolarity => self.map == other.map,
            NodeComparison::IncludePolarity => self.is_on == other.is_on && self.map == other.map,
        }
    }

    /// Off sorts before on when polarity counts; maps break the tie.
    pub fn compare(&self, other: &Node, mode: NodeComparison) -> Ordering {
        let polarity = match mode {
            NodeComparison::IgnorePolarity => Ordering::Equal,
            NodeComparison::IncludePolarity => self.is_on.cmp(&other.is_on),
        };
        polarity.then_with(|| self.map.cmp(&other.map))
    }

    /// Feed the fields that `mode` compares into `state`.
    pub fn hash_with<H: Hasher>(&self, mode: NodeComparison, state: &mut H) {
        if mode == NodeComparison::IncludePolarity {
            self.is_on.hash(state);
        }
        self.map.hash(state);
    }
}

impl Not for Node {
    type Output = Node;

    fn not(self) -> Node {
        Node {
            is_on: !self.is_on,
            ..self
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, NodeComparison::IncludePolarity)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(NodeComparison::IncludePolarity, state);
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, NodeComparison::IncludePolarity)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.map)
    }
}

/// Flat storage for a search tree; parents are indices into it.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node as-is (roots, or nodes that already carry a parent id)
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Store `child` under `parent`
    pub fn extend(&mut self, parent: NodeId, child: Node) -> NodeId {
        self.push(child.with_parent(parent))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent ids from `id`'s parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.get(id).and_then(|n| n.parent);
        std::iter::from_fn(move || {
            let here = current?;
            current = self.get(here).and_then(|n| n.parent);
            Some(here)
        })
    }

    /// Nodes on the path from `id` to its root, both ends included
    pub fn ancestors_len(&self, id: NodeId) -> usize {
        1 + self.ancestors(id).count()
    }

    pub fn root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Some ancestor of `descendant` equals `node` under `mode`.
    pub fn is_ancestor_of(&self, node: &Node, descendant: NodeId, mode: NodeComparison) -> bool {
        self.ancestors(descendant)
            .any(|id| self.nodes[id.0].equals(node, mode))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
