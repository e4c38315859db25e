//! ChainOrLoop: a validated alternating sequence of nodes.
//!
//! Nodes are kept in the order the parent walk produced them, last inference
//! first. For chains and loops that order is canonicalised by an optional
//! reversal; forcing branches are stored root first and never reversed.
//!
//! Inference polarity alternates along every sequence: a parent that is on
//! forces its child off (weak link), a parent that is off forces its child on
//! (strong link). Links are regenerated from the nodes on demand and get their
//! payload back from the shared pattern pools.

mod format;
mod wings;

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::trace;

pub use format::ChainFormat;

use crate::bitset::{BitSet, Candidate};
use crate::conclusion::ConclusionSet;
use crate::error::{ChainingError, Result};
use crate::fabric::CandidateFabric;
use crate::link::{pair_conclusions, Link};
use crate::link_dictionary::LinkPools;
use crate::node::{Node, NodeArena, NodeComparison, NodeId};
use crate::rule::ChainingRules;

/// Whether sequence equality may read the other sequence backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainOrLoopComparison {
    Undirected,
    Directed,
}

impl TryFrom<u8> for ChainOrLoopComparison {
    type Error = ChainingError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ChainOrLoopComparison::Undirected),
            1 => Ok(ChainOrLoopComparison::Directed),
            other => Err(ChainingError::InvalidChainComparison(other)),
        }
    }
}

/// First inference of a forcing branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// Root is off, so its first inference is strong
    Strong,
    /// Root is on, so its first inference is weak
    Weak,
}

impl BranchKind {
    fn of_root(root: &Node) -> Self {
        if root.is_on() {
            BranchKind::Weak
        } else {
            BranchKind::Strong
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainShape {
    /// Open alternating inference chain
    Chain,
    /// Continuous loop
    Loop,
    /// One branch of a forcing chain or blossom loop
    Branch(BranchKind),
}

impl ChainShape {
    fn min_len(self) -> usize {
        match self {
            ChainShape::Chain => 2,
            ChainShape::Loop => 4,
            ChainShape::Branch(_) => 1,
        }
    }
}

/// A validated chain, loop, or forcing branch.
#[derive(Debug, Clone)]
pub struct ChainOrLoop {
    shape: ChainShape,
    nodes: Vec<Node>,
    pools: LinkPools,
}

impl ChainOrLoop {
    /// Build from the terminal node `last` of a search tree.
    ///
    /// A chain walks up to the root. A loop walks until it meets a node equal
    /// to `last` again. A branch is re-ordered root first and its kind must
    /// match the root's polarity.
    pub fn new(arena: &NodeArena, last: NodeId, shape: ChainShape, pools: LinkPools) -> Result<Self> {
        let nodes = collect(arena, last, shape == ChainShape::Loop)?;
        Self::from_collected(nodes, shape, pools)
    }

    pub fn chain(arena: &NodeArena, last: NodeId, pools: LinkPools) -> Result<Self> {
        Self::new(arena, last, ChainShape::Chain, pools)
    }

    pub fn closed_loop(arena: &NodeArena, last: NodeId, pools: LinkPools) -> Result<Self> {
        Self::new(arena, last, ChainShape::Loop, pools)
    }

    /// Forcing branch; the kind follows from the root's polarity.
    pub fn branch(arena: &NodeArena, last: NodeId, pools: LinkPools) -> Result<Self> {
        let root = arena[arena.root(last)];
        Self::new(arena, last, ChainShape::Branch(BranchKind::of_root(&root)), pools)
    }

    /// Build from an inference path listed root first.
    ///
    /// For a loop the path lists the cycle once, starting at the node it closes on.
    pub fn from_path(path: &[Node], shape: ChainShape, pools: LinkPools) -> Result<Self> {
        let (first, rest) = path
            .split_first()
            .ok_or(ChainingError::ChainTooShort { len: 0 })?;
        let mut arena = NodeArena::new();
        let mut last = arena.push(first.without_parent());
        for node in rest {
            last = arena.extend(last, *node);
        }
        if shape == ChainShape::Loop {
            last = arena.extend(last, *first);
        }
        Self::new(&arena, last, shape, pools)
    }

    fn from_collected(mut nodes: Vec<Node>, shape: ChainShape, pools: LinkPools) -> Result<Self> {
        if nodes.len() < shape.min_len() {
            return Err(ChainingError::ChainTooShort { len: nodes.len() });
        }
        validate_alternation(&nodes, shape == ChainShape::Loop)?;

        match shape {
            ChainShape::Chain => {
                let weak_start = nodes.last().is_some_and(Node::is_on);
                if nodes[0].is_on() == weak_start {
                    return Err(ChainingError::MismatchedEnds);
                }
                if weak_start && nodes.len() < 4 {
                    return Err(ChainingError::ChainTooShort { len: nodes.len() });
                }
            }
            ChainShape::Loop => {
                if !nodes[0].is_on() {
                    return Err(ChainingError::MismatchedEnds);
                }
            }
            ChainShape::Branch(kind) => {
                nodes.reverse();
                if BranchKind::of_root(&nodes[0]) != kind {
                    return Err(ChainingError::MismatchedEnds);
                }
            }
        }

        let mut result = ChainOrLoop {
            shape,
            nodes,
            pools,
        };
        if shape == ChainShape::Chain && result.should_reverse() {
            trace!(len = result.nodes.len(), "reversing chain into canonical direction");
            result = result.reverse();
        }
        Ok(result)
    }

    fn should_reverse(&self) -> bool {
        let len = self.nodes.len();
        self.nodes[len - 1].is_on()
            && self.nodes[1].compare(&self.nodes[len - 2], NodeComparison::IgnorePolarity)
                != Ordering::Less
    }

    /// Same inference read from the other end: nodes back to front, each negated.
    pub fn reverse(&self) -> ChainOrLoop {
        let nodes: Vec<Node> = self.nodes.iter().rev().map(|n| !*n).collect();
        let shape = match self.shape {
            ChainShape::Branch(_) => ChainShape::Branch(BranchKind::of_root(&nodes[0])),
            other => other,
        };
        ChainOrLoop {
            shape,
            nodes,
            pools: self.pools.clone(),
        }
    }

    pub fn shape(&self) -> ChainShape {
        self.shape
    }

    /// Only chains and loops are reported as techniques on their own
    pub fn is_named(&self) -> bool {
        matches!(self.shape, ChainShape::Chain | ChainShape::Loop)
    }

    /// Every stored node, scaffolding included
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn pools(&self) -> &LinkPools {
        &self.pools
    }

    /// An open chain that starts with a weak inference
    pub fn is_weak_start(&self) -> bool {
        match self.shape {
            ChainShape::Chain => self.nodes.last().is_some_and(Node::is_on),
            ChainShape::Loop => false,
            ChainShape::Branch(kind) => kind == BranchKind::Weak,
        }
    }

    /// Parity of the first link: 0 strong, 1 weak
    pub fn weak_start_identity(&self) -> usize {
        match self.shape {
            ChainShape::Branch(BranchKind::Weak) => 1,
            _ => 0,
        }
    }

    /// 0 when the last node links back to the first
    pub fn loop_identity(&self) -> usize {
        match self.shape {
            ChainShape::Loop => 0,
            _ => 1,
        }
    }

    /// Nodes that take part in the deduction.
    ///
    /// A weak-start chain drops its first and last nodes: they only carry the
    /// assumption and the target of the inference.
    pub fn valid_nodes(&self) -> &[Node] {
        if self.shape == ChainShape::Chain && self.is_weak_start() {
            &self.nodes[1..self.nodes.len() - 1]
        } else {
            &self.nodes
        }
    }

    /// Number of valid nodes
    pub fn len(&self) -> usize {
        self.valid_nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored node count; scaffolding counts
    pub fn complexity(&self) -> usize {
        self.nodes.len()
    }

    pub fn first(&self) -> &Node {
        &self.valid_nodes()[0]
    }

    pub fn last(&self) -> &Node {
        let valid = self.valid_nodes();
        &valid[valid.len() - 1]
    }

    /// Link sequence rebuilt from the valid nodes
    pub fn links(&self) -> Vec<Link> {
        let span = self.valid_nodes();
        let len = span.len();
        let wsi = self.weak_start_identity();
        (0..len.saturating_sub(self.loop_identity()))
            .map(|i| {
                let is_strong = (wsi + i) % 2 == 0;
                let (a, b) = (span[i], span[(i + 1) % len]);
                Link::new(a, b, is_strong, self.pools.pattern(&a, &b, is_strong))
            })
            .collect()
    }

    pub fn strong_links(&self) -> Vec<Link> {
        self.links().into_iter().filter(|l| l.is_strong).collect()
    }

    pub fn weak_links(&self) -> Vec<Link> {
        self.links().into_iter().filter(|l| !l.is_strong).collect()
    }

    pub fn digits_mask(&self) -> BitSet {
        self.valid_nodes()
            .iter()
            .fold(BitSet::empty(), |acc, n| acc | n.digits())
    }

    /// Every node uses the same single digit
    pub fn satisfies_x_rule(&self) -> bool {
        self.digits_mask().is_single()
    }

    /// Ends share their digits and no strong link stays on one digit set
    pub fn satisfies_y_rule(&self) -> bool {
        self.first().digits() == self.last().digits()
            && self
                .strong_links()
                .iter()
                .all(|l| l.first.digits() != l.second.digits())
    }

    /// Two valid nodes share a candidate
    pub fn contains_overlapped_nodes(&self) -> bool {
        let span = self.valid_nodes();
        span.iter()
            .enumerate()
            .any(|(i, a)| span[i + 1..].iter().any(|b| a.map().intersects(b.map())))
    }

    /// Some valid node is grouped or advanced
    pub fn is_grouped(&self) -> bool {
        self.valid_nodes()
            .iter()
            .any(|n| n.is_grouped() || n.is_advanced())
    }

    /// Some valid node spans several candidates
    pub fn is_strictly_grouped(&self) -> bool {
        self.valid_nodes().iter().any(Node::is_grouped)
    }

    /// First valid node is the negation of the last
    pub fn is_self_constrained(&self) -> bool {
        let (first, last) = (self.first(), self.last());
        first.equals(last, NodeComparison::IgnorePolarity) && first.is_on() != last.is_on()
    }

    pub fn contains(&self, cand: Candidate) -> bool {
        self.valid_nodes().iter().any(|n| n.map().contains(cand))
    }

    /// Some conclusion touches a candidate used by the chain
    pub fn overlaps_with_conclusions(&self, conclusions: &ConclusionSet) -> bool {
        conclusions.iter().any(|c| self.contains(c.candidate()))
    }

    pub fn find_index(&self, predicate: impl Fn(&Node) -> bool) -> Option<usize> {
        self.valid_nodes().iter().position(predicate)
    }

    pub fn find_last_index(&self, predicate: impl Fn(&Node) -> bool) -> Option<usize> {
        self.valid_nodes().iter().rposition(predicate)
    }

    /// Valid nodes `start..end`, clamped to the sequence
    pub fn slice(&self, start: usize, end: usize) -> &[Node] {
        let span = self.valid_nodes();
        let end = end.min(span.len());
        &span[start.min(end)..end]
    }

    /// Assignments and eliminations this pattern proves.
    ///
    /// Chains use their two ends; loops use every weak link plus the rules'
    /// loop-only eliminations. Branches prove nothing alone.
    pub fn conclusions(&self, grid: &CandidateFabric, rules: Option<&ChainingRules>) -> ConclusionSet {
        match self.shape {
            ChainShape::Chain => pair_conclusions(grid, self.first(), self.last()),
            ChainShape::Loop => {
                let links = self.links();
                let mut result = ConclusionSet::new();
                for link in links.iter().filter(|l| !l.is_strong) {
                    result.merge(link.conclusions(grid));
                }
                if let Some(rules) = rules {
                    result.merge(rules.loop_conclusions(grid, &links));
                }
                result
            }
            ChainShape::Branch(_) => ConclusionSet::new(),
        }
    }

    pub fn equals(
        &self,
        other: &ChainOrLoop,
        nodes: NodeComparison,
        comparison: ChainOrLoopComparison,
    ) -> bool {
        let (a, b) = (self.valid_nodes(), other.valid_nodes());
        if a.len() != b.len() {
            return false;
        }
        let forward = || a.iter().zip(b).all(|(x, y)| x.equals(y, nodes));
        let mirrored = || {
            a.iter()
                .zip(b.iter().rev())
                .all(|(x, y)| x.equals(&!*y, nodes))
        };
        match comparison {
            ChainOrLoopComparison::Directed => forward(),
            ChainOrLoopComparison::Undirected => forward() || mirrored(),
        }
    }

    /// Feed the hash consistent with `equals` under the same modes.
    ///
    /// Undirected hashing feeds whichever of the valid nodes and their negated
    /// reverse sorts first under `nodes`, so both readings hash alike.
    pub fn hash_with<H: Hasher>(
        &self,
        nodes: NodeComparison,
        comparison: ChainOrLoopComparison,
        state: &mut H,
    ) {
        let span = self.valid_nodes();
        span.len().hash(state);
        match comparison {
            ChainOrLoopComparison::Directed => {
                for node in span {
                    node.hash_with(nodes, state);
                }
            }
            ChainOrLoopComparison::Undirected => {
                let mirrored: Vec<Node> = span.iter().rev().map(|n| !*n).collect();
                let mirrored_first = span
                    .iter()
                    .zip(&mirrored)
                    .map(|(x, y)| x.compare(y, nodes))
                    .find(|o| o.is_ne())
                    == Some(Ordering::Greater);
                let canonical = if mirrored_first { &mirrored[..] } else { span };
                for node in canonical {
                    node.hash_with(nodes, state);
                }
            }
        }
    }

    pub fn hash_code(&self, nodes: NodeComparison, comparison: ChainOrLoopComparison) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash_with(nodes, comparison, &mut hasher);
        hasher.finish()
    }

    /// Shorter first, then self-constrained first, then node by node.
    pub fn compare_to(&self, other: &ChainOrLoop, nodes: NodeComparison) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| {
                other
                    .is_self_constrained()
                    .cmp(&self.is_self_constrained())
            })
            .then_with(|| {
                self.valid_nodes()
                    .iter()
                    .zip(other.valid_nodes())
                    .map(|(x, y)| x.compare(y, nodes))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// Parent walk from `last`, parents stripped, last node first.
fn collect(arena: &NodeArena, last: NodeId, is_loop: bool) -> Result<Vec<Node>> {
    let terminal = arena[last];
    let mut nodes = vec![terminal.without_parent()];
    for id in arena.ancestors(last) {
        let node = arena[id];
        if is_loop && node.equals(&terminal, NodeComparison::IncludePolarity) {
            return Ok(nodes);
        }
        nodes.push(node.without_parent());
    }
    if is_loop {
        Err(ChainingError::UnclosedLoop)
    } else {
        Ok(nodes)
    }
}

fn validate_alternation(nodes: &[Node], cyclic: bool) -> Result<()> {
    if let Some(index) = nodes
        .windows(2)
        .position(|pair| pair[0].is_on() == pair[1].is_on())
    {
        return Err(ChainingError::BrokenAlternation { index: index + 1 });
    }
    if cyclic && nodes.len() % 2 != 0 {
        return Err(ChainingError::BrokenAlternation { index: 0 });
    }
    Ok(())
}

impl PartialEq for ChainOrLoop {
    fn eq(&self, other: &Self) -> bool {
        self.equals(
            other,
            NodeComparison::IgnorePolarity,
            ChainOrLoopComparison::Undirected,
        )
    }
}

impl Eq for ChainOrLoop {}

impl Hash for ChainOrLoop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(
            NodeComparison::IgnorePolarity,
            ChainOrLoopComparison::Undirected,
            state,
        );
    }
}

impl fmt::Display for ChainOrLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(&ChainFormat::standard()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::{candidate, CandidateMap};
    use crate::conclusion::Conclusion;

    fn n(cell: usize, digit: u8, is_on: bool) -> Node {
        Node::from_candidate(candidate(cell, digit), is_on, false).unwrap()
    }

    /// r1c1(1) off => r1c5(1) on => r1c5(7) off => r3c5(7) on
    fn strong_start() -> ChainOrLoop {
        let path = [n(0, 1, false), n(4, 1, true), n(4, 7, false), n(22, 7, true)];
        ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap()
    }

    #[test]
    fn test_comparison_from_integer() {
        assert_eq!(
            ChainOrLoopComparison::try_from(1),
            Ok(ChainOrLoopComparison::Directed)
        );
        assert_eq!(
            ChainOrLoopComparison::try_from(2),
            Err(ChainingError::InvalidChainComparison(2))
        );
    }

    #[test]
    fn test_strong_start_keeps_every_node() {
        let chain = strong_start();
        assert!(!chain.is_weak_start());
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.complexity(), 4);
        // Stored last inference first
        assert_eq!(chain.first(), &n(22, 7, true));
        let links = chain.links();
        assert_eq!(links.len(), 3);
        assert!(links[0].is_strong && !links[1].is_strong && links[2].is_strong);
    }

    #[test]
    fn test_weak_start_drops_scaffolding() {
        let path = [
            n(0, 1, true),
            n(4, 1, false),
            n(4, 7, true),
            n(22, 7, false),
            n(24, 7, true),
            n(24, 2, false),
        ];
        let chain = ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap();
        assert!(chain.is_weak_start());
        assert_eq!(chain.complexity(), 6);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.strong_links().len(), 2);
        assert_eq!(chain.weak_links().len(), 1);
    }

    #[test]
    fn test_auto_reverse_is_canonical() {
        let forward = [
            n(0, 1, true),
            n(4, 1, false),
            n(4, 7, true),
            n(22, 7, false),
        ];
        let backward: Vec<Node> = forward.iter().rev().map(|x| !*x).collect();
        let a = ChainOrLoop::from_path(&forward, ChainShape::Chain, LinkPools::default()).unwrap();
        let b = ChainOrLoop::from_path(&backward, ChainShape::Chain, LinkPools::default()).unwrap();
        assert!(a.equals(&b, NodeComparison::IncludePolarity, ChainOrLoopComparison::Directed));
    }

    #[test]
    fn test_broken_alternation_rejected() {
        let path = [n(0, 1, false), n(4, 1, false)];
        assert_eq!(
            ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap_err(),
            ChainingError::BrokenAlternation { index: 1 }
        );
        let same_ends = [n(0, 1, false), n(4, 1, true), n(4, 2, false)];
        assert_eq!(
            ChainOrLoop::from_path(&same_ends, ChainShape::Chain, LinkPools::default())
                .unwrap_err(),
            ChainingError::MismatchedEnds
        );
    }

    #[test]
    fn test_unclosed_loop() {
        let mut arena = NodeArena::new();
        let a = arena.push(n(0, 1, true));
        let b = arena.extend(a, n(4, 1, false));
        assert_eq!(
            ChainOrLoop::closed_loop(&arena, b, LinkPools::default()).unwrap_err(),
            ChainingError::UnclosedLoop
        );
    }

    #[test]
    fn test_loop_links_wrap_around() {
        // x-wing style loop on digit 3: r1c1 r1c5 r5c5 r5c1
        let path = [
            n(0, 3, true),
            n(4, 3, false),
            n(40, 3, true),
            n(36, 3, false),
        ];
        let lp = ChainOrLoop::from_path(&path, ChainShape::Loop, LinkPools::default()).unwrap();
        assert_eq!(lp.len(), 4);
        let links = lp.links();
        assert_eq!(links.len(), 4);
        assert_eq!(links[3].second, *lp.first());
        assert!(lp.satisfies_x_rule());
    }

    #[test]
    fn test_branch_is_root_first() {
        let path = [n(0, 1, true), n(4, 1, false), n(4, 7, true)];
        let branch = ChainOrLoop::from_path(
            &path,
            ChainShape::Branch(BranchKind::Weak),
            LinkPools::default(),
        )
        .unwrap();
        assert_eq!(branch.nodes()[0], n(0, 1, true));
        assert!(!branch.is_named());
        let links = branch.links();
        assert!(!links[0].is_strong && links[1].is_strong);

        let wrong = ChainOrLoop::from_path(
            &path,
            ChainShape::Branch(BranchKind::Strong),
            LinkPools::default(),
        );
        assert_eq!(wrong.unwrap_err(), ChainingError::MismatchedEnds);
    }

    #[test]
    fn test_self_constraint_sorts_first() {
        // r1c1(1) off => r1c5(1) on => r1c5(7) off => r1c1(1) on is self-constrained
        let constrained = ChainOrLoop::from_path(
            &[n(0, 1, false), n(4, 1, true), n(4, 7, false), n(0, 1, true)],
            ChainShape::Chain,
            LinkPools::default(),
        )
        .unwrap();
        assert!(constrained.is_self_constrained());
        assert_eq!(
            constrained.compare_to(&strong_start(), NodeComparison::IgnorePolarity),
            Ordering::Less
        );
    }

    #[test]
    fn test_chain_conclusions_use_ends() {
        let grid = CandidateFabric::empty();
        let chain = strong_start();
        let result = chain.conclusions(&grid, None);
        // r3c5 and r1c1 share no house
        assert!(result.is_empty());

        let assign = ChainOrLoop::from_path(
            &[n(0, 1, false), n(4, 1, true), n(4, 7, false), n(0, 1, true)],
            ChainShape::Chain,
            LinkPools::default(),
        )
        .unwrap();
        let result = assign.conclusions(&grid, None);
        assert!(result.contains(&Conclusion::assignment(candidate(0, 1))));
    }

    #[test]
    fn test_y_rule() {
        // r1c1(1) off => r1c1(2) on => r1c5(2) off => r1c5(1) on
        let xy = ChainOrLoop::from_path(
            &[n(0, 1, false), n(0, 2, true), n(4, 2, false), n(4, 1, true)],
            ChainShape::Chain,
            LinkPools::default(),
        )
        .unwrap();
        assert!(xy.satisfies_y_rule());
        // Ends differ in digit
        assert!(!strong_start().satisfies_y_rule());

        // Ends agree, but every strong link stays on digit 1
        let x = ChainOrLoop::from_path(
            &[n(0, 1, false), n(4, 1, true), n(22, 1, false), n(26, 1, true)],
            ChainShape::Chain,
            LinkPools::default(),
        )
        .unwrap();
        assert!(!x.satisfies_y_rule());
    }

    #[test]
    fn test_overlapped_nodes() {
        assert!(!strong_start().contains_overlapped_nodes());

        let column: CandidateMap = [candidate(4, 1), candidate(13, 1)].into_iter().collect();
        let overlapping = ChainOrLoop::from_path(
            &[
                n(0, 1, false),
                Node::new(column, true, false).unwrap(),
                n(4, 1, false),
                n(22, 1, true),
            ],
            ChainShape::Chain,
            LinkPools::default(),
        )
        .unwrap();
        assert!(overlapping.contains_overlapped_nodes());
        assert!(overlapping.is_strictly_grouped());
    }

    #[test]
    fn test_undirected_hash_follows_node_mode() {
        let chain = strong_start();
        let reversed = chain.reverse();
        for mode in [NodeComparison::IgnorePolarity, NodeComparison::IncludePolarity] {
            assert!(chain.equals(&reversed, mode, ChainOrLoopComparison::Undirected));
            assert_eq!(
                chain.hash_code(mode, ChainOrLoopComparison::Undirected),
                reversed.hash_code(mode, ChainOrLoopComparison::Undirected)
            );
        }
        assert_ne!(
            chain.hash_code(NodeComparison::IgnorePolarity, ChainOrLoopComparison::Undirected),
            chain.hash_code(NodeComparison::IncludePolarity, ChainOrLoopComparison::Undirected)
        );

        // Same candidates in another order is a different chain
        let shuffled = ChainOrLoop::from_path(
            &[n(0, 1, false), n(4, 7, true), n(4, 1, false), n(22, 7, true)],
            ChainShape::Chain,
            LinkPools::default(),
        )
        .unwrap();
        for mode in [NodeComparison::IgnorePolarity, NodeComparison::IncludePolarity] {
            assert!(!chain.equals(&shuffled, mode, ChainOrLoopComparison::Undirected));
            assert_ne!(
                chain.hash_code(mode, ChainOrLoopComparison::Undirected),
                shuffled.hash_code(mode, ChainOrLoopComparison::Undirected)
            );
        }
    }

    #[test]
    fn test_slice_and_find() {
        let chain = strong_start();
        assert_eq!(chain.slice(1, 3).len(), 2);
        assert_eq!(chain.slice(3, 99).len(), 1);
        assert_eq!(chain.find_index(|x| x.digits().contains(1)), Some(2));
        assert_eq!(chain.find_last_index(|x| x.digits().contains(7)), Some(1));
        assert!(chain.contains(candidate(4, 7)));
        assert!(!chain.contains(candidate(4, 8)));
    }
}
