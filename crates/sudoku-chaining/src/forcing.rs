//! Multiple forcing chains: one branch per starting candidate, all proving
//! the same conclusions.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bitset::{candidate, BitSet, Candidate, CandidateMap, CellMap};
use crate::chain::{ChainOrLoop, ChainOrLoopComparison, ChainShape};
use crate::conclusion::{Conclusion, ConclusionSet};
use crate::error::{ChainingError, Result};
use crate::fabric::CandidateFabric;
use crate::node::{Node, NodeComparison};
use crate::types::Technique;

#[derive(Debug, Clone, Default)]
pub struct MultipleForcingChains {
    branches: BTreeMap<Candidate, ChainOrLoop>,
    conclusions: ConclusionSet,
}

impl MultipleForcingChains {
    pub fn new(conclusions: ConclusionSet) -> Self {
        MultipleForcingChains {
            branches: BTreeMap::new(),
            conclusions,
        }
    }

    /// Attach the branch that starts from `cand`.
    pub fn insert(&mut self, cand: Candidate, branch: ChainOrLoop) -> Result<()> {
        if !matches!(branch.shape(), ChainShape::Branch(_)) {
            return Err(ChainingError::NotABranch);
        }
        let Some(root) = branch.nodes().first() else {
            return Err(ChainingError::EmptyBranch);
        };
        if root.candidate() != Some(cand) {
            return Err(ChainingError::BranchRootMismatch { key: cand });
        }
        if self.branches.contains_key(&cand) {
            return Err(ChainingError::DuplicateBranch(cand));
        }
        self.branches.insert(cand, branch);
        Ok(())
    }

    pub fn conclusions(&self) -> &ConclusionSet {
        &self.conclusions
    }

    pub fn branches(&self) -> impl Iterator<Item = (&Candidate, &ChainOrLoop)> {
        self.branches.iter()
    }

    pub fn get(&self, cand: Candidate) -> Option<&ChainOrLoop> {
        self.branches.get(&cand)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Starting candidates of every branch
    pub fn candidates(&self) -> CandidateMap {
        self.branches.keys().copied().collect()
    }

    /// Every start lies in one cell
    pub fn is_cell_multiple(&self) -> bool {
        self.candidates().cells().len() == 1
    }

    /// Every start is the same digit, spread over several cells
    pub fn is_house_multiple(&self) -> bool {
        let starts = self.candidates();
        starts.digits().is_single() && starts.cells().len() > 1
    }

    pub fn technique(&self) -> Option<Technique> {
        if self.is_cell_multiple() {
            Some(Technique::CellForcingChains)
        } else if self.is_house_multiple() {
            Some(Technique::RegionForcingChains)
        } else {
            None
        }
    }

    /// Total stored nodes over all branches
    pub fn complexity(&self) -> usize {
        self.branches.values().map(ChainOrLoop::complexity).sum()
    }

    pub fn branched_complexity(&self) -> Vec<usize> {
        self.branches.values().map(ChainOrLoop::complexity).collect()
    }

    pub fn exists(&self, predicate: impl Fn(&ChainOrLoop) -> bool) -> bool {
        self.branches.values().any(predicate)
    }

    pub fn true_for_all(&self, predicate: impl Fn(&ChainOrLoop) -> bool) -> bool {
        self.branches.values().all(predicate)
    }

    pub fn digits_mask(&self) -> BitSet {
        self.branches
            .values()
            .fold(BitSet::empty(), |acc, b| acc | b.digits_mask())
    }

    pub fn is_grouped(&self) -> bool {
        self.exists(ChainOrLoop::is_grouped)
    }

    /// Eliminations from the branches' first inferences.
    ///
    /// One root assumption always holds, so one first inference holds. When
    /// every first inference turns on the same single digit, cells seeing all
    /// of them lose that digit.
    pub fn thorough_conclusions(&self, grid: &CandidateFabric) -> ConclusionSet {
        let mut union = CandidateMap::empty();
        for branch in self.branches.values() {
            match branch.nodes().get(1) {
                Some(node) if node.is_on() => union |= *node.map(),
                _ => return ConclusionSet::new(),
            }
        }
        let Some(digit) = union.digits().single() else {
            return ConclusionSet::new();
        };
        let cells: CellMap = union.cells();
        (cells.peer_intersection() & grid.candidates_map(digit))
            .iter()
            .map(|cell| Conclusion::elimination(candidate(cell, digit)))
            .collect()
    }

    /// Rewrite as a single chain plus fins, when the one elimination allows it.
    ///
    /// Branches whose root directly sees the eliminated candidate become fins.
    /// Exactly two branches must remain; they are joined through the
    /// eliminated candidate into a weak-start chain that assumes it true and
    /// proves it false. The strong link between the two remaining roots holds
    /// only once every fin is false.
    pub fn to_finned_chain(&self) -> Option<(ChainOrLoop, CandidateMap)> {
        let mut conclusions = self.conclusions.iter();
        let (Some(conclusion), None) = (conclusions.next(), conclusions.next()) else {
            return None;
        };
        if !conclusion.is_elimination() {
            return None;
        }
        let target = conclusion.candidate();

        let mut fins = CandidateMap::empty();
        let mut kraken = Vec::with_capacity(2);
        for branch in self.branches.values() {
            let nodes = branch.nodes();
            if nodes.len() == 2 && nodes[0].map().peer_intersection().contains(target) {
                fins |= *nodes[0].map();
            } else if kraken.len() == 2 {
                return None;
            } else {
                kraken.push(branch);
            }
        }
        let &[first, second] = kraken.as_slice() else {
            return None;
        };

        // First branch up to its terminal, then the second read backwards
        let (_, head) = first.nodes().split_last()?;
        let cycle: Vec<Node> = head
            .iter()
            .chain(second.nodes().iter().rev())
            .copied()
            .collect();
        let len = cycle.len();
        let at = cycle.iter().position(|n| n.candidate() == Some(target))?;

        let mut path: Vec<Node> = (1..=len)
            .rev()
            .map(|step| cycle[(at + step) % len].with_polarity(step % 2 == 1))
            .collect();
        path.push(Node::from_candidate(target, false, false).ok()?);
        let chain = ChainOrLoop::from_path(&path, ChainShape::Chain, first.pools().clone()).ok()?;
        Some((chain, fins))
    }

    /// Branch count, then starting candidates, then branch by branch.
    pub fn compare_to(&self, other: &MultipleForcingChains, nodes: NodeComparison) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.candidates().cmp(&other.candidates()))
            .then_with(|| {
                self.branches
                    .values()
                    .zip(other.branches.values())
                    .map(|(a, b)| a.compare_to(b, nodes))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }

    pub fn equals(
        &self,
        other: &MultipleForcingChains,
        nodes: NodeComparison,
        comparison: ChainOrLoopComparison,
    ) -> bool {
        self.branches.len() == other.branches.len()
            && self
                .branches
                .iter()
                .zip(other.branches.iter())
                .all(|((ka, a), (kb, b))| ka == kb && a.equals(b, nodes, comparison))
    }

    pub fn hash_with<H: Hasher>(
        &self,
        nodes: NodeComparison,
        comparison: ChainOrLoopComparison,
        state: &mut H,
    ) {
        for (cand, branch) in &self.branches {
            cand.hash(state);
            branch.hash_with(nodes, comparison, state);
        }
    }
}

impl PartialEq for MultipleForcingChains {
    fn eq(&self, other: &Self) -> bool {
        self.equals(
            other,
            NodeComparison::IgnorePolarity,
            ChainOrLoopComparison::Undirected,
        )
    }
}

impl Eq for MultipleForcingChains {}

impl Hash for MultipleForcingChains {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(
            NodeComparison::IgnorePolarity,
            ChainOrLoopComparison::Undirected,
            state,
        );
    }
}

impl fmt::Display for MultipleForcingChains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .branches
            .iter()
            .map(|(cand, branch)| format!("{}: {}", CandidateMap::from_candidate(*cand), branch))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
