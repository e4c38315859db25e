//! Blossom loops: loops whose sides are whole branches keyed by where they
//! enter and leave.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bitset::{Candidate, CandidateMap};
use crate::chain::{ChainOrLoop, ChainOrLoopComparison};
use crate::conclusion::ConclusionSet;
use crate::error::{ChainingError, Result};
use crate::fabric::CandidateFabric;
use crate::link::pair_conclusions;
use crate::node::NodeComparison;
use crate::rule::ChainingRules;
use crate::types::Technique;

/// Boundary of one branch: where it starts and where it exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlossomLoopEntry {
    pub start: Candidate,
    pub start_is_on: bool,
    pub end: Candidate,
    pub end_is_on: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BlossomLoop {
    branches: BTreeMap<BlossomLoopEntry, ChainOrLoop>,
    conclusions: ConclusionSet,
}

impl BlossomLoop {
    pub fn new(conclusions: ConclusionSet) -> Self {
        BlossomLoop {
            branches: BTreeMap::new(),
            conclusions,
        }
    }

    pub fn insert(&mut self, entry: BlossomLoopEntry, branch: ChainOrLoop) -> Result<()> {
        if branch.is_empty() {
            return Err(ChainingError::EmptyBranch);
        }
        if self.branches.contains_key(&entry) {
            return Err(ChainingError::DuplicateBlossomEntry {
                start: entry.start,
                end: entry.end,
            });
        }
        self.branches.insert(entry, branch);
        Ok(())
    }

    pub fn conclusions(&self) -> &ConclusionSet {
        &self.conclusions
    }

    pub fn set_conclusions(&mut self, conclusions: ConclusionSet) {
        self.conclusions = conclusions;
    }

    pub fn branches(&self) -> impl Iterator<Item = (&BlossomLoopEntry, &ChainOrLoop)> {
        self.branches.iter()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn starts(&self) -> CandidateMap {
        self.branches.keys().map(|e| e.start).collect()
    }

    pub fn exits(&self) -> CandidateMap {
        self.branches.keys().map(|e| e.end).collect()
    }

    pub fn complexity(&self) -> usize {
        self.branches.values().map(ChainOrLoop::complexity).sum()
    }

    pub fn branched_complexity(&self) -> Vec<usize> {
        self.branches.values().map(ChainOrLoop::complexity).collect()
    }

    pub fn technique(&self) -> Technique {
        Technique::BlossomLoop
    }

    /// Everything this loop proves.
    ///
    /// Each weak link of every branch is tested with the pair rule, the rules
    /// add their loop-only eliminations, and any candidate that sees every
    /// exit is removed.
    pub fn derive_conclusions(
        &self,
        grid: &CandidateFabric,
        rules: Option<&ChainingRules>,
    ) -> ConclusionSet {
        let mut result = ConclusionSet::new();
        let mut all_links = Vec::new();
        for branch in self.branches.values() {
            let links = branch.links();
            for link in links.iter().filter(|l| !l.is_strong) {
                result.merge(pair_conclusions(grid, &link.first, &link.second));
            }
            all_links.extend(links);
        }
        if let Some(rules) = rules {
            result.merge(rules.loop_conclusions(grid, &all_links));
        }

        let exits = self.exits();
        if !exits.is_empty() {
            let seen = grid.all_candidates() & exits.peer_intersection();
            result.merge(ConclusionSet::eliminations_of(&seen));
        }
        result
    }

    /// Branch count, starts, exits, then branch by branch.
    pub fn compare_to(&self, other: &BlossomLoop, nodes: NodeComparison) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.starts().cmp(&other.starts()))
            .then_with(|| self.exits().cmp(&other.exits()))
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
        other: &BlossomLoop,
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
        for (entry, branch) in &self.branches {
            entry.hash(state);
            branch.hash_with(nodes, comparison, state);
        }
    }
}

impl PartialEq for BlossomLoop {
    fn eq(&self, other: &Self) -> bool {
        self.equals(
            other,
            NodeComparison::IgnorePolarity,
            ChainOrLoopComparison::Undirected,
        )
    }
}

impl Eq for BlossomLoop {}

impl Hash for BlossomLoop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(
            NodeComparison::IgnorePolarity,
            ChainOrLoopComparison::Undirected,
            state,
        );
    }
}

impl fmt::Display for BlossomLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .branches
            .iter()
            .map(|(entry, branch)| {
                format!(
                    "{} -> {}: {}",
                    CandidateMap::from_candidate(entry.start),
                    CandidateMap::from_candidate(entry.end),
                    branch
                )
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
