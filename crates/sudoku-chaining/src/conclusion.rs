//! Assignments and eliminations produced by chains.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitset::{candidate, cell_of, digit_of, Candidate, CandidateMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConclusionKind {
    Assignment,
    Elimination,
}

/// A single deduction about one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Conclusion {
    pub kind: ConclusionKind,
    pub cell: usize,
    pub digit: u8,
}

impl Conclusion {
    pub fn assignment(cand: Candidate) -> Self {
        Conclusion {
            kind: ConclusionKind::Assignment,
            cell: cell_of(cand),
            digit: digit_of(cand),
        }
    }

    pub fn elimination(cand: Candidate) -> Self {
        Conclusion {
            kind: ConclusionKind::Elimination,
            cell: cell_of(cand),
            digit: digit_of(cand),
        }
    }

    pub fn candidate(&self) -> Candidate {
        candidate(self.cell, self.digit)
    }

    pub fn is_elimination(&self) -> bool {
        self.kind == ConclusionKind::Elimination
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            ConclusionKind::Assignment => "=",
            ConclusionKind::Elimination => "<>",
        };
        write!(
            f,
            "r{}c{}{}{}",
            self.cell / 9 + 1,
            self.cell % 9 + 1,
            op,
            self.digit
        )
    }
}

/// Ordered, duplicate-free collection of conclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConclusionSet(BTreeSet<Conclusion>);

impl ConclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One elimination per candidate of `map`
    pub fn eliminations_of(map: &CandidateMap) -> Self {
        map.iter().map(Conclusion::elimination).collect()
    }

    pub fn insert(&mut self, conclusion: Conclusion) -> bool {
        self.0.insert(conclusion)
    }

    pub fn merge(&mut self, other: ConclusionSet) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, conclusion: &Conclusion) -> bool {
        self.0.contains(conclusion)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conclusion> {
        self.0.iter()
    }

    /// Candidates removed by the elimination entries
    pub fn eliminated(&self) -> CandidateMap {
        self.0
            .iter()
            .filter(|c| c.is_elimination())
            .map(Conclusion::candidate)
            .collect()
    }
}

impl FromIterator<Conclusion> for ConclusionSet {
    fn from_iter<I: IntoIterator<Item = Conclusion>>(iter: I) -> Self {
        ConclusionSet(iter.into_iter().collect())
    }
}

impl Extend<Conclusion> for ConclusionSet {
    fn extend<I: IntoIterator<Item = Conclusion>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ConclusionSet {
    type Item = Conclusion;
    type IntoIter = std::collections::btree_set::IntoIter<Conclusion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ConclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(", "))
    }
}
