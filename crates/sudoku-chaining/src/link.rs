//! Links between nodes, the payload explaining them, and the pair rule that
//! turns two linked nodes into conclusions.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bitset::{candidate, cell_of, digit_of, BitSet, CellMap};
use crate::chain::ChainOrLoopComparison;
use crate::conclusion::{Conclusion, ConclusionSet};
use crate::fabric::CandidateFabric;
use crate::node::Node;

/// An almost locked set: `cells.len() + 1 == digits.count()` inside one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlmostLockedSetPattern {
    pub cells: CellMap,
    pub digits: BitSet,
    pub sector: usize,
}

impl AlmostLockedSetPattern {
    /// Cells of the set holding `digit`
    pub fn cells_with(&self, digit: u8, grid: &CandidateFabric) -> CellMap {
        self.cells & grid.candidates_map(digit)
    }

    /// One cell with two digits
    pub fn is_bivalue_cell(&self) -> bool {
        self.cells.len() == 1
    }
}

/// Why a grouped or advanced link holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkPattern {
    AlmostLockedSet(AlmostLockedSetPattern),
    /// A digit restricted to a box/line intersection of `house`
    LockedCandidates { house: usize, digit: u8 },
}

/// Unordered pool key: `(a, b, is_strong)` with `a <= b` and parents dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndirectedLink {
    low: Node,
    high: Node,
    is_strong: bool,
}

impl UndirectedLink {
    pub fn new(a: Node, b: Node, is_strong: bool) -> Self {
        let (a, b) = (a.without_parent(), b.without_parent());
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        UndirectedLink {
            low,
            high,
            is_strong,
        }
    }

    pub fn nodes(&self) -> (&Node, &Node) {
        (&self.low, &self.high)
    }

    pub fn is_strong(&self) -> bool {
        self.is_strong
    }
}

/// An inference edge between two nodes.
///
/// `PartialEq` and `Hash` are undirected; use [`Link::equals`] for the directed form.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub first: Node,
    pub second: Node,
    pub is_strong: bool,
    pub pattern: Option<LinkPattern>,
}

impl Link {
    pub fn new(first: Node, second: Node, is_strong: bool, pattern: Option<LinkPattern>) -> Self {
        Link {
            first,
            second,
            is_strong,
            pattern,
        }
    }

    pub fn key(&self) -> UndirectedLink {
        UndirectedLink::new(self.first, self.second, self.is_strong)
    }

    pub fn equals(&self, other: &Link, comparison: ChainOrLoopComparison) -> bool {
        if self.is_strong != other.is_strong {
            return false;
        }
        let forward = self.first == other.first && self.second == other.second;
        match comparison {
            ChainOrLoopComparison::Directed => forward,
            ChainOrLoopComparison::Undirected => {
                forward || (self.first == other.second && self.second == other.first)
            }
        }
    }

    pub fn hash_with<H: Hasher>(&self, comparison: ChainOrLoopComparison, state: &mut H) {
        match comparison {
            ChainOrLoopComparison::Directed => {
                self.first.hash(state);
                self.second.hash(state);
                self.is_strong.hash(state);
            }
            ChainOrLoopComparison::Undirected => self.key().hash(state),
        }
    }

    /// Both ends name single candidates of one bivalue cell.
    pub fn is_bivalue_cell_link(&self, grid: &CandidateFabric) -> bool {
        match (self.first.candidate(), self.second.candidate()) {
            (Some(a), Some(b)) => {
                let cell = cell_of(a);
                cell == cell_of(b) && a != b && grid.bivalue_cells().contains(cell)
            }
            _ => false,
        }
    }

    /// Conclusions provable from this link's two endpoints.
    pub fn conclusions(&self, grid: &CandidateFabric) -> ConclusionSet {
        pair_conclusions(grid, &self.first, &self.second)
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ChainOrLoopComparison::Undirected)
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(ChainOrLoopComparison::Undirected, state);
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.is_strong { "=" } else { "-" };
        write!(f, "{}{}{}", self.first, op, self.second)
    }
}

/// Decide what two linked nodes prove.
///
/// Recognised shapes: a node against its own negation, two single candidates,
/// and two nodes over the same single digit. Anything else proves nothing.
pub fn pair_conclusions(grid: &CandidateFabric, node1: &Node, node2: &Node) -> ConclusionSet {
    let mut result = ConclusionSet::new();

    if node1.map() == node2.map() && node1.is_on() != node2.is_on() {
        if node1.is_grouped() {
            if let Some(digit) = node1.digits().single() {
                let cells = node1.map().reduce_by_digit(digit);
                let targets = cells.peer_intersection() & grid.candidates_map(digit);
                result.extend(
                    targets
                        .iter()
                        .map(|cell| Conclusion::elimination(candidate(cell, digit))),
                );
            }
        } else if let Some(cand) = node1.map().first() {
            result.insert(Conclusion::assignment(cand));
        }
        return result;
    }

    if let (Some(c1), Some(c2)) = (node1.candidate(), node2.candidate()) {
        let (cell1, digit1) = (cell_of(c1), digit_of(c1));
        let (cell2, digit2) = (cell_of(c2), digit_of(c2));

        if cell1 == cell2 {
            for digit in grid.cell_cands[cell1].iter() {
                if digit != digit1 && digit != digit2 {
                    result.insert(Conclusion::elimination(candidate(cell1, digit)));
                }
            }
        } else if digit1 == digit2 {
            let pair: CellMap = [cell1, cell2].into_iter().collect();
            let targets = pair.peer_intersection() & grid.candidates_map(digit1);
            result.extend(
                targets
                    .iter()
                    .map(|cell| Conclusion::elimination(candidate(cell, digit1))),
            );
        } else if grid.sees(cell1, cell2) {
            // Each cell loses the other's digit: it holds its own end or sees the other
            if grid.has_cand(cell1, digit2) {
                result.insert(Conclusion::elimination(candidate(cell1, digit2)));
            }
            if grid.has_cand(cell2, digit1) {
                result.insert(Conclusion::elimination(candidate(cell2, digit1)));
            }
        }
        return result;
    }

    let (d1, d2) = (node1.digits(), node2.digits());
    if let (Some(digit), true) = (d1.single(), d1 == d2) {
        let cells = node1.cells() | node2.cells();
        let targets = cells.peer_intersection() & grid.candidates_map(digit);
        result.extend(
            targets
                .iter()
                .map(|cell| Conclusion::elimination(candidate(cell, digit))),
        );
    }
    result
}
