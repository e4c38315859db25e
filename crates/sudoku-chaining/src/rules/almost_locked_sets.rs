//! Almost locked set links.
//!
//! An ALS is N cells of one sector holding N+1 digits between them. Removing
//! any digit `x` from it locks the rest, so "no `x` in the ALS" forces every
//! other digit `y` into the ALS cells that hold it: a strong link
//! `cells_x(x) = cells_y(y)`.

use std::collections::HashSet;

use crate::bitset::{candidate, BitSet, CellMap};
use crate::conclusion::{Conclusion, ConclusionSet};
use crate::fabric::{sector_cells, CandidateFabric};
use crate::link::{AlmostLockedSetPattern, Link, LinkPattern};
use crate::node::Node;
use crate::options::{LinkOption, LinkType};
use crate::rule::{ChainingRule, ChainingRuleLinkContext};

/// Enumerate every ALS of 2..=`max_size` cells, each cell set reported once.
pub fn enumerate_als(fab: &CandidateFabric, max_size: usize) -> Vec<AlmostLockedSetPattern> {
    let mut result = Vec::new();
    let mut seen: HashSet<CellMap> = HashSet::new();

    for sector in 0..27 {
        let empty: Vec<usize> = sector_cells(sector)
            .into_iter()
            .filter(|&c| fab.values[c].is_none() && !fab.cell_cands[c].is_empty())
            .collect();

        // Gosper's hack over n-bit subsets of the sector's empty cells
        for n in 2..=empty.len().min(max_size) {
            let mask_limit = 1u32 << empty.len();
            let mut set = (1u32 << n) - 1;
            while set < mask_limit {
                let mut cells = CellMap::empty();
                let mut union = BitSet::empty();
                for (bit, &cell) in empty.iter().enumerate() {
                    if set & (1 << bit) != 0 {
                        cells.insert(cell);
                        union = union.union(&fab.cell_cands[cell]);
                    }
                }

                if union.count() == (n + 1) as u32 && seen.insert(cells) {
                    result.push(AlmostLockedSetPattern {
                        cells,
                        digits: union,
                        sector,
                    });
                }

                let c = set & (!set).wrapping_add(1);
                let r = set + c;
                set = (((r ^ set) >> 2) / c) | r;
            }
        }
    }
    result
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlmostLockedSetRule;

impl ChainingRule for AlmostLockedSetRule {
    fn link_type(&self) -> LinkType {
        LinkType::AlmostLockedSet
    }

    fn get_links(&self, ctx: &mut ChainingRuleLinkContext<'_>) {
        let grid = ctx.grid;
        let option = ctx.options.almost_locked_set;
        for als in enumerate_als(grid, ctx.options.max_als_size) {
            let pattern = Some(LinkPattern::AlmostLockedSet(als));
            let digits: Vec<u8> = als.digits.iter().collect();

            let endpoint = |digit: u8| -> Option<Node> {
                let cells = als.cells_with(digit, grid);
                let grouped = cells.len() > 1;
                if option == LinkOption::Intersection && grouped && !cells.is_in_intersection() {
                    return None;
                }
                Node::new(cells.with_digit(digit), true, grouped).ok()
            };
            let nodes: Vec<(u8, Option<Node>)> = digits.iter().map(|&d| (d, endpoint(d))).collect();

            for (i, &(_, x)) in nodes.iter().enumerate() {
                for &(_, y) in &nodes[i + 1..] {
                    if let (Some(x), Some(y)) = (x, y) {
                        ctx.add_strong(x, y, pattern);
                    }
                }
            }

            // A grouped endpoint is weakly linked to the digit's other cells it sees
            for &(digit, node) in &nodes {
                let Some(node) = node.filter(Node::is_grouped) else {
                    continue;
                };
                let targets = node.cells().peer_intersection() & grid.candidates_map(digit);
                for cell in targets.iter() {
                    if let Ok(other) = Node::from_candidate(candidate(cell, digit), false, false) {
                        ctx.add_weak(node, other, None);
                    }
                }
            }
        }
    }

    /// Inside a closed loop the ALS is locked: its unused digits leave the peers.
    fn loop_conclusions(&self, grid: &CandidateFabric, links: &[Link]) -> ConclusionSet {
        let mut result = ConclusionSet::new();
        for link in links {
            let Some(LinkPattern::AlmostLockedSet(als)) = link.pattern else {
                continue;
            };
            let used = link.first.digits() | link.second.digits();
            for digit in als.digits.difference(&used).iter() {
                let cells = als.cells_with(digit, grid);
                let targets = cells.peer_intersection() & grid.candidates_map(digit);
                result.extend(
                    (targets - als.cells)
                        .iter()
                        .map(|cell| Conclusion::elimination(candidate(cell, digit))),
                );
            }
        }
        result
    }
}
